use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::classify::{BatchProgress, ResultColumn, ResultRow, ResultTable};

/// Lifecycle of the latest accepted submission for a mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum BatchOutcome {
    #[default]
    Idle,
    Running {
        submission_id: u64,
        progress: BatchProgress,
    },
    Finished {
        submission_id: u64,
        table: ResultTable,
    },
    Failed {
        submission_id: u64,
        message: String,
    },
}

impl BatchOutcome {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn submission_id(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Running { submission_id, .. }
            | Self::Finished { submission_id, .. }
            | Self::Failed { submission_id, .. } => Some(*submission_id),
        }
    }

    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            Self::Finished { table, .. } => Some(table),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// View-only grid settings; never affect exports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridViewState {
    pub filter: String,
    pub sort: Option<(ResultColumn, SortDirection)>,
    pub group_by_top_label: bool,
    /// Selected rows, by index into the result table.
    pub selected: BTreeSet<usize>,
}

impl GridViewState {
    /// Cycle a column through ascending, descending and unsorted.
    pub fn cycle_sort(&mut self, column: ResultColumn) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn toggle_selected(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }
}

/// Rows sharing a top-ranked label, or every visible row when not grouping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowGroup {
    /// `None` for the ungrouped view or rows without labels.
    pub label: Option<String>,
    pub rows: Vec<usize>,
}

/// Filter, sort and group table rows for display.
pub fn arrange_rows(table: &ResultTable, view: &GridViewState) -> Vec<RowGroup> {
    let needle = view.filter.trim().to_lowercase();
    let mut visible: Vec<usize> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| needle.is_empty() || row_matches(row, &needle))
        .map(|(index, _)| index)
        .collect();

    if let Some((column, direction)) = view.sort {
        visible.sort_by(|&a, &b| {
            let ordering = compare_rows(&table.rows()[a], &table.rows()[b], column);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    if !view.group_by_top_label {
        return vec![RowGroup {
            label: None,
            rows: visible,
        }];
    }

    let mut groups: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
    for index in visible {
        let label = table.rows()[index].top_label().map(str::to_string);
        groups.entry(label).or_default().push(index);
    }
    // Labelled groups first, unlabelled rows last.
    let mut arranged: Vec<RowGroup> = groups
        .into_iter()
        .map(|(label, rows)| RowGroup { label, rows })
        .collect();
    arranged.sort_by_key(|group| group.label.is_none());
    arranged
}

fn row_matches(row: &ResultRow, needle: &str) -> bool {
    ResultColumn::ALL
        .iter()
        .any(|column| row.cell(*column).to_lowercase().contains(needle))
}

fn compare_rows(a: &ResultRow, b: &ResultRow, column: ResultColumn) -> Ordering {
    match column {
        ResultColumn::Scores => a
            .top_score()
            .partial_cmp(&b.top_score())
            .unwrap_or(Ordering::Equal),
        _ => a
            .cell(column)
            .to_lowercase()
            .cmp(&b.cell(column).to_lowercase()),
    }
}
