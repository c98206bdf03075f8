use serde::{Deserialize, Serialize};

/// Ranked labels and scores returned for one phrase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Echo of the classified phrase.
    pub sequence: String,
    /// Candidate labels in the order the model ranked them.
    pub labels: Vec<String>,
    /// Scores in `[0, 1]`, aligned with `labels`.
    pub scores: Vec<f64>,
}

/// Columns of the result table, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultColumn {
    Text,
    Labels,
    Scores,
}

impl ResultColumn {
    pub const ALL: [ResultColumn; 3] = [Self::Text, Self::Labels, Self::Scores];

    pub fn header(self) -> &'static str {
        match self {
            Self::Text => "Text phrase",
            Self::Labels => "Label set",
            Self::Scores => "Classification index",
        }
    }
}

/// One display row: a phrase with its ranked labels and percentage scores.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub text: String,
    pub labels: Vec<String>,
    pub scores: Vec<String>,
    top_score: Option<f64>,
}

impl ResultRow {
    fn from_result(result: ClassificationResult) -> Self {
        Self {
            text: result.sequence,
            labels: result.labels,
            scores: result.scores.iter().copied().map(format_percent).collect(),
            top_score: result.scores.first().copied(),
        }
    }

    /// Highest-ranked label, if the model returned any.
    pub fn top_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// Raw score of the highest-ranked label.
    pub fn top_score(&self) -> Option<f64> {
        self.top_score
    }

    /// Cell text as shown in the grid.
    pub fn cell(&self, column: ResultColumn) -> String {
        match column {
            ResultColumn::Text => self.text.clone(),
            ResultColumn::Labels => self.labels.join(", "),
            ResultColumn::Scores => self.scores.join(", "),
        }
    }
}

/// Merged results for a batch, one row per phrase in batch order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Merge per-phrase results. Label and score order is kept as returned.
    pub fn from_results(results: Vec<ClassificationResult>) -> Self {
        Self {
            rows: results.into_iter().map(ResultRow::from_result).collect(),
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render a `[0, 1]` score as a percentage with two decimals, e.g. `87.34%`.
pub fn format_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}
