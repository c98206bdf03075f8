use eframe::egui::{self, Frame, Margin, RichText};
use egui_extras::{Column, TableBuilder};

use super::EguiApp;
use super::style;
use crate::classify::{ResultColumn, ResultTable};
use crate::egui_app::state::{BatchOutcome, GridViewState, ModeWorkspace, arrange_rows};

const ROW_HEIGHT: f32 = 22.0;

impl EguiApp {
    /// Progress, error panel or results grid for the active mode.
    pub(super) fn render_outcome(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let ModeWorkspace { outcome, grid, .. } = self.controller.ui.active_mut();
        let mut export_clicked = false;
        match outcome {
            BatchOutcome::Idle => {}
            BatchOutcome::Running { progress, .. } => {
                let fraction = if progress.total == 0 {
                    0.0
                } else {
                    progress.completed as f32 / progress.total as f32
                };
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .text(format!(
                            "Classifying {}/{}",
                            progress.completed, progress.total
                        ))
                        .animate(true),
                );
            }
            BatchOutcome::Failed { message, .. } => {
                Frame::new()
                    .stroke(egui::Stroke::new(1.0, palette.warning))
                    .inner_margin(Margin::same(8))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new("Classification failed")
                                .color(palette.warning)
                                .strong(),
                        );
                        ui.label(message.as_str());
                    });
            }
            BatchOutcome::Finished { table, .. } => {
                ui.label(RichText::new("Classification complete").color(palette.success));
                ui.add_space(4.0);
                export_clicked = render_grid(ui, table, grid);
            }
        }
        if export_clicked {
            self.controller.export_results_via_dialog();
        }
    }
}

fn render_grid(ui: &mut egui::Ui, table: &ResultTable, grid: &mut GridViewState) -> bool {
    let palette = style::palette();
    let mut export_clicked = false;
    ui.horizontal(|ui| {
        ui.label("Filter");
        ui.add(
            egui::TextEdit::singleline(&mut grid.filter)
                .hint_text("Search all columns")
                .desired_width(200.0),
        );
        ui.checkbox(&mut grid.group_by_top_label, "Group by top label");
        if ui.button("Select all").clicked() {
            grid.selected = (0..table.len()).collect();
        }
        if ui.button("Clear selection").clicked() {
            grid.selected.clear();
        }
        ui.label(
            RichText::new(format!("{} selected", grid.selected.len())).color(palette.muted),
        );
        export_clicked = ui.button("Export CSV").clicked();
    });
    ui.add_space(4.0);

    let groups = arrange_rows(table, grid);
    if groups.iter().all(|group| group.rows.is_empty()) {
        ui.label(RichText::new("No rows match the filter").color(palette.muted));
        return export_clicked;
    }
    for (group_index, group) in groups.iter().enumerate() {
        if !grid.group_by_top_label {
            render_table(ui, group_index, table, &group.rows, grid);
            continue;
        }
        let title = format!(
            "{} ({})",
            group.label.as_deref().unwrap_or("(no label)"),
            group.rows.len()
        );
        ui.push_id(("group", group_index), |ui| {
            egui::CollapsingHeader::new(title)
                .default_open(true)
                .show(ui, |ui| render_table(ui, group_index, table, &group.rows, grid));
        });
    }
    export_clicked
}

fn render_table(
    ui: &mut egui::Ui,
    salt: usize,
    table: &ResultTable,
    rows: &[usize],
    grid: &mut GridViewState,
) {
    let mut sort_clicked = None;
    let mut toggled = None;
    ui.push_id(("results_table", salt), |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .column(Column::exact(24.0))
            .column(Column::initial(300.0).at_least(120.0).clip(true))
            .column(Column::initial(220.0).at_least(80.0).clip(true))
            .column(Column::remainder().at_least(80.0))
            .header(ROW_HEIGHT, |mut header| {
                header.col(|_| {});
                for column in ResultColumn::ALL {
                    header.col(|ui| {
                        let arrow = match grid.sort {
                            Some((sorted, direction)) if sorted == column => direction.arrow(),
                            _ => "",
                        };
                        if ui
                            .button(format!("{} {arrow}", column.header()))
                            .clicked()
                        {
                            sort_clicked = Some(column);
                        }
                    });
                }
            })
            .body(|mut body| {
                for &index in rows {
                    let Some(row) = table.rows().get(index) else {
                        continue;
                    };
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            let mut checked = grid.selected.contains(&index);
                            if ui.checkbox(&mut checked, "").changed() {
                                toggled = Some(index);
                            }
                        });
                        for column in ResultColumn::ALL {
                            table_row.col(|ui| {
                                ui.label(row.cell(column)).on_hover_text(row.cell(column));
                            });
                        }
                    });
                }
            });
    });
    if let Some(column) = sort_clicked {
        grid.cycle_sort(column);
    }
    if let Some(index) = toggled {
        grid.toggle_selected(index);
    }
}
