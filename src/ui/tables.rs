use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::render::summary::SummaryTable;
use crate::render::table::{DataTableView, SortDirection, cell_text};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table card
// ---------------------------------------------------------------------------

/// Paged, sortable table of the filtered rows. Clicking a header sorts.
pub fn data_table(ui: &mut Ui, view: &mut DataTableView) {
    if view.is_empty() {
        ui.weak("No rows match the current selection.");
    }

    let mut sort_clicked: Option<usize> = None;
    let footer_height = ui.spacing().interact_size.y + 8.0;

    ui.push_id("data_table", |ui: &mut Ui| {
        let max_height = (ui.available_height() - footer_height).max(ROW_HEIGHT);
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(60.0), view.columns().len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for (i, name) in view.columns().iter().enumerate() {
                    header.col(|ui| {
                        let arrow = match view.sort() {
                            Some(s) if s.column == i => match s.direction {
                                SortDirection::Ascending => " ⏶",
                                SortDirection::Descending => " ⏷",
                            },
                            _ => "",
                        };
                        if ui.button(format!("{name}{arrow}")).clicked() {
                            sort_clicked = Some(i);
                        }
                    });
                }
            })
            .body(|mut body| {
                for record in view.page_rows() {
                    body.row(ROW_HEIGHT, |mut row| {
                        for column in 0..view.columns().len() {
                            row.col(|ui| {
                                ui.label(cell_text(record, column));
                            });
                        }
                    });
                }
            });
    });

    if let Some(column) = sort_clicked {
        view.toggle_sort(column);
    }

    // ---- Paging footer ----
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(view.page() > 0, egui::Button::new("◀"))
            .clicked()
        {
            view.prev_page();
        }
        let status = match view.page_range() {
            Some((first, last)) => format!("Rows {first}–{last} of {}", view.len()),
            None => "No rows".to_string(),
        };
        ui.label(status);
        if ui
            .add_enabled(view.page() + 1 < view.page_count(), egui::Button::new("▶"))
            .clicked()
        {
            view.next_page();
        }
    });
}

// ---------------------------------------------------------------------------
// Summary statistics card
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, summary: &SummaryTable) {
    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), summary.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in &summary.columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row_idx in 0..summary.rows.len() {
                    body.row(ROW_HEIGHT, |mut row| {
                        for column in 0..summary.columns.len() {
                            row.col(|ui| {
                                ui.label(summary.cell_text(row_idx, column));
                            });
                        }
                    });
                }
            });
    });
}
