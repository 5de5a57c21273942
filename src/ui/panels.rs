use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::slot_color32;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::pipeline::PlotMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset list
// ---------------------------------------------------------------------------

/// Render the checkable dataset list.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Datasets");
    ui.separator();

    if state.registry.is_empty() {
        ui.label("No datasets loaded.");
        return;
    }

    let n_slots = state.registry.len();
    let names: Vec<String> = state.registry.names().map(str::to_string).collect();
    let mut toggled: Option<(String, bool)> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (slot, name) in names.iter().enumerate() {
                let mut checked = state.selection.contains(name);
                let text = RichText::new(name).color(slot_color32(slot, n_slots, false));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some((name.clone(), checked));
                }
            }
        });

    // Apply after the loop so the list is not borrowed while recomputing.
    if let Some((name, checked)) = toggled {
        state.toggle(&name, checked);
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – statistics table
// ---------------------------------------------------------------------------

/// Render the statistics table of the current view.
pub fn stats_table(ui: &mut Ui, state: &AppState) {
    ui.strong("Dataset Statistics");

    let rows = state.view.as_ref().map(|v| v.stats.as_slice()).unwrap_or(&[]);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::remainder(), 3)
        .header(20.0, |mut header| {
            for title in ["Dataset", "Mean", "Median", "Std Dev"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    for cell in row.cells() {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Load files…").clicked() {
                ui.close_menu();
                open_files_dialog(state);
            }
            if ui
                .add_enabled(!state.registry.is_empty(), egui::Button::new("Save report…"))
                .clicked()
            {
                ui.close_menu();
                save_report_dialog(state);
            }
        });

        ui.separator();

        let mut mode = state.mode;
        egui::ComboBox::from_id_salt("plot_mode")
            .selected_text(mode.label())
            .show_ui(ui, |ui: &mut Ui| {
                for m in PlotMode::ALL {
                    ui.selectable_value(&mut mode, m, m.label());
                }
            });
        if mode != state.mode {
            state.set_mode(mode);
        }

        ui.separator();

        ui.label(format!(
            "{} datasets loaded, {} selected",
            state.registry.len(),
            state.selection.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open data files")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("NumPy", &["npy"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_files();

    if let Some(paths) = files {
        load_paths(state, &paths);
    }
}

/// Load `paths` and warn about every file that failed.
pub fn load_paths(state: &mut AppState, paths: &[PathBuf]) {
    let failed = state.load_files(paths);
    if !failed.is_empty() {
        let details: Vec<String> = failed.iter().map(|e| e.to_string()).collect();
        warn_dialog("Could not load files", &details.join("\n"));
    }
}

pub fn save_report_dialog(state: &mut AppState) {
    let dest = rfd::FileDialog::new()
        .set_title("Save report")
        .add_filter("PDF", &["pdf"])
        .set_file_name("analysis_report.pdf")
        .save_file();

    let Some(dest) = dest else {
        return;
    };
    if let Err(e) = state.export_report(&dest) {
        warn_dialog("Report export failed", &e.to_string());
    }
}

/// Blocking warning message box.
pub fn warn_dialog(title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
