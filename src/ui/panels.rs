use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multiselect group per dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    // Clone the handle so the selection sets can be mutated while the
    // dataset's unique values are being iterated.
    let dataset = state.dataset.clone();
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_group(
                ui,
                "Segmento",
                &dataset.segments,
                &mut state.selection.segments,
            );
            changed |= filter_group(
                ui,
                "Categoría",
                &dataset.categories,
                &mut state.selection.categories,
            );
            changed |= filter_group(ui, "Años", &dataset.years, &mut state.selection.years);
        });

    // One recompute per frame at most, and only when a widget reported a
    // change.
    if changed {
        state.refilter();
    }
}

/// One collapsible multiselect: All/None buttons plus a checkbox per value.
///
/// Returns `true` if `selected` was modified this frame.
fn filter_group<T: Ord + Clone + Display>(
    ui: &mut Ui,
    label: &str,
    all_values: &BTreeSet<T>,
    selected: &mut BTreeSet<T>,
) -> bool {
    let mut changed = false;

    // Show count of selected / total in the header
    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Todos").clicked() {
                    *selected = all_values.clone();
                    changed = true;
                }
                if ui.small_button("Ninguno").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for value in all_values {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the dataset summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new("Análisis Superstore").strong());
        ui.separator();
        ui.label(format!(
            "{} pedidos cargados, {} visibles",
            state.dataset.len(),
            state.visible.len()
        ));
        ui.separator();
        ui.label(RichText::new(&state.source).italics());
    });
}
