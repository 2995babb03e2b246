use std::sync::Arc;

use eframe::egui;

use crate::color;
use crate::data::model::OrdersDataset;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SuperstoreApp {
    pub state: AppState,
}

impl SuperstoreApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        dataset: Arc<OrdersDataset>,
        source: String,
    ) -> Self {
        cc.egui_ctx.set_visuals(dashboard_visuals());
        Self {
            state: AppState::new(dataset, source),
        }
    }
}

/// Light theme tinted with the dashboard palette.
fn dashboard_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = color::BACKGROUND;
    visuals.window_fill = color::BACKGROUND;
    visuals.override_text_color = Some(color::TEXT);
    visuals
}

impl eframe::App for SuperstoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and dataset summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: multiselect filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs and hypothesis charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::central_panel(ui, &mut self.state);
        });
    }
}
