use std::sync::Arc;

use eframe::egui::TextureHandle;

use crate::data::aggregate::DashboardData;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::OrdersDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded before the interactive loop starts and never
/// changes; everything else is derived from the current filter selection by
/// [`AppState::refilter`].
pub struct AppState {
    /// Read-only handle to the table loaded at startup.
    pub dataset: Arc<OrdersDataset>,

    /// Display name of the source file (shown in the top bar).
    pub source: String,

    /// Current multiselect state for the three filter dimensions.
    pub selection: FilterSelection,

    /// Indices of orders passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Aggregated views over `visible` (cached, rebuilt by `refilter`).
    pub dashboard: DashboardData,

    /// GPU texture of the customer-activity heatmap. Rebuilt lazily by the
    /// chart layer whenever `heatmap_stale` is set.
    pub heatmap_texture: Option<TextureHandle>,
    pub heatmap_stale: bool,
}

impl AppState {
    /// Start with every observed value selected, so the first render shows
    /// the whole table.
    pub fn new(dataset: Arc<OrdersDataset>, source: impl Into<String>) -> Self {
        let selection = FilterSelection::all(&dataset);
        let visible = filtered_indices(&dataset, &selection);
        let dashboard = DashboardData::compute(&dataset, &visible);

        AppState {
            dataset,
            source: source.into(),
            selection,
            visible,
            dashboard,
            heatmap_texture: None,
            heatmap_stale: true,
        }
    }

    /// One synchronous filter → aggregate pass. Every widget mutation of the
    /// selection funnels through here; nothing is updated incrementally.
    pub fn refilter(&mut self) {
        self.visible = filtered_indices(&self.dataset, &self.selection);
        self.dashboard = DashboardData::compute(&self.dataset, &self.visible);
        self.heatmap_stale = true;
    }
}
