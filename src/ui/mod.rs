/// Widget layer: the filter panels and the dashboard charts.

pub mod charts;
pub mod panels;
