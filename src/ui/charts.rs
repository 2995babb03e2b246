use std::collections::BTreeMap;

use eframe::egui::{
    self, Align2, Color32, ColorImage, RichText, ScrollArea, Stroke, TextureHandle,
    TextureOptions, Ui, Vec2,
};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotImage, PlotPoint, Text};

use crate::color;
use crate::data::aggregate::{ActivityMatrix, CustomerActivity, Kpis, ShipModeBySegment, SubcategorySales};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – KPI row and the three hypothesis sections
// ---------------------------------------------------------------------------

/// Render the dashboard body for the current filter selection.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add_space(4.0);
            kpi_row(ui, &state.dashboard.kpis);
            ui.add_space(16.0);

            section_heading(
                ui,
                "Hipótesis 1: Algunas subcategorías jamás venden lo suficiente",
            );
            subcategory_section(ui, &state.dashboard.subcategory_sales);
            ui.add_space(16.0);

            section_heading(
                ui,
                "Hipótesis 2: Ciertos clientes son los que siempre compran mes a mes",
            );
            activity_section(ui, state);
            ui.add_space(16.0);

            section_heading(
                ui,
                "Hipótesis 3: Un Ship Mode siempre es preferido por algún segmento",
            );
            ship_mode_section(ui, &state.dashboard.ship_modes);
            ui.add_space(24.0);
        });
}

fn section_heading(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(format!("🧪 {title}")).color(color::TEXT));
    ui.separator();
}

fn empty_note(ui: &mut Ui) {
    ui.label(RichText::new("Sin datos para los filtros seleccionados.").italics());
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "🛒 Ventas totales",
            format!("${}", format_thousands(kpis.total_sales)),
        );
        metric_card(
            &mut cols[1],
            "💰 Ganancia neta",
            format!("${}", format_thousands(kpis.total_profit)),
        );
        metric_card(
            &mut cols[2],
            "👥 Clientes únicos",
            kpis.unique_customers.to_string(),
        );
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style())
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, color::PRIMARY))
        .inner_margin(12)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(label);
                ui.label(RichText::new(value).size(26.0).strong().color(color::TEXT));
            });
        });
}

// ---------------------------------------------------------------------------
// Hypothesis 1 – subcategory sales, ascending
// ---------------------------------------------------------------------------

fn subcategory_section(ui: &mut Ui, view: &SubcategorySales) {
    if view.rows.is_empty() {
        empty_note(ui);
        return;
    }
    ui.columns(2, |cols: &mut [Ui]| {
        subcategory_chart(&mut cols[0], view);
        subcategory_table(&mut cols[1], view);
    });
}

fn subcategory_chart(ui: &mut Ui, view: &SubcategorySales) {
    ui.strong("Ventas por subcategoría (ascendente)");

    let labels: Vec<String> = view.rows.iter().map(|r| r.sub_category.clone()).collect();
    let bars: Vec<Bar> = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| Bar::new(i as f64, row.sales).name(&row.sub_category).width(0.6))
        .collect();

    // Rows are sorted ascending, so the last one carries the maximum.
    let max_sales = view.rows.last().map(|r| r.sales).unwrap_or(0.0);
    let value_labels: Vec<(PlotPoint, String)> = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            (
                PlotPoint::new(row.sales + max_sales * 0.01, i as f64),
                format_si(row.sales),
            )
        })
        .collect();

    Plot::new("subcategory_sales")
        .height(420.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_scroll(false)
        .include_x(max_sales * 1.18)
        .x_axis_label("Ventas")
        .y_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color::PRIMARY).horizontal());
            for (point, text) in value_labels {
                plot_ui.text(
                    Text::new(point, RichText::new(text).size(12.0))
                        .anchor(Align2::LEFT_CENTER)
                        .color(color::TEXT),
                );
            }
        });
}

fn subcategory_table(ui: &mut Ui, view: &SubcategorySales) {
    ui.strong("Detalle por subcategoría");
    ui.push_id("subcategory_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder())
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(90.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Subcategoría");
                });
                header.col(|ui| {
                    ui.strong("Ventas totales");
                });
                header.col(|ui| {
                    ui.strong("% del total");
                });
            })
            .body(|body| {
                let rows = &view.rows;
                body.rows(18.0, rows.len(), |mut row| {
                    let item = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(&item.sub_category);
                    });
                    row.col(|ui| {
                        ui.label(format!("${}", format_thousands(item.sales)));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2} %", item.pct_of_total));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Hypothesis 2 – customer monthly activity
// ---------------------------------------------------------------------------

fn activity_section(ui: &mut Ui, state: &mut AppState) {
    if state.dashboard.customer_activity.matrix.is_empty() {
        empty_note(ui);
        return;
    }

    // The raster only changes when the selection does, so it is rebuilt on
    // demand and kept as a texture between frames.
    if state.heatmap_stale || state.heatmap_texture.is_none() {
        let image = heatmap_image(&state.dashboard.customer_activity.matrix);
        state.heatmap_texture = Some(ui.ctx().load_texture(
            "customer_heatmap",
            image,
            TextureOptions::NEAREST,
        ));
        state.heatmap_stale = false;
    }

    ui.strong("Actividad mensual por cliente");
    if let Some(texture) = &state.heatmap_texture {
        heatmap_plot(ui, &state.dashboard.customer_activity.matrix, texture);
    }
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        top_customers_chart(&mut cols[0], &state.dashboard.customer_activity);
        top_customers_table(&mut cols[1], &state.dashboard.customer_activity);
    });
}

/// Rasterize the activity matrix, one pixel per (customer, month) cell with
/// the first customer on the top row.
fn heatmap_image(matrix: &ActivityMatrix) -> ColorImage {
    let width = matrix.months.len();
    let height = matrix.customers.len();
    let max = matrix.max_cell();

    let mut image = ColorImage::new([width, height], Color32::WHITE);
    if max <= 0.0 {
        return image;
    }
    for (row, cells) in matrix.cells.iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            image[(col, row)] = color::heatmap_color((value / max) as f32);
        }
    }
    image
}

fn heatmap_plot(ui: &mut Ui, matrix: &ActivityMatrix, texture: &TextureHandle) {
    let width = matrix.months.len() as f64;
    let height = matrix.customers.len() as f64;

    let months = matrix.months.clone();
    let customers = matrix.customers.clone();
    let n_customers = matrix.customers.len();
    let hover = matrix.clone();

    Plot::new("customer_heatmap")
        .height(420.0)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_boxed_zoom(true)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| index_label(&months, mark.value))
        .y_axis_formatter(move |mark, _range| {
            // Plot rows grow upwards while the raster grows downwards.
            index_label(&customers, (n_customers as f64 - 1.0) - mark.value)
        })
        .label_formatter(move |_name, point| cell_label(&hover, point))
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture.id(),
                PlotPoint::new((width - 1.0) / 2.0, (height - 1.0) / 2.0),
                Vec2::new(width as f32, height as f32),
            ));
        });
}

/// Hover text for the activity heatmap: customer, month and sales.
fn cell_label(matrix: &ActivityMatrix, point: &PlotPoint) -> String {
    let col = point.x.round();
    let row = (matrix.customers.len() as f64 - 1.0) - point.y.round();
    if col < 0.0 || row < 0.0 {
        return String::new();
    }
    let (col, row) = (col as usize, row as usize);
    if col >= matrix.months.len() || row >= matrix.customers.len() {
        return String::new();
    }
    format!(
        "{}\n{}\n${}",
        matrix.customers[row],
        matrix.months[col],
        format_thousands(matrix.cells[row][col])
    )
}

fn top_customers_chart(ui: &mut Ui, activity: &CustomerActivity) {
    ui.strong("Top 10 clientes frecuentes");

    let n = activity.top_customers.len();
    // Rank 1 on the top row, so bar i sits at y = n - 1 - i.
    let labels: Vec<String> = activity
        .top_customers
        .iter()
        .rev()
        .map(|c| c.customer.clone())
        .collect();
    let bars: Vec<Bar> = activity
        .top_customers
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new((n - 1 - i) as f64, c.active_months as f64)
                .name(&c.customer)
                .width(0.6)
        })
        .collect();

    let max_months = activity
        .top_customers
        .first()
        .map(|c| c.active_months as f64)
        .unwrap_or(0.0);

    Plot::new("top_customers")
        .height(320.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_scroll(false)
        .include_x(max_months * 1.2 + 1.0)
        .x_axis_label("Meses activos")
        .y_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color::TERTIARY).horizontal());
            for (i, c) in activity.top_customers.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(c.active_months as f64 + 0.15, (n - 1 - i) as f64),
                        RichText::new(c.active_months.to_string()).size(12.0),
                    )
                    .anchor(Align2::LEFT_CENTER)
                    .color(color::TEXT),
                );
            }
        });
}

fn top_customers_table(ui: &mut Ui, activity: &CustomerActivity) {
    ui.strong("Detalle de actividad");
    ui.push_id("top_customers_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder())
            .column(Column::auto().at_least(110.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Cliente");
                });
                header.col(|ui| {
                    ui.strong("Meses activos");
                });
            })
            .body(|body| {
                let rows = &activity.top_customers;
                body.rows(18.0, rows.len(), |mut row| {
                    let item = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(&item.customer);
                    });
                    row.col(|ui| {
                        ui.label(item.active_months.to_string());
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Hypothesis 3 – ship mode by segment
// ---------------------------------------------------------------------------

fn ship_mode_section(ui: &mut Ui, view: &ShipModeBySegment) {
    if view.rows.is_empty() {
        empty_note(ui);
        return;
    }
    ui.strong("Ventas por segmento y modo de envío");

    let segments: Vec<String> = view.segments().iter().map(|s| s.to_string()).collect();
    let modes: Vec<String> = view.ship_modes().iter().map(|s| s.to_string()).collect();
    let colors = color::series_colors(modes.len());

    let lookup: BTreeMap<(&str, &str), f64> = view
        .rows
        .iter()
        .map(|r| ((r.segment.as_str(), r.ship_mode.as_str()), r.sales))
        .collect();

    // Clustered layout: each segment owns one unit of the x axis, split
    // evenly between the ship modes observed in the projection.
    let group_width = 0.8;
    let bar_width = group_width / modes.len() as f64;
    let mut max_sales = 0.0_f64;

    let mut charts: Vec<BarChart> = Vec::with_capacity(modes.len());
    let mut value_labels: Vec<(PlotPoint, String)> = Vec::new();
    for (m, mode) in modes.iter().enumerate() {
        let mut bars = Vec::new();
        for (s, segment) in segments.iter().enumerate() {
            let Some(&sales) = lookup.get(&(segment.as_str(), mode.as_str())) else {
                continue;
            };
            let x = s as f64 - group_width / 2.0 + bar_width * (m as f64 + 0.5);
            bars.push(
                Bar::new(x, sales)
                    .width(bar_width * 0.9)
                    .name(format!("{segment} · {mode}")),
            );
            value_labels.push((PlotPoint::new(x, sales), format_si(sales)));
            max_sales = max_sales.max(sales);
        }
        charts.push(BarChart::new(bars).name(mode).color(colors[m]));
    }

    let seg_labels = segments.clone();
    Plot::new("ship_mode_by_segment")
        .height(360.0)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_scroll(false)
        .include_y(max_sales * 1.15)
        .x_axis_label("Segmento")
        .y_axis_label("Ventas")
        .x_axis_formatter(move |mark, _range| index_label(&seg_labels, mark.value))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            for (point, text) in value_labels {
                plot_ui.text(
                    Text::new(point, RichText::new(text).size(11.0))
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(color::TEXT),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Label helpers
// ---------------------------------------------------------------------------

/// Axis tick text for categorical axes: the label at a whole index, nothing
/// in between.
fn index_label(labels: &[String], value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 0.01 || nearest < 0.0 {
        return String::new();
    }
    match labels.get(nearest as usize) {
        Some(label) => label.clone(),
        None => String::new(),
    }
}

/// `1234567.8` becomes `"1,234,568"`, keeping the sign and rounding away
/// decimals.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as i64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Short SI notation for in-chart value labels: `262000.0` becomes `"262k"`.
pub fn format_si(value: f64) -> String {
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, "G")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "k")
    } else {
        return format!("{value:.0}");
    };

    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}
