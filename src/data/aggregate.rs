use std::collections::{BTreeMap, BTreeSet};

use super::model::OrdersDataset;

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// The three scalar summary metrics shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Count of distinct customer IDs (not names) among the visible orders.
    pub unique_customers: usize,
}

impl Kpis {
    pub fn compute(dataset: &OrdersDataset, indices: &[usize]) -> Self {
        let mut total_sales = 0.0;
        let mut total_profit = 0.0;
        let mut customers: BTreeSet<&str> = BTreeSet::new();

        for &i in indices {
            let order = &dataset.orders[i];
            total_sales += order.sales;
            total_profit += order.profit;
            customers.insert(order.customer_id.as_str());
        }

        Kpis {
            total_sales,
            total_profit,
            unique_customers: customers.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hypothesis 1 – sales concentration by subcategory
// ---------------------------------------------------------------------------

/// One row of the sales-by-subcategory view.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryRow {
    pub sub_category: String,
    pub sales: f64,
    /// Share of the grand total in percent; all rows sum to 100 modulo
    /// float rounding.
    pub pct_of_total: f64,
}

/// Sales per subcategory, sorted ascending so the weakest sellers lead.
#[derive(Debug, Clone, Default)]
pub struct SubcategorySales {
    pub rows: Vec<SubcategoryRow>,
}

impl SubcategorySales {
    pub fn compute(dataset: &OrdersDataset, indices: &[usize]) -> Self {
        let mut by_subcategory: BTreeMap<&str, f64> = BTreeMap::new();
        for &i in indices {
            let order = &dataset.orders[i];
            *by_subcategory.entry(order.sub_category.as_str()).or_insert(0.0) += order.sales;
        }

        let grand_total: f64 = by_subcategory.values().sum();
        let mut rows: Vec<SubcategoryRow> = by_subcategory
            .into_iter()
            .map(|(sub_category, sales)| SubcategoryRow {
                sub_category: sub_category.to_string(),
                sales,
                pct_of_total: if grand_total == 0.0 {
                    0.0
                } else {
                    100.0 * sales / grand_total
                },
            })
            .collect();

        // Ascending by summed sales; name breaks ties so the order is stable.
        rows.sort_by(|a, b| {
            a.sales
                .total_cmp(&b.sales)
                .then_with(|| a.sub_category.cmp(&b.sub_category))
        });

        SubcategorySales { rows }
    }
}

// ---------------------------------------------------------------------------
// Hypothesis 2 – repeat-customer monthly activity
// ---------------------------------------------------------------------------

/// Distinct active-month count for one customer ("Meses activos").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerMonths {
    pub customer: String,
    pub active_months: usize,
}

/// Customer x month sales matrix for the heatmap.
///
/// `cells[r][c]` is the summed sales of `customers[r]` in `months[c]`,
/// 0.0 for months the customer was inactive. Both axes are sorted
/// ascending; for `"YYYY-MM"` buckets that is chronological order.
#[derive(Debug, Clone, Default)]
pub struct ActivityMatrix {
    pub customers: Vec<String>,
    pub months: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl ActivityMatrix {
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() || self.months.is_empty()
    }

    /// Largest cell value, used to normalize the heatmap colour ramp.
    pub fn max_cell(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f64, f64::max)
    }
}

/// The repeat-customer view: which customers buy month after month.
#[derive(Debug, Clone, Default)]
pub struct CustomerActivity {
    /// Customers ranked by distinct active months, descending, top 10.
    pub top_customers: Vec<CustomerMonths>,
    pub matrix: ActivityMatrix,
}

impl CustomerActivity {
    pub const TOP_N: usize = 10;

    pub fn compute(dataset: &OrdersDataset, indices: &[usize]) -> Self {
        // customer name → month bucket → summed sales
        let mut by_customer: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
        let mut months: BTreeSet<&str> = BTreeSet::new();

        for &i in indices {
            let order = &dataset.orders[i];
            *by_customer
                .entry(order.customer_name.as_str())
                .or_default()
                .entry(order.month.as_str())
                .or_insert(0.0) += order.sales;
            months.insert(order.month.as_str());
        }

        let mut top_customers: Vec<CustomerMonths> = by_customer
            .iter()
            .map(|(customer, per_month)| CustomerMonths {
                customer: customer.to_string(),
                active_months: per_month.len(),
            })
            .collect();
        top_customers.sort_by(|a, b| {
            b.active_months
                .cmp(&a.active_months)
                .then_with(|| a.customer.cmp(&b.customer))
        });
        top_customers.truncate(Self::TOP_N);

        let month_list: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        let customers: Vec<String> = by_customer.keys().map(|c| c.to_string()).collect();
        let cells: Vec<Vec<f64>> = by_customer
            .values()
            .map(|per_month| {
                months
                    .iter()
                    .map(|m| per_month.get(m).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        CustomerActivity {
            top_customers,
            matrix: ActivityMatrix {
                customers,
                months: month_list,
                cells,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Hypothesis 3 – ship-mode preference by segment
// ---------------------------------------------------------------------------

/// One cell of the segment x ship-mode contingency table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipModeRow {
    pub segment: String,
    pub ship_mode: String,
    pub sales: f64,
}

/// Summed sales per observed (segment, ship mode) pair, sorted by both keys.
#[derive(Debug, Clone, Default)]
pub struct ShipModeBySegment {
    pub rows: Vec<ShipModeRow>,
}

impl ShipModeBySegment {
    pub fn compute(dataset: &OrdersDataset, indices: &[usize]) -> Self {
        let mut by_pair: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for &i in indices {
            let order = &dataset.orders[i];
            *by_pair
                .entry((order.segment.as_str(), order.ship_mode.as_str()))
                .or_insert(0.0) += order.sales;
        }

        let rows = by_pair
            .into_iter()
            .map(|((segment, ship_mode), sales)| ShipModeRow {
                segment: segment.to_string(),
                ship_mode: ship_mode.to_string(),
                sales,
            })
            .collect();

        ShipModeBySegment { rows }
    }

    /// Distinct segments in display order (the bar-chart clusters).
    pub fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = Vec::new();
        for row in &self.rows {
            if segments.last() != Some(&row.segment.as_str()) {
                segments.push(&row.segment);
            }
        }
        segments
    }

    /// Distinct ship modes, sorted (the bar-chart series / legend order).
    pub fn ship_modes(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.ship_mode.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// DashboardData – everything the chart layer renders
// ---------------------------------------------------------------------------

/// All derived views over the current filtered projection. Recomputed from
/// scratch on every filter change; nothing here is updated incrementally.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub subcategory_sales: SubcategorySales,
    pub customer_activity: CustomerActivity,
    pub ship_modes: ShipModeBySegment,
}

impl DashboardData {
    pub fn compute(dataset: &OrdersDataset, indices: &[usize]) -> Self {
        DashboardData {
            kpis: Kpis::compute(dataset, indices),
            subcategory_sales: SubcategorySales::compute(dataset, indices),
            customer_activity: CustomerActivity::compute(dataset, indices),
            ship_modes: ShipModeBySegment::compute(dataset, indices),
        }
    }
}
