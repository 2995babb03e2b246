use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Month bucket – calendar-month grouping key
// ---------------------------------------------------------------------------

/// Truncate a date to its `"YYYY-MM"` month bucket.
///
/// All calendar-month grouping reads the value derived here at load time;
/// nothing downstream re-derives it, so every filtered subset sees the same
/// bucket for the same order.
pub fn month_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

// ---------------------------------------------------------------------------
// OrderRecord – one row of the orders table
// ---------------------------------------------------------------------------

/// A single order (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    /// Year-month bucket (`"2016-11"`), derived from `order_date` at load time.
    pub month: String,
    pub segment: String,
    pub category: String,
    pub sub_category: String,
    pub customer_id: String,
    pub customer_name: String,
    pub ship_mode: String,
    pub sales: f64,
    pub profit: f64,
}

impl OrderRecord {
    /// Build a record from parsed fields, deriving the month bucket.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_date: NaiveDate,
        segment: String,
        category: String,
        sub_category: String,
        customer_id: String,
        customer_name: String,
        ship_mode: String,
        sales: f64,
        profit: f64,
    ) -> Self {
        OrderRecord {
            month: month_bucket(order_date),
            order_date,
            segment,
            category,
            sub_category,
            customer_id,
            customer_name,
            ship_mode,
            sales,
            profit,
        }
    }

    /// Calendar year of the order date (the third filter dimension).
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }
}

// ---------------------------------------------------------------------------
// OrdersDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table plus the pre-computed unique values that seed the
/// three filter widgets. Loaded once per process and never mutated; every
/// downstream view is a projection of `orders` by row index.
#[derive(Debug, Clone)]
pub struct OrdersDataset {
    /// All orders (rows), in file order.
    pub orders: Vec<OrderRecord>,
    /// Sorted unique segment values.
    pub segments: BTreeSet<String>,
    /// Sorted unique category values.
    pub categories: BTreeSet<String>,
    /// Sorted unique order-date years.
    pub years: BTreeSet<i32>,
}

impl OrdersDataset {
    /// Build the filter-value index from the loaded orders.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        let mut segments = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut years = BTreeSet::new();

        for order in &orders {
            segments.insert(order.segment.clone());
            categories.insert(order.category.clone());
            years.insert(order.year());
        }

        OrdersDataset {
            orders,
            segments,
            categories,
            years,
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
