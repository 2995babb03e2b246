use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{OrderRecord, OrdersDataset};

// ---------------------------------------------------------------------------
// Required columns (names as they appear in the Superstore export)
// ---------------------------------------------------------------------------

pub const COL_ORDER_DATE: &str = "Order Date";
pub const COL_SEGMENT: &str = "Segment";
pub const COL_CATEGORY: &str = "Category";
pub const COL_SUB_CATEGORY: &str = "Sub-Category";
pub const COL_CUSTOMER_ID: &str = "Customer ID";
pub const COL_CUSTOMER_NAME: &str = "Customer Name";
pub const COL_SHIP_MODE: &str = "Ship Mode";
pub const COL_SALES: &str = "Sales";
pub const COL_PROFIT: &str = "Profit";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A cell that could not be interpreted while loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataFormatError {
    #[error("column '{column}': '{value}' is not a number")]
    Number { column: String, value: String },
    #[error("column 'Order Date': '{value}' is not a recognized date")]
    Date { value: String },
    #[error("column '{column}' is null")]
    Missing { column: String },
    #[error("column '{column}': unsupported type {found}")]
    Type { column: String, found: String },
}

/// Why the orders table could not be loaded.
///
/// Any of these is fatal to startup; the dashboard never renders over
/// partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("{0}")]
    Malformed(String),
    #[error("row {row}: {source}")]
    Format {
        row: usize,
        #[source]
        source: DataFormatError,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the orders table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`             – the canonical Superstore export (Windows-1252)
/// * `.json`            – records-oriented array, UTF-8
/// * `.parquet` / `.pq` – flat scalar columns
pub fn load_file(path: &Path) -> Result<OrdersDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

static DATASET: OnceCell<Arc<OrdersDataset>> = OnceCell::new();

/// Load the orders table exactly once per process.
///
/// The first call reads and parses `path`; every later call returns the same
/// in-memory table without touching the filesystem again. There is no
/// invalidation: the source file is assumed immutable for the process
/// lifetime. A failed first load is not cached, but callers treat it as
/// fatal anyway.
pub fn load_cached(path: &Path) -> Result<Arc<OrdersDataset>, LoadError> {
    DATASET
        .get_or_try_init(|| load_file(path).map(Arc::new))
        .map(Arc::clone)
}

// ---------------------------------------------------------------------------
// Shared field parsing
// ---------------------------------------------------------------------------

/// Single date parser shared by the CSV, JSON and Parquet loaders. The
/// Superstore export writes dates month-first (`11/8/2016`); ISO dates
/// (`2016-11-08`) are accepted too, and ISO timestamps such as
/// `2016-11-08T00:00:00.000` (what `date_format="iso"` re-exports write)
/// are truncated to their calendar day.
fn parse_order_date(s: &str) -> Result<NaiveDate, DataFormatError> {
    let s = s.trim();
    let day = s.split_once('T').map_or(s, |(day, _)| day);
    for format in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(day, format) {
            return Ok(date);
        }
    }
    Err(DataFormatError::Date {
        value: s.to_string(),
    })
}

fn parse_number(column: &str, s: &str) -> Result<f64, DataFormatError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| DataFormatError::Number {
            column: column.to_string(),
            value: s.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns within one file's header row.
struct ColumnIndex {
    order_date: usize,
    segment: usize,
    category: usize,
    sub_category: usize,
    customer_id: usize,
    customer_name: usize,
    ship_mode: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            order_date: find(COL_ORDER_DATE)?,
            segment: find(COL_SEGMENT)?,
            category: find(COL_CATEGORY)?,
            sub_category: find(COL_SUB_CATEGORY)?,
            customer_id: find(COL_CUSTOMER_ID)?,
            customer_name: find(COL_CUSTOMER_NAME)?,
            ship_mode: find(COL_SHIP_MODE)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
        })
    }
}

/// The canonical `Sample - Superstore.csv` is Windows-1252 (commonly
/// labelled ISO-8859-1). The decode is total: every byte maps to a char, so
/// plain ASCII files pass through unchanged.
fn decode_windows_1252(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// CSV layout: header row with at least the nine required columns (extra
/// columns are ignored).
fn load_csv(path: &Path) -> Result<OrdersDataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_windows_1252(&bytes);

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(format!("reading CSV headers: {e}")))?
        .clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut orders = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Malformed(format!("CSV row {row_no}: {e}")))?;
        orders.push(parse_csv_row(&record, &columns, row_no)?);
    }

    Ok(OrdersDataset::from_orders(orders))
}

fn parse_csv_row(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    row_no: usize,
) -> Result<OrderRecord, LoadError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();

    let order_date = parse_order_date(record.get(columns.order_date).unwrap_or(""))
        .map_err(|source| LoadError::Format { row: row_no, source })?;
    let sales = parse_number(COL_SALES, record.get(columns.sales).unwrap_or(""))
        .map_err(|source| LoadError::Format { row: row_no, source })?;
    let profit = parse_number(COL_PROFIT, record.get(columns.profit).unwrap_or(""))
        .map_err(|source| LoadError::Format { row: row_no, source })?;

    Ok(OrderRecord::new(
        order_date,
        cell(columns.segment),
        cell(columns.category),
        cell(columns.sub_category),
        cell(columns.customer_id),
        cell(columns.customer_name),
        cell(columns.ship_mode),
        sales,
        profit,
    ))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the shape of
/// `df.to_json(orient="records", date_format="iso")` on the same table):
///
/// ```json
/// [
///   {
///     "Order Date": "2016-11-08T00:00:00.000",
///     "Segment": "Consumer",
///     "Category": "Furniture",
///     "Sub-Category": "Bookcases",
///     "Customer ID": "CG-12520",
///     "Customer Name": "Claire Gute",
///     "Ship Mode": "Second Class",
///     "Sales": 261.96,
///     "Profit": 41.9136
///   },
///   ...
/// ]
/// ```
///
/// `Order Date` strings go through `parse_order_date`, so date-only
/// exports load the same way.
#[derive(Debug, Deserialize)]
struct JsonOrder {
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Segment")]
    segment: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Ship Mode")]
    ship_mode: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

fn load_json(path: &Path) -> Result<OrdersDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<JsonOrder> = serde_json::from_str(&text)
        .map_err(|e| LoadError::Malformed(format!("parsing JSON: {e}")))?;

    let mut orders = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.into_iter().enumerate() {
        let order_date = parse_order_date(&row.order_date)
            .map_err(|source| LoadError::Format { row: row_no, source })?;
        orders.push(OrderRecord::new(
            order_date,
            row.segment,
            row.category,
            row.sub_category,
            row.customer_id,
            row.customer_name,
            row.ship_mode,
            row.sales,
            row.profit,
        ));
    }

    Ok(OrdersDataset::from_orders(orders))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load the orders table from a Parquet file with flat scalar columns.
///
/// `Order Date` may be a Date32 column or a string column fed through
/// `parse_order_date`; `Sales`/`Profit` may be any common float or integer
/// type. Works with files written by both Pandas (`df.to_parquet()`) and
/// Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<OrdersDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| LoadError::Malformed(format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| LoadError::Malformed(format!("building parquet reader: {e}")))?;

    let mut orders = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| LoadError::Malformed(format!("reading parquet record batch: {e}")))?;

        let order_date = column_at(&batch, COL_ORDER_DATE)?;
        let segment = column_at(&batch, COL_SEGMENT)?;
        let category = column_at(&batch, COL_CATEGORY)?;
        let sub_category = column_at(&batch, COL_SUB_CATEGORY)?;
        let customer_id = column_at(&batch, COL_CUSTOMER_ID)?;
        let customer_name = column_at(&batch, COL_CUSTOMER_NAME)?;
        let ship_mode = column_at(&batch, COL_SHIP_MODE)?;
        let sales = column_at(&batch, COL_SALES)?;
        let profit = column_at(&batch, COL_PROFIT)?;

        for row in 0..batch.num_rows() {
            let row_no = row_base + row;
            let fail = |source| LoadError::Format { row: row_no, source };

            orders.push(OrderRecord::new(
                date_at(order_date, row).map_err(fail)?,
                string_at(segment, row, COL_SEGMENT).map_err(fail)?,
                string_at(category, row, COL_CATEGORY).map_err(fail)?,
                string_at(sub_category, row, COL_SUB_CATEGORY).map_err(fail)?,
                string_at(customer_id, row, COL_CUSTOMER_ID).map_err(fail)?,
                string_at(customer_name, row, COL_CUSTOMER_NAME).map_err(fail)?,
                string_at(ship_mode, row, COL_SHIP_MODE).map_err(fail)?,
                numeric_at(sales, row, COL_SALES).map_err(fail)?,
                numeric_at(profit, row, COL_PROFIT).map_err(fail)?,
            ));
        }
        row_base += batch.num_rows();
    }

    Ok(OrdersDataset::from_orders(orders))
}

// -- Arrow column helpers --

fn column_at<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn string_at(col: &ArrayRef, row: usize, column: &str) -> Result<String, DataFormatError> {
    if col.is_null(row) {
        return Err(DataFormatError::Missing {
            column: column.to_string(),
        });
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(DataFormatError::Type {
            column: column.to_string(),
            found: format!("{other:?}"),
        }),
    }
}

/// Extract a numeric cell, tolerating the float/int widths Pandas and Polars
/// write for currency columns.
fn numeric_at(col: &ArrayRef, row: usize, column: &str) -> Result<f64, DataFormatError> {
    if col.is_null(row) {
        return Err(DataFormatError::Missing {
            column: column.to_string(),
        });
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64),
        _ => None,
    };
    value.ok_or_else(|| DataFormatError::Type {
        column: column.to_string(),
        found: format!("{:?}", col.data_type()),
    })
}

/// Extract the order date from a Date32 or string column.
fn date_at(col: &ArrayRef, row: usize) -> Result<NaiveDate, DataFormatError> {
    if col.is_null(row) {
        return Err(DataFormatError::Missing {
            column: COL_ORDER_DATE.to_string(),
        });
    }
    match col.data_type() {
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .ok_or_else(|| DataFormatError::Type {
                    column: COL_ORDER_DATE.to_string(),
                    found: "Date32".to_string(),
                })?;
            arr.value_as_date(row).ok_or_else(|| DataFormatError::Date {
                value: arr.value(row).to_string(),
            })
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            parse_order_date(&string_at(col, row, COL_ORDER_DATE)?)
        }
        other => Err(DataFormatError::Type {
            column: COL_ORDER_DATE.to_string(),
            found: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use std::fs;

    const SAMPLE_CSV: &str = "\
Row ID,Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales,Profit
1,11/8/2016,Consumer,Furniture,Bookcases,CG-12520,Claire Gute,Second Class,261.96,41.9136
2,11/8/2016,Consumer,Furniture,Chairs,CG-12520,Claire Gute,Second Class,731.94,219.582
3,6/12/2016,Corporate,Office Supplies,Labels,DV-13045,Darrin Van Huff,Second Class,14.62,6.8714
";

    #[test]
    fn csv_happy_path_derives_months_and_index() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(&path, SAMPLE_CSV)?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.len(), 3);

        let first = &dataset.orders[0];
        assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
        assert_eq!(first.month, "2016-11");
        assert_eq!(first.segment, "Consumer");
        assert_eq!(first.sub_category, "Bookcases");
        assert_eq!(first.customer_id, "CG-12520");
        assert_eq!(first.sales, 261.96);

        assert_eq!(dataset.orders[2].month, "2016-06");
        assert_eq!(
            dataset.segments.iter().collect::<Vec<_>>(),
            ["Consumer", "Corporate"]
        );
        assert_eq!(dataset.years.iter().collect::<Vec<_>>(), [&2016]);
        Ok(())
    }

    #[test]
    fn csv_accepts_iso_dates() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales,Profit\n\
             2015-03-07,Consumer,Technology,Phones,A-1,Ana,Same Day,99.5,9.5\n",
        )?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.orders[0].month, "2015-03");
        Ok(())
    }

    #[test]
    fn csv_decodes_windows_1252_names() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        // "Muñoz" with ñ as the single Windows-1252 byte 0xF1.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(
            b"Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales,Profit\n",
        );
        bytes.extend_from_slice(b"1/3/2015,Consumer,Furniture,Tables,JM-1,Jos\xe9 Mu\xf1oz,First Class,50.0,5.0\n");
        fs::write(&path, &bytes)?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.orders[0].customer_name, "José Muñoz");
        Ok(())
    }

    #[test]
    fn csv_missing_required_column_is_reported_by_name() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales\n\
             1/3/2015,Consumer,Furniture,Tables,A-1,Ana,First Class,50.0\n",
        )?;

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == COL_PROFIT));
        Ok(())
    }

    #[test]
    fn csv_bad_number_is_a_format_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales,Profit\n\
             1/3/2015,Consumer,Furniture,Tables,A-1,Ana,First Class,not-a-price,5.0\n",
        )?;

        let err = load_file(&path).unwrap_err();
        match err {
            LoadError::Format { row, source } => {
                assert_eq!(row, 0);
                assert_eq!(
                    source,
                    DataFormatError::Number {
                        column: COL_SALES.to_string(),
                        value: "not-a-price".to_string(),
                    }
                );
            }
            other => panic!("expected Format error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn csv_bad_date_is_a_format_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Order Date,Segment,Category,Sub-Category,Customer ID,Customer Name,Ship Mode,Sales,Profit\n\
             yesterday,Consumer,Furniture,Tables,A-1,Ana,First Class,50.0,5.0\n",
        )?;

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Format {
                source: DataFormatError::Date { .. },
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn order_dates_accept_iso_timestamps() {
        let date = NaiveDate::from_ymd_opt(2016, 11, 8).unwrap();
        assert_eq!(parse_order_date("2016-11-08T00:00:00.000").unwrap(), date);
        assert_eq!(parse_order_date("2016-11-08T12:30:00Z").unwrap(), date);
        assert_eq!(parse_order_date("11/8/2016").unwrap(), date);
        assert!(parse_order_date("Tuesday").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("definitely_not_here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("orders.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn json_records_load_like_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r#"[
  {
    "Order Date": "2016-11-08",
    "Segment": "Consumer",
    "Category": "Furniture",
    "Sub-Category": "Bookcases",
    "Customer ID": "CG-12520",
    "Customer Name": "Claire Gute",
    "Ship Mode": "Second Class",
    "Sales": 261.96,
    "Profit": 41.9136
  }
]"#,
        )?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.orders[0].month, "2016-11");
        assert_eq!(dataset.orders[0].sales, 261.96);
        Ok(())
    }

    #[test]
    fn json_iso_timestamps_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r#"[
  {
    "Order Date": "2016-11-08T00:00:00.000",
    "Segment": "Consumer",
    "Category": "Furniture",
    "Sub-Category": "Bookcases",
    "Customer ID": "CG-12520",
    "Customer Name": "Claire Gute",
    "Ship Mode": "Second Class",
    "Sales": 261.96,
    "Profit": 41.9136
  }
]"#,
        )?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.orders[0].order_date,
            NaiveDate::from_ymd_opt(2016, 11, 8).unwrap()
        );
        assert_eq!(dataset.orders[0].month, "2016-11");
        Ok(())
    }

    #[test]
    fn json_with_missing_field_is_malformed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.json");
        fs::write(&path, r#"[{"Order Date": "2016-11-08"}]"#)?;

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        Ok(())
    }

    /// Nine required columns in the order `load_parquet` reads them, with
    /// `Order Date` of the given type.
    fn parquet_schema(date_type: DataType) -> Arc<Schema> {
        let mut fields = vec![Field::new(COL_ORDER_DATE, date_type, true)];
        for name in [
            COL_SEGMENT,
            COL_CATEGORY,
            COL_SUB_CATEGORY,
            COL_CUSTOMER_ID,
            COL_CUSTOMER_NAME,
            COL_SHIP_MODE,
        ] {
            fields.push(Field::new(name, DataType::Utf8, true));
        }
        fields.push(Field::new(COL_SALES, DataType::Float64, true));
        fields.push(Field::new(COL_PROFIT, DataType::Float64, true));
        Arc::new(Schema::new(fields))
    }

    fn write_parquet(path: &Path, schema: Arc<Schema>, columns: Vec<ArrayRef>) -> Result<()> {
        let batch = RecordBatch::try_new(schema.clone(), columns)?;
        let mut writer = ArrowWriter::try_new(fs::File::create(path)?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    #[test]
    fn parquet_date32_columns_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.parquet");

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let day = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .signed_duration_since(epoch)
                .num_days() as i32
        };
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(vec![day(2016, 11, 8), day(2017, 6, 12)])),
            Arc::new(StringArray::from(vec!["Consumer", "Corporate"])),
            Arc::new(StringArray::from(vec!["Furniture", "Office Supplies"])),
            Arc::new(StringArray::from(vec!["Bookcases", "Labels"])),
            Arc::new(StringArray::from(vec!["CG-12520", "DV-13045"])),
            Arc::new(StringArray::from(vec!["Claire Gute", "Darrin Van Huff"])),
            Arc::new(StringArray::from(vec!["Second Class", "Second Class"])),
            Arc::new(Float64Array::from(vec![261.96, 14.62])),
            Arc::new(Float64Array::from(vec![41.9136, 6.8714])),
        ];
        write_parquet(&path, parquet_schema(DataType::Date32), columns)?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.len(), 2);

        let first = &dataset.orders[0];
        assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
        assert_eq!(first.month, "2016-11");
        assert_eq!(first.customer_name, "Claire Gute");
        assert_eq!(first.sales, 261.96);

        assert_eq!(dataset.orders[1].month, "2017-06");
        assert_eq!(dataset.years.iter().collect::<Vec<_>>(), [&2016, &2017]);
        Ok(())
    }

    #[test]
    fn parquet_string_dates_parse_like_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.parquet");

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["11/8/2016"])),
            Arc::new(StringArray::from(vec!["Consumer"])),
            Arc::new(StringArray::from(vec!["Furniture"])),
            Arc::new(StringArray::from(vec!["Bookcases"])),
            Arc::new(StringArray::from(vec!["CG-12520"])),
            Arc::new(StringArray::from(vec!["Claire Gute"])),
            Arc::new(StringArray::from(vec!["Second Class"])),
            Arc::new(Float64Array::from(vec![261.96])),
            Arc::new(Float64Array::from(vec![41.9136])),
        ];
        write_parquet(&path, parquet_schema(DataType::Utf8), columns)?;

        let dataset = load_file(&path)?;
        assert_eq!(dataset.orders[0].month, "2016-11");
        Ok(())
    }

    #[test]
    fn parquet_null_cell_is_a_format_error_with_row() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.parquet");

        // Row 0 is complete; row 1 has a null customer name.
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["11/8/2016", "2016-12-01"])),
            Arc::new(StringArray::from(vec!["Consumer", "Corporate"])),
            Arc::new(StringArray::from(vec!["Furniture", "Technology"])),
            Arc::new(StringArray::from(vec!["Bookcases", "Phones"])),
            Arc::new(StringArray::from(vec!["CG-12520", "AT-1001"])),
            Arc::new(StringArray::from(vec![Some("Claire Gute"), None])),
            Arc::new(StringArray::from(vec!["Second Class", "First Class"])),
            Arc::new(Float64Array::from(vec![261.96, 99.5])),
            Arc::new(Float64Array::from(vec![41.9136, 9.5])),
        ];
        write_parquet(&path, parquet_schema(DataType::Utf8), columns)?;

        let err = load_file(&path).unwrap_err();
        match err {
            LoadError::Format { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(
                    source,
                    DataFormatError::Missing {
                        column: COL_CUSTOMER_NAME.to_string(),
                    }
                );
            }
            other => panic!("expected Format error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn load_cached_returns_the_same_table() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(&path, SAMPLE_CSV)?;

        let first = load_cached(&path)?;
        let second = load_cached(&path)?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 3);
        Ok(())
    }
}
