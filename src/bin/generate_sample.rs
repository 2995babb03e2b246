use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use encoding_rs::WINDOWS_1252;

/// Orders written to the output file.
const ROWS: usize = 1200;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Furniture", &["Bookcases", "Chairs", "Furnishings", "Tables"]),
    (
        "Office Supplies",
        &[
            "Appliances",
            "Art",
            "Binders",
            "Envelopes",
            "Fasteners",
            "Labels",
            "Paper",
            "Storage",
            "Supplies",
        ],
    ),
    ("Technology", &["Accessories", "Copiers", "Machines", "Phones"]),
];

const SHIP_MODES: &[&str] = &["First Class", "Same Day", "Second Class", "Standard Class"];

const CITIES: &[&str] = &[
    "New York City",
    "Los Angeles",
    "Philadelphia",
    "San Francisco",
    "Seattle",
    "Houston",
    "Chicago",
    "Columbus",
    "San Diego",
    "Dallas",
];

/// (customer id, customer name, segment); a customer always buys in the same
/// segment, like in the real export. The accented names keep the Windows-1252
/// encoding path honest.
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("AB-10015", "Aarón Bergman", "Consumer"),
    ("AT-10435", "Ana Torres", "Consumer"),
    ("BM-11140", "Becky Martin", "Consumer"),
    ("CB-12025", "Carla Bautista", "Consumer"),
    ("CM-12115", "Carlos Meador", "Consumer"),
    ("DG-13060", "Diana García", "Consumer"),
    ("EP-13915", "Emily Phan", "Consumer"),
    ("GA-14725", "Guy Armstrong", "Consumer"),
    ("IM-15070", "Irene Maddox", "Consumer"),
    ("JM-15265", "José Muñoz", "Consumer"),
    ("LC-16870", "Lena Cacioppo", "Corporate"),
    ("MG-17650", "María González", "Corporate"),
    ("NP-18325", "Naresh Patel", "Corporate"),
    ("PF-19120", "Peter Fuller", "Corporate"),
    ("RB-19360", "Raúl Benítez", "Corporate"),
    ("SC-20095", "Sandra Chávez", "Corporate"),
    ("SR-20740", "Sofía Ramírez", "Corporate"),
    ("TB-21055", "Toby Braunhardt", "Corporate"),
    ("AH-10465", "Andrés Hidalgo", "Home Office"),
    ("DK-13090", "Dana Kaydos", "Home Office"),
    ("HM-14860", "Hugo Medina", "Home Office"),
    ("KL-16645", "Ken Lonsdale", "Home Office"),
    ("NF-18385", "Nicole Fjeld", "Home Office"),
    ("VM-21685", "Valeria Mendoza", "Home Office"),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn choice<'a, T>(rng: &mut SimpleRng, items: &'a [T]) -> &'a T {
    &items[(rng.next_u64() % items.len() as u64) as usize]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_orders.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).context("start date")?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Row ID",
        "Order ID",
        "Order Date",
        "Ship Mode",
        "Customer ID",
        "Customer Name",
        "Segment",
        "Country",
        "City",
        "Category",
        "Sub-Category",
        "Sales",
        "Profit",
    ])?;

    for i in 0..ROWS {
        // Four calendar years, 2015 through 2018.
        let date = start + Duration::days((rng.next_u64() % 1461) as i64);
        let &(customer_id, customer_name, segment) = choice(&mut rng, CUSTOMERS);
        let &(category, sub_categories) = choice(&mut rng, CATEGORIES);
        let sub_category = *choice(&mut rng, sub_categories);
        let ship_mode = *choice(&mut rng, SHIP_MODES);
        let city = *choice(&mut rng, CITIES);

        // Cubing the uniform draw skews sales towards small tickets; the
        // margin draw leaves a realistic share of loss-making orders.
        let sales = round2(8.0 + 2400.0 * rng.next_f64().powi(3));
        let profit = round2(sales * rng.gauss(0.12, 0.18));

        let row_id = (i + 1).to_string();
        let order_id = format!("US-{}-{}", date.format("%Y"), 100_000 + i);
        let order_date = date.format("%m/%d/%Y").to_string();
        let sales_text = format!("{sales:.2}");
        let profit_text = format!("{profit:.2}");

        writer.write_record([
            row_id.as_str(),
            order_id.as_str(),
            order_date.as_str(),
            ship_mode,
            customer_id,
            customer_name,
            segment,
            "United States",
            city,
            category,
            sub_category,
            sales_text.as_str(),
            profit_text.as_str(),
        ])?;
    }

    writer.flush()?;
    let buffer = writer
        .into_inner()
        .map_err(|err| anyhow!("recovering csv buffer: {err}"))?;
    let utf8 = String::from_utf8(buffer)?;

    // The canonical export is Windows-1252, so the generated file is too.
    let (encoded, _, _) = WINDOWS_1252.encode(&utf8);
    std::fs::write(&out, &encoded).with_context(|| format!("writing {out}"))?;

    println!("Wrote {ROWS} orders to {out}");
    Ok(())
}
