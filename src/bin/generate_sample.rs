use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One row in the layout the dashboard reads.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
}

/// A booster generation: how many flights, where from, typical payload
/// and how often it landed.
struct Era {
    category: &'static str,
    flights: usize,
    sites: &'static [&'static str],
    payload_mean: f64,
    payload_sd: f64,
    success_rate: f64,
}

const ERAS: &[Era] = &[
    Era { category: "v1.0", flights: 5, sites: &["CCAFS LC-40"], payload_mean: 300.0, payload_sd: 250.0, success_rate: 0.0 },
    Era { category: "v1.1", flights: 15, sites: &["CCAFS LC-40", "VAFB SLC-4E"], payload_mean: 2500.0, payload_sd: 1200.0, success_rate: 0.2 },
    Era { category: "FT", flights: 16, sites: &["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"], payload_mean: 5000.0, payload_sd: 2200.0, success_rate: 0.65 },
    Era { category: "B4", flights: 11, sites: &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"], payload_mean: 4500.0, payload_sd: 2000.0, success_rate: 0.55 },
    Era { category: "B5", flights: 9, sites: &["CCAFS SLC-40", "KSC LC-39A"], payload_mean: 4000.0, payload_sd: 1800.0, success_rate: 0.85 },
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    for era in ERAS {
        for _ in 0..era.flights {
            let flight_number = rows.len() as i64 + 1;
            // Round to whole kilograms, keep inside the slider domain.
            let payload_mass_kg = rng.gauss(era.payload_mean, era.payload_sd).clamp(0.0, 9600.0).round();
            let class = (rng.next_f64() < era.success_rate) as i64;
            let booster_version = format!("F9 {} B{:04}", era.category, 1000 + flight_number);
            rows.push(LaunchRow {
                flight_number,
                launch_site: *rng.pick(era.sites),
                class,
                payload_mass_kg,
                booster_version,
            });
        }
    }
    rows
}

fn write_parquet(rows: &[LaunchRow], output_path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version.as_str()))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    let parquet_path = "spacex_launch_dash.parquet";
    write_parquet(&rows, parquet_path);

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {csv_path} and {parquet_path}",
        rows.len()
    );
}
