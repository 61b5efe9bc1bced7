//! Benchmark for contract construction and projection using synthetic
//! city records.
//!
//! Usage: `bench-contracts [record-count]` (default 50000). Set `RUST_LOG`
//! to see library diagnostics.

use std::collections::BTreeMap;
use std::time::Instant;

use lazy_contract::{
    Contract, DictProperty, DocumentBuilder, EnumerationProperty, FieldReader, Float,
    FloatProperty, IntegerProperty, ListProperty, Map, ObjectProperty, OptionalProperty, Property,
    Result, SetProperty, StringProperty, Value,
};
use lazy_static::lazy_static;
use rustc_hash::FxHashSet;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_RECORDS: usize = 50_000;
const ITERS: u32 = 5;

// =============================================================================
// SCHEMA
// =============================================================================

lazy_static! {
    static ref CITY_TYPE: EnumerationProperty =
        EnumerationProperty::new(["city", "town", "village", "municipality"]);
    static ref COORDINATES: ListProperty<FloatProperty> = ListProperty::of(FloatProperty);
    static ref TIMEZONES: SetProperty<StringProperty> = SetProperty::of(StringProperty);
    static ref TRANSLATIONS: DictProperty<StringProperty> = DictProperty::of(StringProperty);
    static ref POPULATION: OptionalProperty<IntegerProperty> =
        OptionalProperty::new(IntegerProperty);
    static ref CITIES: ListProperty<ObjectProperty<City>> =
        ListProperty::of(ObjectProperty::new());
}

#[derive(Debug, Clone, PartialEq)]
struct City {
    name: String,
    country_code: String,
    city_type: Option<String>,
    population: Option<i64>,
    coordinates: Vec<Float>,
    timezones: FxHashSet<String>,
    translations: BTreeMap<String, String>,
}

impl Contract for City {
    fn from_document(document: &Map) -> Result<Self> {
        let fields = FieldReader::new(document);
        Ok(Self {
            name: fields.read("name", &StringProperty)?,
            country_code: fields.read("country_code", &StringProperty)?,
            city_type: fields.read("type", &*CITY_TYPE)?,
            population: fields.read("population", &*POPULATION)?,
            coordinates: fields.read("coordinates", &*COORDINATES)?,
            timezones: fields.read("timezones", &*TIMEZONES)?,
            translations: fields.read("translations", &*TRANSLATIONS)?,
        })
    }

    fn to_document(&self) -> Map {
        DocumentBuilder::new()
            .field("name", &StringProperty, &self.name)
            .field("country_code", &StringProperty, &self.country_code)
            .field("type", &*CITY_TYPE, &self.city_type)
            .field("population", &*POPULATION, &self.population)
            .field("coordinates", &*COORDINATES, &self.coordinates)
            .field("timezones", &*TIMEZONES, &self.timezones)
            .field("translations", &*TRANSLATIONS, &self.translations)
            .build()
    }
}

// =============================================================================
// DATA GENERATION
// =============================================================================

const COUNTRIES: [&str; 6] = ["US", "FR", "DE", "JP", "BR", "IN"];
const TYPES: [&str; 4] = ["city", "town", "village", "municipality"];

/// Builds a deterministic record. Numeric fields alternate between native
/// and textual forms so coercion paths are exercised.
fn make_record(i: usize) -> serde_json::Value {
    let lat = (i % 180) as f64 - 90.0 + 0.5;
    let lon = (i % 360) as f64 - 180.0 + 0.25;
    let population = if i % 7 == 0 {
        json!(null)
    } else if i % 2 == 0 {
        json!(i * 13)
    } else {
        json!((i * 13).to_string())
    };
    json!({
        "name": format!("City {}", i),
        "country_code": COUNTRIES[i % COUNTRIES.len()],
        "type": TYPES[i % TYPES.len()],
        "population": population,
        "coordinates": [lat, lon.to_string()],
        "timezones": ["UTC", format!("UTC+{}", i % 12), "UTC"],
        "translations": {
            "de": format!("Stadt {}", i),
            "fr": format!("Ville {}", i),
        },
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = std::env::args()
        .nth(1)
        .and_then(|arg| match arg.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!(arg = %arg, "ignoring unparseable record count");
                None
            }
        })
        .unwrap_or(DEFAULT_RECORDS);

    info!(records, "generating synthetic documents");
    let gen_start = Instant::now();
    let raw: Value = serde_json::Value::Array((0..records).map(make_record).collect()).into();
    println!("Generated {} records in {:?}", records, gen_start.elapsed());

    // Deserialize
    for _ in 0..2 {
        let _ = CITIES.deserialize(&raw).expect("Failed to deserialize");
    }

    let decode_start = Instant::now();
    let mut cities = Vec::new();
    for _ in 0..ITERS {
        cities = CITIES.deserialize(&raw).expect("Failed to deserialize");
    }
    let decode_time = decode_start.elapsed() / ITERS;

    println!(
        "\nDeserialize: {:?} (avg of {} iterations)",
        decode_time, ITERS
    );
    println!(
        "  Throughput: {:.0} records/s",
        records as f64 / decode_time.as_secs_f64()
    );

    // Serialize
    let encode_start = Instant::now();
    let mut projected = Value::Null;
    for _ in 0..ITERS {
        projected = CITIES.serialize(&cities);
    }
    let encode_time = encode_start.elapsed() / ITERS;

    println!(
        "\nSerialize: {:?} (avg of {} iterations)",
        encode_time, ITERS
    );
    println!(
        "  Throughput: {:.0} records/s",
        records as f64 / encode_time.as_secs_f64()
    );

    // Projection must reconstruct the same instances
    let reparsed = CITIES.deserialize(&projected).expect("Failed to reparse");
    assert_eq!(reparsed, cities, "Projection should round-trip");

    // Failure path on a corrupted record
    if records > 0 {
        let mut corrupted = raw.clone();
        if let Value::List(items) = &mut corrupted {
            let last = items.len() - 1;
            if let Value::Map(record) = &mut items[last] {
                record.insert("coordinates".into(), json!([0.0, "north"]).into());
            }
        }
        let fail_start = Instant::now();
        let err = CITIES
            .deserialize(&corrupted)
            .expect_err("Corrupted record should fail");
        println!("\n=== Failure ===");
        println!("{}", err);
        println!("  Located after {:?}", fail_start.elapsed());
    }

    // Summary
    println!("\n=== Summary ===");
    println!("Records: {}", cities.len());
    let populated = cities.iter().filter(|c| c.population.is_some()).count();
    println!("With population: {}", populated);
    let zones: FxHashSet<&str> = cities
        .iter()
        .flat_map(|c| c.timezones.iter().map(String::as_str))
        .collect();
    println!("Distinct timezones: {}", zones.len());
}
