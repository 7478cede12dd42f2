use rand::Rng;
use serde::{Deserialize, Serialize};

/// Storage key holding every registered car.
pub const KEY_CARS: &str = "cars";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub vin: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: String,             // validated integer, kept as entered
    #[serde(default)]
    pub features: Option<String>,
}

/// Mileage as it was persisted. Older records carry plain numbers, newer ones
/// the raw form text ("12 345 km").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mileage {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for Mileage {
    fn default() -> Self {
        Mileage::Other(serde_json::Value::Null)
    }
}

impl From<i64> for Mileage {
    fn from(v: i64) -> Self {
        Mileage::Number(v)
    }
}

impl From<&str> for Mileage {
    fn from(v: &str) -> Self {
        Mileage::Text(v.to_string())
    }
}

impl From<String> for Mileage {
    fn from(v: String) -> Self {
        Mileage::Text(v)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    #[serde(default)]
    pub date: String,             // DD-MM-YYYY or YYYY-MM-DD
    #[serde(default)]
    pub mileage: Mileage,
    #[serde(default)]
    pub works: String,
    #[serde(default)]
    pub parts: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,    // opaque URI from the image picker
}

/// Storage key for the service journal of one car: serviceHistory_<car_id>
pub fn history_key(car_id: &str) -> String {
    format!("serviceHistory_{car_id}")
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random base-36 fragment followed by the current Unix time in milliseconds.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let mut id: String = (0..10)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    id.push_str(&chrono::Utc::now().timestamp_millis().to_string());
    id
}
