use chrono::NaiveDate;
use kv::Storage;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    generate_id, history_key, validate_car, validate_service, Car, CarDraft, HistoryEntry,
    HistoryQuery, Mileage, ServiceDraft, ServiceRecord, ValidationError, KEY_CARS,
};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("KV error: {0}")]
    Kv(#[from] kv::KvError),

    #[error("Serialization error: {0}")]
    Ser(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

fn load_list<S: Storage, T: DeserializeOwned>(store: &S, key: &str) -> Result<Vec<T>> {
    Ok(match store.get(key)? {
        Some(json) => serde_json::from_str(&json)?,
        None => vec![],
    })
}

fn save_list<S: Storage, T: Serialize>(store: &mut S, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    store.put(key, &json)?;
    Ok(())
}

pub fn list_cars<S: Storage>(store: &S) -> Result<Vec<Car>> {
    load_list(store, KEY_CARS)
}

pub fn get_car<S: Storage>(store: &S, car_id: &str) -> Result<Option<Car>> {
    Ok(list_cars(store)?.into_iter().find(|c| c.id == car_id))
}

/// Validate and append a new car. `today` bounds the production year.
pub fn add_car<S: Storage>(store: &mut S, draft: CarDraft, today: NaiveDate) -> Result<Car> {
    validate_car(&draft, today)?;

    let car = Car {
        id: generate_id(),
        vin: draft.vin,
        plate: draft.plate,
        brand: draft.brand,
        model: draft.model,
        year: draft.year.trim().to_string(),
        features: draft.features,
    };

    let mut cars = list_cars(&*store)?;
    cars.push(car.clone());
    save_list(store, KEY_CARS, &cars)?;
    info!(car_id = %car.id, "history: car added");
    Ok(car)
}

/// Service journal of one car, newest first as stored.
pub fn list_services<S: Storage>(store: &S, car_id: &str) -> Result<Vec<ServiceRecord>> {
    load_list(store, &history_key(car_id))
}

pub fn get_service<S: Storage>(
    store: &S,
    car_id: &str,
    service_id: &str,
) -> Result<Option<ServiceRecord>> {
    Ok(list_services(store, car_id)?.into_iter().find(|s| s.id == service_id))
}

/// Validate and prepend a service record to the car's journal.
pub fn add_service<S: Storage>(store: &mut S, draft: ServiceDraft) -> Result<ServiceRecord> {
    let works = validate_service(&draft)?;
    if get_car(&*store, &draft.car_id)?.is_none() {
        return Err(ValidationError::UnknownCar(draft.car_id).into());
    }

    let record = ServiceRecord {
        id: generate_id(),
        date: draft.date,
        mileage: Mileage::Text(draft.mileage),
        works,
        parts: draft.parts,
        photo: draft.photo,
    };

    let key = history_key(&draft.car_id);
    let mut history: Vec<ServiceRecord> = load_list(&*store, &key)?;
    history.insert(0, record.clone());
    save_list(store, &key, &history)?;
    info!(car_id = %draft.car_id, service_id = %record.id, "history: service record added");
    Ok(record)
}

/// Filtered, sorted journal of one car with display forms attached.
pub fn query_services<S: Storage>(
    store: &S,
    car_id: &str,
    query: &HistoryQuery,
) -> Result<Vec<HistoryEntry>> {
    let records = list_services(store, car_id)?;
    Ok(query.apply(&records).into_iter().map(HistoryEntry::from).collect())
}
