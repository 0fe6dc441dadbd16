//! Persistent local state: holdings and alerts as two JSON documents.
//!
//! Each collection lives under its own key and is overwritten in full on
//! every save. Loading never fails: a missing or undecodable document yields
//! an empty collection, and individual records that fail validation are
//! dropped with a warning.

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

mod wire;

use crate::domain::alert::Alert;
use crate::domain::portfolio::Holding;
use crate::error::StorageError;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::LocalStorage;

/// Key of the holdings document.
pub const HOLDINGS_KEY: &str = "cryptoHoldings";
/// Key of the alerts document.
pub const ALERTS_KEY: &str = "priceAlerts";

/// A string key-value store.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Everything restored at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Persisted {
    pub holdings: Vec<Holding>,
    pub alerts: Vec<Alert>,
}

/// Typed load/save over a [`KeyValueStore`].
#[derive(Debug)]
pub struct LocalState<S> {
    store: S,
}

impl<S: KeyValueStore> LocalState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load(&self) -> Persisted {
        Persisted {
            holdings: self.load_holdings(),
            alerts: self.load_alerts(),
        }
    }

    pub fn load_holdings(&self) -> Vec<Holding> {
        self.read_records::<Holding>(HOLDINGS_KEY)
            .into_iter()
            .filter(|h| match h.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(id = %h.id, error = %e, "Dropping invalid stored holding");
                    false
                }
            })
            .collect()
    }

    pub fn load_alerts(&self) -> Vec<Alert> {
        self.read_records::<wire::StoredAlert>(ALERTS_KEY)
            .into_iter()
            .map(Alert::from)
            .filter(|a| match a.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(id = %a.id, error = %e, "Dropping invalid stored alert");
                    false
                }
            })
            .collect()
    }

    pub fn save_holdings(&mut self, holdings: &[Holding]) -> Result<(), StorageError> {
        let json = serde_json::to_string(holdings)?;
        self.store.write(HOLDINGS_KEY, &json)
    }

    pub fn save_alerts(&mut self, alerts: &[Alert]) -> Result<(), StorageError> {
        let json = serde_json::to_string(alerts)?;
        self.store.write(ALERTS_KEY, &json)
    }

    /// Decode a JSON array, skipping elements that do not decode.
    fn read_records<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted state");
                return Vec::new();
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed persisted state, starting empty");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect()
    }
}
