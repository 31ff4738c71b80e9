//! In-memory store backend implementation for the ticket system.
//!
//! This module provides a memory-based implementation of the StoreBackend
//! trait, useful for testing and demo scenarios where persistence is not
//! required.

use crate::{GatewayError, GatewayRegistry, StoreBackend};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use ticket_types::{ConfigSchema, Schema, ValidationError};
use tokio::sync::RwLock;

/// In-memory store implementation.
///
/// Documents live in a HashMap keyed by collection and id, providing fast
/// access but no persistence across restarts. The server clock defaults to
/// the process clock; a fixed instant can be injected for deterministic
/// tests.
pub struct MemoryStore {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
	/// Fixed server clock for tests; falls back to the process clock.
	fixed_time: Option<DateTime<Utc>>,
}

impl MemoryStore {
	/// Creates a new MemoryStore instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
			fixed_time: None,
		}
	}

	/// Creates a MemoryStore whose server clock always returns `instant`.
	pub fn with_server_time(instant: DateTime<Utc>) -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
			fixed_time: Some(instant),
		}
	}

	fn key(collection: &str, id: &str) -> String {
		format!("{}/{}", collection, id)
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StoreBackend for MemoryStore {
	async fn get_bytes(&self, collection: &str, id: &str) -> Result<Vec<u8>, GatewayError> {
		let store = self.store.read().await;
		store
			.get(&Self::key(collection, id))
			.cloned()
			.ok_or(GatewayError::NotFound)
	}

	async fn set_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), GatewayError> {
		let mut store = self.store.write().await;
		store.insert(Self::key(collection, id), value);
		Ok(())
	}

	async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
		let mut store = self.store.write().await;
		store.remove(&Self::key(collection, id));
		Ok(())
	}

	async fn exists(&self, collection: &str, id: &str) -> Result<bool, GatewayError> {
		let store = self.store.read().await;
		Ok(store.contains_key(&Self::key(collection, id)))
	}

	fn server_time(&self) -> DateTime<Utc> {
		self.fixed_time.unwrap_or_else(Utc::now)
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStoreSchema)
	}
}

/// Configuration schema for MemoryStore.
pub struct MemoryStoreSchema;

impl ConfigSchema for MemoryStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory storage has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the in-memory backend.
pub struct Registry;

impl GatewayRegistry for Registry {
	const NAME: &'static str = "memory";

	fn factory() -> crate::GatewayFactory {
		create_store
	}
}

/// Factory function to create a memory store backend from configuration.
///
/// Configuration parameters:
/// - None required for memory storage
pub fn create_store(_config: &toml::Value) -> Result<Box<dyn StoreBackend>, GatewayError> {
	Ok(Box::new(MemoryStore::new()))
}
