//! Remote document-store gateway for the ticket system.
//!
//! This module provides the abstraction the order screen consumes for
//! reading and closing service orders, supporting different backend
//! implementations such as in-memory and file-based stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use ticket_types::{ConfigSchema, OrderDocument, OrderUpdate, WriteTimestamp};

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// The requested order id does not resolve to a document.
	#[error("Not found")]
	NotFound,
	/// A create targeted an id that already holds a document.
	#[error("Already exists")]
	AlreadyExists,
	/// The store or the network path to it is unavailable.
	#[error("Transport error: {0}")]
	Transport(String),
	/// The store rejected a write under its access rules.
	#[error("Permission denied: {0}")]
	Permission(String),
	/// A document failed to serialize or deserialize.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Document collections the gateway operates on.
///
/// This enum provides type safety for store operations by replacing string
/// literals with strongly typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
	/// Service-order documents.
	Orders,
}

impl Collection {
	/// Returns the string representation of the collection.
	pub fn as_str(&self) -> &'static str {
		match self {
			Collection::Orders => "orders",
		}
	}
}

/// Trait defining the low-level interface for document-store backends.
///
/// This trait must be implemented by any backend that wants to integrate
/// with the ticket system. It provides raw JSON document access plus the
/// store-side clock used to resolve server-timestamp writes.
#[async_trait]
pub trait StoreBackend: Send + Sync {
	/// Retrieves the raw bytes of a document.
	async fn get_bytes(&self, collection: &str, id: &str) -> Result<Vec<u8>, GatewayError>;

	/// Stores the raw bytes of a document, creating or overwriting it.
	async fn set_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), GatewayError>;

	/// Deletes a document. Deleting an absent document is not an error.
	async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError>;

	/// Checks if a document exists.
	async fn exists(&self, collection: &str, id: &str) -> Result<bool, GatewayError>;

	/// The store-side clock.
	///
	/// `WriteTimestamp::Server` resolves against this, never against the
	/// caller's clock.
	fn server_time(&self) -> DateTime<Utc>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for gateway factory functions.
///
/// This is the function signature that all backend implementations must
/// provide to create instances of their store backend.
pub type GatewayFactory = fn(&toml::Value) -> Result<Box<dyn StoreBackend>, GatewayError>;

/// Registry trait for gateway backend implementations.
///
/// Each backend module must provide a Registry struct that implements this
/// trait, declaring its configuration name and factory function.
pub trait GatewayRegistry {
	/// The name used in configuration files to reference this backend.
	const NAME: &'static str;

	/// Get the factory function for this backend.
	fn factory() -> GatewayFactory;
}

/// Get all registered gateway implementations.
///
/// Returns a vector of (name, factory) tuples for all available backends.
/// This is used by the service wiring to resolve the configured backend.
pub fn get_all_implementations() -> Vec<(&'static str, GatewayFactory)> {
	use implementations::{file, memory};

	vec![
		(file::Registry::NAME, file::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// High-level gateway that provides typed order operations.
///
/// The GatewayService wraps a low-level store backend and handles JSON
/// conversion and the resolution of server-timestamp directives at write
/// time.
pub struct GatewayService {
	/// The underlying store backend implementation.
	backend: Box<dyn StoreBackend>,
}

impl GatewayService {
	/// Creates a new GatewayService with the specified backend.
	pub fn new(backend: Box<dyn StoreBackend>) -> Self {
		Self { backend }
	}

	/// Reads a single order document.
	pub async fn get_order(&self, id: &str) -> Result<OrderDocument, GatewayError> {
		let bytes = self
			.backend
			.get_bytes(Collection::Orders.as_str(), id)
			.await?;
		serde_json::from_slice(&bytes).map_err(|e| GatewayError::Serialization(e.to_string()))
	}

	/// Applies a close update to an existing order document.
	///
	/// The update is merged into the stored document. A
	/// `WriteTimestamp::Server` closing date resolves against the backend
	/// clock in the same write, so the stamped instant is the store's, not
	/// the client's. Fails with `NotFound` if the document does not exist.
	pub async fn update_order(&self, id: &str, update: &OrderUpdate) -> Result<(), GatewayError> {
		let collection = Collection::Orders.as_str();

		let bytes = self.backend.get_bytes(collection, id).await?;
		let mut document: OrderDocument = serde_json::from_slice(&bytes)
			.map_err(|e| GatewayError::Serialization(e.to_string()))?;

		document.status = update.status;
		document.solution = Some(update.solution.clone());
		document.closed_at = Some(match update.closed_at {
			WriteTimestamp::Server => self.backend.server_time(),
			WriteTimestamp::At(instant) => instant,
		});

		let bytes = serde_json::to_vec(&document)
			.map_err(|e| GatewayError::Serialization(e.to_string()))?;
		self.backend.set_bytes(collection, id, bytes).await
	}

	/// Creates a new order document.
	///
	/// Refuses to overwrite an existing document, making it semantically
	/// different from a plain write. Order creation happens upstream of the
	/// order screen; this operation exists for seeding and tests.
	pub async fn create_order(
		&self,
		id: &str,
		document: &OrderDocument,
	) -> Result<(), GatewayError> {
		let collection = Collection::Orders.as_str();

		if self.backend.exists(collection, id).await? {
			return Err(GatewayError::AlreadyExists);
		}

		let bytes = serde_json::to_vec(document)
			.map_err(|e| GatewayError::Serialization(e.to_string()))?;
		self.backend.set_bytes(collection, id, bytes).await
	}

	/// Checks if an order document exists.
	pub async fn exists(&self, id: &str) -> Result<bool, GatewayError> {
		self.backend.exists(Collection::Orders.as_str(), id).await
	}

	/// The backend clock, exposed for seed tooling.
	pub fn server_time(&self) -> DateTime<Utc> {
		self.backend.server_time()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::MemoryStore;
	use chrono::TimeZone;
	use ticket_types::OrderStatus;

	fn open_document(created_at: DateTime<Utc>) -> OrderDocument {
		OrderDocument {
			patrimony: "123456".into(),
			description: "broken screen".into(),
			status: OrderStatus::Open,
			created_at,
			closed_at: None,
			solution: None,
		}
	}

	#[tokio::test]
	async fn create_and_get_order_roundtrip() {
		let gateway = GatewayService::new(Box::new(MemoryStore::new()));
		let created_at = Utc.with_ymd_and_hms(2022, 7, 4, 16, 30, 0).unwrap();
		let document = open_document(created_at);

		gateway.create_order("order-1", &document).await.unwrap();
		let fetched = gateway.get_order("order-1").await.unwrap();
		assert_eq!(fetched, document);
	}

	#[tokio::test]
	async fn get_missing_order_is_not_found() {
		let gateway = GatewayService::new(Box::new(MemoryStore::new()));
		let result = gateway.get_order("missing").await;
		assert!(matches!(result, Err(GatewayError::NotFound)));
	}

	#[tokio::test]
	async fn create_refuses_to_overwrite() {
		let gateway = GatewayService::new(Box::new(MemoryStore::new()));
		let document = open_document(Utc.with_ymd_and_hms(2022, 7, 4, 16, 30, 0).unwrap());

		gateway.create_order("order-1", &document).await.unwrap();
		let result = gateway.create_order("order-1", &document).await;
		assert!(matches!(result, Err(GatewayError::AlreadyExists)));
	}

	#[tokio::test]
	async fn update_stamps_server_time_for_server_directive() {
		let server_time = Utc.with_ymd_and_hms(2022, 7, 5, 9, 0, 0).unwrap();
		let gateway =
			GatewayService::new(Box::new(MemoryStore::with_server_time(server_time)));
		let document = open_document(Utc.with_ymd_and_hms(2022, 7, 4, 16, 30, 0).unwrap());
		gateway.create_order("order-1", &document).await.unwrap();

		let update = OrderUpdate {
			status: OrderStatus::Closed,
			solution: "replaced panel".into(),
			closed_at: WriteTimestamp::Server,
		};
		gateway.update_order("order-1", &update).await.unwrap();

		let stored = gateway.get_order("order-1").await.unwrap();
		assert_eq!(stored.status, OrderStatus::Closed);
		assert_eq!(stored.solution.as_deref(), Some("replaced panel"));
		assert_eq!(stored.closed_at, Some(server_time));
		// Untouched fields survive the merge
		assert_eq!(stored.patrimony, document.patrimony);
		assert_eq!(stored.description, document.description);
		assert_eq!(stored.created_at, document.created_at);
	}

	#[tokio::test]
	async fn update_missing_order_is_not_found() {
		let gateway = GatewayService::new(Box::new(MemoryStore::new()));
		let update = OrderUpdate {
			status: OrderStatus::Closed,
			solution: "done".into(),
			closed_at: WriteTimestamp::Server,
		};
		let result = gateway.update_order("missing", &update).await;
		assert!(matches!(result, Err(GatewayError::NotFound)));
	}

	#[test]
	fn all_implementations_are_registered() {
		let names: Vec<&str> = get_all_implementations()
			.into_iter()
			.map(|(name, _)| name)
			.collect();
		assert!(names.contains(&"memory"));
		assert!(names.contains(&"file"));
	}
}
