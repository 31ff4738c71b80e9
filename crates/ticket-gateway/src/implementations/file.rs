//! File-based store backend implementation for the ticket system.
//!
//! This module provides a filesystem implementation of the StoreBackend
//! trait, storing one JSON document per file under a configurable root.
//! It gives the CLI simple persistence without an external database.

use crate::{GatewayError, GatewayRegistry, StoreBackend};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use ticket_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use tokio::fs;

/// Default root directory for the file store.
const DEFAULT_PATH: &str = "./data/orders-store";

/// File-based store implementation.
///
/// Documents are laid out as `<root>/<collection>/<id>.json`. Writes go
/// through a temp file and a rename, so readers never observe a partially
/// written document.
pub struct FileStore {
	/// Base directory path for storing documents.
	base_path: PathBuf,
}

impl FileStore {
	/// Creates a new FileStore rooted at the given path.
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	/// Converts a collection and id to a filesystem-safe document path.
	///
	/// Sanitizes the id by replacing path-relevant characters and appends a
	/// .json extension.
	fn document_path(&self, collection: &str, id: &str) -> PathBuf {
		let safe_id = id.replace(['/', '\\', ':'], "_");
		self.base_path
			.join(collection)
			.join(format!("{}.json", safe_id))
	}
}

#[async_trait]
impl StoreBackend for FileStore {
	async fn get_bytes(&self, collection: &str, id: &str) -> Result<Vec<u8>, GatewayError> {
		let path = self.document_path(collection, id);

		match fs::read(&path).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GatewayError::NotFound),
			Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
				Err(GatewayError::Permission(e.to_string()))
			}
			Err(e) => Err(GatewayError::Transport(e.to_string())),
		}
	}

	async fn set_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), GatewayError> {
		let path = self.document_path(collection, id);

		// Create parent directory if it doesn't exist
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| GatewayError::Transport(e.to_string()))?;
		}

		// Write atomically by writing to temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, value)
			.await
			.map_err(|e| GatewayError::Transport(e.to_string()))?;

		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| GatewayError::Transport(e.to_string()))?;

		Ok(())
	}

	async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
		let path = self.document_path(collection, id);

		match fs::remove_file(&path).await {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(GatewayError::Transport(e.to_string())),
		}
	}

	async fn exists(&self, collection: &str, id: &str) -> Result<bool, GatewayError> {
		let path = self.document_path(collection, id);
		Ok(path.exists())
	}

	fn server_time(&self) -> DateTime<Utc> {
		Utc::now()
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FileStoreSchema)
	}
}

/// Configuration schema for FileStore.
pub struct FileStoreSchema;

impl ConfigSchema for FileStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![], // No required fields
			vec![Field::new("path", FieldType::String)],
		);
		schema.validate(config)
	}
}

/// Registry for the file backend.
pub struct Registry;

impl GatewayRegistry for Registry {
	const NAME: &'static str = "file";

	fn factory() -> crate::GatewayFactory {
		create_store
	}
}

/// Factory function to create a file store backend from configuration.
///
/// Configuration parameters:
/// - `path`: Base directory for the document files (default: "./data/orders-store")
pub fn create_store(config: &toml::Value) -> Result<Box<dyn StoreBackend>, GatewayError> {
	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_PATH)
		.to_string();

	Ok(Box::new(FileStore::new(PathBuf::from(path))))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store_in(dir: &tempfile::TempDir) -> FileStore {
		FileStore::new(dir.path().to_path_buf())
	}

	#[tokio::test]
	async fn test_roundtrip() {
		let dir = tempfile::tempdir().unwrap();
		let store = store_in(&dir);

		let value = b"{\"status\":\"open\"}".to_vec();
		store
			.set_bytes("orders", "order-1", value.clone())
			.await
			.unwrap();

		let retrieved = store.get_bytes("orders", "order-1").await.unwrap();
		assert_eq!(retrieved, value);
		assert!(store.exists("orders", "order-1").await.unwrap());
	}

	#[tokio::test]
	async fn test_missing_document_is_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let store = store_in(&dir);

		let result = store.get_bytes("orders", "missing").await;
		assert!(matches!(result, Err(GatewayError::NotFound)));
	}

	#[tokio::test]
	async fn test_delete_is_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let store = store_in(&dir);

		store
			.set_bytes("orders", "order-1", b"data".to_vec())
			.await
			.unwrap();
		store.delete("orders", "order-1").await.unwrap();
		assert!(!store.exists("orders", "order-1").await.unwrap());

		// Deleting again is not an error
		store.delete("orders", "order-1").await.unwrap();
	}

	#[tokio::test]
	async fn test_id_sanitization() {
		let dir = tempfile::tempdir().unwrap();
		let store = store_in(&dir);

		store
			.set_bytes("orders", "a/b:c", b"data".to_vec())
			.await
			.unwrap();
		let retrieved = store.get_bytes("orders", "a/b:c").await.unwrap();
		assert_eq!(retrieved, b"data".to_vec());

		// The document stays inside the collection directory
		assert!(dir.path().join("orders").join("a_b_c.json").exists());
	}

	#[test]
	fn test_schema_rejects_non_string_path() {
		let schema = FileStoreSchema;
		let config: toml::Value = "path = 42".parse().unwrap();
		assert!(schema.validate(&config).is_err());

		let config: toml::Value = "path = \"./somewhere\"".parse().unwrap();
		schema.validate(&config).unwrap();
	}
}
