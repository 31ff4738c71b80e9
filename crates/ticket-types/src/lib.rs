//! Common types for the ticket order client.
//!
//! This module defines the core data types and structures shared by the
//! ticket crates. It provides a centralized location for shared types to
//! ensure consistency across the gateway, the lifecycle core, and the
//! service binary.

/// Event types emitted by the order screen.
pub mod events;
/// Service-order types including the order entity, raw documents, and updates.
pub mod order;
/// Utility functions for formatting timestamps and identifiers.
pub mod utils;
/// Configuration validation types for ensuring type-safe backend configurations.
pub mod validation;

// Re-export all types for convenient access
pub use events::*;
pub use order::*;
pub use utils::{format_timestamp, truncate_id};
pub use validation::*;
