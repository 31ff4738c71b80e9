//! Order lifecycle core for the ticket client.
//!
//! This module coordinates the screen-side lifecycle of a single service
//! order: loading it from the remote store, exposing display state, and
//! validating and executing the close transition. Presentation is an
//! external collaborator that renders what this core produces.

/// The order screen lifecycle controller.
pub mod controller;
/// Mapping between raw store documents and the in-memory order entity.
pub mod mapper;

pub use controller::{OrderScreen, ScreenState};
