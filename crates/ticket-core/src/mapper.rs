//! Mapping between raw store documents and the in-memory order entity.
//!
//! The mapper derives the formatted date fields at conversion time and
//! builds the update payload for the close transition. It performs no I/O
//! and enforces no invariants; the controller owns those at the point of
//! mutation.

use ticket_types::{
	format_timestamp, Order, OrderDocument, OrderStatus, OrderUpdate, WriteTimestamp,
};

/// Builds the display entity from a raw store document.
///
/// Requires the always-present fields; `closed_at` and `solution` pass
/// through as-is, so an open document never gains a fabricated closing
/// date.
pub fn from_remote(id: &str, document: &OrderDocument) -> Order {
	Order {
		id: id.to_string(),
		patrimony: document.patrimony.clone(),
		description: document.description.clone(),
		status: document.status,
		solution: document.solution.clone(),
		when: format_timestamp(document.created_at),
		closed: document.closed_at.map(format_timestamp),
	}
}

/// Builds the update payload that closes an order.
///
/// The closing timestamp is always the server-timestamp directive; it is
/// never computed on the client.
pub fn to_close_update(solution: &str) -> OrderUpdate {
	OrderUpdate {
		status: OrderStatus::Closed,
		solution: solution.to_string(),
		closed_at: WriteTimestamp::Server,
	}
}
