//! Service-order types for the ticket system.
//!
//! This module defines the in-memory order entity displayed by the client,
//! the raw document shape held by the remote document store, and the update
//! payload that closes an order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single service/maintenance order as displayed by the client.
///
/// An order is a point-in-time snapshot of the remote document, re-fetched
/// once per screen activation. The formatted date fields are derived at
/// mapping time; the store remains the single source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier assigned by the remote store.
	pub id: String,
	/// Asset tag of the equipment the order refers to.
	pub patrimony: String,
	/// Free-text description of the reported problem.
	pub description: String,
	/// Current status of the order.
	pub status: OrderStatus,
	/// Resolution text, present only once the order is closed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub solution: Option<String>,
	/// Formatted creation date.
	pub when: String,
	/// Formatted closing date, present iff the order is closed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub closed: Option<String>,
}

/// Status of a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order is open and awaiting a resolution.
	Open,
	/// Order has been closed with a resolution.
	Closed,
}

impl OrderStatus {
	/// Returns true if no further transitions are allowed from this status.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Closed)
	}

	/// Checks if a transition to `next` is allowed.
	///
	/// The only legal transition is `Open -> Closed`; there is no reverse
	/// transition.
	pub fn can_transition_to(&self, next: OrderStatus) -> bool {
		matches!((self, next), (OrderStatus::Open, OrderStatus::Closed))
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Open => write!(f, "open"),
			OrderStatus::Closed => write!(f, "closed"),
		}
	}
}

/// Raw order document as held by the remote document store.
///
/// `closed_at` and `solution` are only expected when `status` is closed.
/// The mapper does not enforce that invariant; the controller checks it at
/// the point of mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDocument {
	/// Asset tag of the equipment.
	pub patrimony: String,
	/// Free-text description of the reported problem.
	pub description: String,
	/// Current status of the order.
	pub status: OrderStatus,
	/// Instant the order was registered, stamped by the store at creation.
	pub created_at: DateTime<Utc>,
	/// Instant the order was closed, stamped by the store on the close write.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub closed_at: Option<DateTime<Utc>>,
	/// Resolution text recorded by the close write.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub solution: Option<String>,
}

/// Write-time value for a timestamp field.
///
/// `Server` is the server-timestamp directive: the store stamps its own
/// clock atomically with the write, so client clock skew never reaches the
/// document. An explicit instant is only used by seeding and test tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteTimestamp {
	/// Resolve to the store's clock at write time.
	Server,
	/// Use the given instant verbatim.
	At(DateTime<Utc>),
}

/// Update payload that closes an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
	/// Target status, always `Closed` for a close update.
	pub status: OrderStatus,
	/// Resolution text entered by the user.
	pub solution: String,
	/// Closing timestamp request, resolved by the store.
	pub closed_at: WriteTimestamp,
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn status_serializes_lowercase() {
		assert_eq!(
			serde_json::to_string(&OrderStatus::Open).unwrap(),
			"\"open\""
		);
		assert_eq!(
			serde_json::to_string(&OrderStatus::Closed).unwrap(),
			"\"closed\""
		);
		assert_eq!(
			serde_json::from_str::<OrderStatus>("\"open\"").unwrap(),
			OrderStatus::Open
		);
	}

	#[test]
	fn only_open_to_closed_is_allowed() {
		assert!(OrderStatus::Open.can_transition_to(OrderStatus::Closed));
		assert!(!OrderStatus::Closed.can_transition_to(OrderStatus::Open));
		assert!(!OrderStatus::Open.can_transition_to(OrderStatus::Open));
		assert!(!OrderStatus::Closed.can_transition_to(OrderStatus::Closed));
	}

	#[test]
	fn closed_is_terminal() {
		assert!(OrderStatus::Closed.is_terminal());
		assert!(!OrderStatus::Open.is_terminal());
	}

	#[test]
	fn open_document_roundtrips_without_optional_fields() {
		let document = OrderDocument {
			patrimony: "123456".into(),
			description: "broken screen".into(),
			status: OrderStatus::Open,
			created_at: Utc.with_ymd_and_hms(2022, 7, 4, 16, 30, 0).unwrap(),
			closed_at: None,
			solution: None,
		};

		let json = serde_json::to_value(&document).unwrap();
		assert!(json.get("closed_at").is_none());
		assert!(json.get("solution").is_none());

		let parsed: OrderDocument = serde_json::from_value(json).unwrap();
		assert_eq!(parsed, document);
	}
}
