//! Event types emitted by the order screen.
//!
//! The screen communicates with its host through a small set of events:
//! user-facing feedback messages and navigation signals. The host owns the
//! receiving end of the channel and decides how to surface each event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events the order screen emits towards its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
	/// A user-facing message should be shown.
	Message(UserMessage),
	/// The host should leave the screen.
	NavigateBack,
}

/// User-facing feedback messages.
///
/// The exact wording is a localization concern; the variants are the
/// contract. At most one of these is emitted per close attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserMessage {
	/// The close action was invoked without a resolution text.
	SolutionRequired,
	/// The close write was confirmed by the store.
	OrderClosed,
	/// The close write was rejected or the store was unreachable.
	CloseFailed,
}

impl fmt::Display for UserMessage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserMessage::SolutionRequired => {
				write!(f, "Enter a solution to close the order.")
			}
			UserMessage::OrderClosed => write!(f, "Order closed."),
			UserMessage::CloseFailed => write!(f, "Could not close the order."),
		}
	}
}
