//! Order screen lifecycle controller.
//!
//! One controller instance drives one screen activation: a single read on
//! activation, at most one close write per attempt, and the user-facing
//! feedback for each outcome. All dependencies are passed in explicitly;
//! nothing is read from ambient context.

use std::sync::Arc;

use ticket_gateway::{GatewayError, GatewayService};
use ticket_types::{truncate_id, Order, OrderStatus, ScreenEvent, UserMessage};
use tokio::sync::mpsc;

use crate::mapper;

/// State of the order screen within one activation.
#[derive(Debug)]
pub enum ScreenState {
	/// The initial read has not completed yet.
	Loading,
	/// The order is displayed.
	Loaded,
	/// A close write is in flight; further close requests are rejected.
	Closing,
	/// The initial read failed. Distinct from Loading: the screen never
	/// hangs on a failed read, and `retry` re-issues it.
	Error {
		/// The failure that moved the screen here.
		error: GatewayError,
	},
}

/// Controller for one activation of the order details screen.
///
/// Owns the order snapshot and the transient draft solution. The host
/// receives feedback through the event channel and renders the state this
/// controller exposes.
pub struct OrderScreen {
	/// Identifier of the order this activation displays.
	order_id: String,
	/// Remote store gateway.
	gateway: Arc<GatewayService>,
	/// Channel towards the host: user messages and navigation signals.
	events: mpsc::UnboundedSender<ScreenEvent>,
	/// Current screen state.
	state: ScreenState,
	/// Loaded order snapshot, present from the first successful read on.
	order: Option<Order>,
	/// Resolution text being edited by the user. Discarded on teardown,
	/// merged into the store only through a successful close write.
	draft_solution: String,
	/// Set once the screen is torn down; completions landing afterwards
	/// must not update state.
	disposed: bool,
}

impl OrderScreen {
	/// Creates a controller for one screen activation.
	pub fn new(
		order_id: impl Into<String>,
		gateway: Arc<GatewayService>,
		events: mpsc::UnboundedSender<ScreenEvent>,
	) -> Self {
		Self {
			order_id: order_id.into(),
			gateway,
			events,
			state: ScreenState::Loading,
			order: None,
			draft_solution: String::new(),
			disposed: false,
		}
	}

	/// Issues the single read of this activation and derives display state.
	///
	/// On failure the screen moves to `Error` instead of staying in
	/// `Loading`; the read is re-issued only through `retry`.
	pub async fn activate(&mut self) {
		if !matches!(self.state, ScreenState::Loading) {
			return;
		}
		self.load().await;
	}

	/// Re-issues the read after a failed activation.
	pub async fn retry(&mut self) {
		if !matches!(self.state, ScreenState::Error { .. }) {
			return;
		}
		self.state = ScreenState::Loading;
		self.load().await;
	}

	async fn load(&mut self) {
		if self.disposed {
			return;
		}

		let result = self.gateway.get_order(&self.order_id).await;
		if self.disposed {
			return;
		}

		match result {
			Ok(document) => {
				self.order = Some(mapper::from_remote(&self.order_id, &document));
				self.state = ScreenState::Loaded;
			}
			Err(error) => {
				tracing::error!(
					order_id = %truncate_id(&self.order_id),
					error = %error,
					"Failed to load order"
				);
				self.state = ScreenState::Error { error };
			}
		}
	}

	/// Validates the draft solution and submits the close write.
	///
	/// Only reachable once the read has completed and the order is open.
	/// While a write is in flight the state is `Closing` and further calls
	/// return without side effects. Validation failure emits the required
	/// message and issues no write; a failed write keeps the draft so the
	/// user can retry without re-typing.
	pub async fn close(&mut self) {
		if self.disposed || !matches!(self.state, ScreenState::Loaded) {
			return;
		}
		let status = match self.order.as_ref() {
			Some(order) => order.status,
			None => return,
		};
		if !status.can_transition_to(OrderStatus::Closed) {
			return;
		}

		if self.draft_solution.trim().is_empty() {
			self.emit(ScreenEvent::Message(UserMessage::SolutionRequired));
			return;
		}

		self.state = ScreenState::Closing;
		let update = mapper::to_close_update(&self.draft_solution);
		let result = self.gateway.update_order(&self.order_id, &update).await;
		if self.disposed {
			return;
		}

		match result {
			Ok(()) => {
				// The closing date is stamped by the store; it appears on
				// the next fetch. The screen is exiting, so no re-fetch.
				if let Some(order) = self.order.as_mut() {
					order.status = OrderStatus::Closed;
					order.solution = Some(update.solution);
				}
				self.state = ScreenState::Loaded;
				self.emit(ScreenEvent::Message(UserMessage::OrderClosed));
				self.emit(ScreenEvent::NavigateBack);
			}
			Err(error) => {
				tracing::error!(
					order_id = %truncate_id(&self.order_id),
					error = %error,
					"Failed to close order"
				);
				self.state = ScreenState::Loaded;
				self.emit(ScreenEvent::Message(UserMessage::CloseFailed));
			}
		}
	}

	/// Replaces the draft solution text.
	pub fn set_draft_solution(&mut self, text: impl Into<String>) {
		self.draft_solution = text.into();
	}

	/// Current draft solution text.
	pub fn draft_solution(&self) -> &str {
		&self.draft_solution
	}

	/// True while the initial read is outstanding.
	pub fn is_loading(&self) -> bool {
		matches!(self.state, ScreenState::Loading)
	}

	/// Loaded order snapshot, if any.
	pub fn order(&self) -> Option<&Order> {
		self.order.as_ref()
	}

	/// Current screen state.
	pub fn state(&self) -> &ScreenState {
		&self.state
	}

	/// Marks the screen as torn down.
	///
	/// Any read or write completion that lands afterwards leaves the state
	/// untouched.
	pub fn dispose(&mut self) {
		self.disposed = true;
	}

	fn emit(&self, event: ScreenEvent) {
		// The host may already have dropped the receiver during teardown.
		self.events.send(event).ok();
	}
}
