//! Terminal presentation of an order.
//!
//! This is the rendering collaborator of the order screen: everything
//! visual lives here, outside the core crates, and only reads the data the
//! core produces.

use ticket_types::{Order, OrderStatus};

/// Prints an order the way the details screen lays it out.
pub fn print_order(order: &Order) {
	let status_line = match order.status {
		OrderStatus::Open => "IN PROGRESS",
		OrderStatus::Closed => "CLOSED",
	};

	println!("order        {}", order.id);
	println!("status       {}", status_line);
	println!("equipment    Patrimony {}", order.patrimony);
	println!("problem      {}", order.description);
	println!("registered   {}", order.when);
	if let Some(solution) = &order.solution {
		println!("solution     {}", solution);
	}
	if let Some(closed) = &order.closed {
		println!("closed       {}", closed);
	}
}
