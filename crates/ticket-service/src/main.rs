//! Main entry point for the ticket order client.
//!
//! This binary provides a terminal client for viewing and closing service
//! orders backed by a pluggable remote document store. It wires
//! configuration, logging, and the gateway backend, then drives the order
//! screen for the requested action.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ticket_config::Config;
use ticket_core::{OrderScreen, ScreenState};
use ticket_gateway::{get_all_implementations, GatewayService};
use ticket_types::{OrderDocument, OrderStatus, ScreenEvent};
use tokio::sync::mpsc;

mod render;

/// Command-line arguments for the ticket client.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// Actions the client can perform on an order.
#[derive(Subcommand, Debug)]
enum Command {
	/// Display a single order
	Show {
		/// Order identifier
		order_id: String,
	},
	/// Close an order with a resolution text
	Close {
		/// Order identifier
		order_id: String,

		/// Resolution text
		#[arg(short, long)]
		solution: String,
	},
	/// Create an open order for demos and tests
	Seed {
		/// Order identifier; a random one is generated when omitted
		#[arg(long)]
		id: Option<String>,

		/// Asset tag of the equipment
		#[arg(long)]
		patrimony: String,

		/// Problem description
		#[arg(long)]
		description: String,
	},
}

/// Main entry point for the ticket client.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads and validates configuration
/// 4. Builds the gateway from the configured backend
/// 5. Dispatches the requested action
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load configuration
	let config = Config::from_file(&args.config)?;
	let backend_names: Vec<&str> = get_all_implementations()
		.into_iter()
		.map(|(name, _)| name)
		.collect();
	config.validate(&backend_names)?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let gateway = Arc::new(build_gateway(&config)?);

	match args.command {
		Command::Show { order_id } => show_order(gateway, &order_id).await,
		Command::Close { order_id, solution } => close_order(gateway, &order_id, &solution).await,
		Command::Seed {
			id,
			patrimony,
			description,
		} => seed_order(gateway, id, patrimony, description).await,
	}
}

/// Creates the gateway service from the configured backend factory.
///
/// The backend's own schema validates its configuration table before the
/// gateway handles any request.
fn build_gateway(config: &Config) -> Result<GatewayService, Box<dyn std::error::Error>> {
	let backend_name = config.gateway.backend.as_str();
	let factory = get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == backend_name)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("unknown gateway backend '{}'", backend_name))?;

	let backend = factory(&config.gateway.config).map_err(|e| {
		tracing::error!(
			component = "gateway",
			implementation = %backend_name,
			error = %e,
			"Failed to create gateway backend"
		);
		format!("failed to create gateway backend '{}': {}", backend_name, e)
	})?;
	backend.config_schema().validate(&config.gateway.config)?;
	tracing::info!(component = "gateway", implementation = %backend_name, "Loaded");

	Ok(GatewayService::new(backend))
}

/// Loads an order and renders it to the terminal.
async fn show_order(
	gateway: Arc<GatewayService>,
	order_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
	let (events_tx, _events_rx) = mpsc::unbounded_channel();
	let mut screen = OrderScreen::new(order_id, gateway, events_tx);
	screen.activate().await;

	if let ScreenState::Error { error } = screen.state() {
		return Err(format!("could not load order {}: {}", order_id, error).into());
	}

	if let Some(order) = screen.order() {
		render::print_order(order);
	}
	Ok(())
}

/// Drives the order screen through a close attempt.
///
/// Relays the screen's user messages to the terminal and reports success
/// through the exit status: the command fails unless the screen signaled
/// navigate-back, which only follows a confirmed write.
async fn close_order(
	gateway: Arc<GatewayService>,
	order_id: &str,
	solution: &str,
) -> Result<(), Box<dyn std::error::Error>> {
	let (events_tx, mut events_rx) = mpsc::unbounded_channel();
	let mut screen = OrderScreen::new(order_id, gateway, events_tx);
	screen.activate().await;

	if let ScreenState::Error { error } = screen.state() {
		return Err(format!("could not load order {}: {}", order_id, error).into());
	}

	screen.set_draft_solution(solution);
	screen.close().await;
	screen.dispose();

	let mut closed = false;
	while let Ok(event) = events_rx.try_recv() {
		match event {
			ScreenEvent::Message(message) => println!("{}", message),
			ScreenEvent::NavigateBack => closed = true,
		}
	}

	if closed {
		Ok(())
	} else {
		Err(format!("order {} was not closed", order_id).into())
	}
}

/// Creates an open order in the store.
///
/// Order creation happens upstream of the order screen in production; this
/// subcommand exists so demos and file-backend setups have something to
/// show and close.
async fn seed_order(
	gateway: Arc<GatewayService>,
	id: Option<String>,
	patrimony: String,
	description: String,
) -> Result<(), Box<dyn std::error::Error>> {
	let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
	let document = OrderDocument {
		patrimony,
		description,
		status: OrderStatus::Open,
		created_at: gateway.server_time(),
		closed_at: None,
		solution: None,
	};

	gateway.create_order(&id, &document).await?;
	println!("{}", id);
	Ok(())
}
