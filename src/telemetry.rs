use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::{self, BookingFlowConfig};
use crate::state::BookingState;

/// Initialize tracing output for a host embedding the flow.
///
/// Honors the observability section of the configuration: `log_level` seeds
/// the filter when `RUST_LOG` is unset, and `json_logs` picks between JSON
/// lines and human-readable output. Call once at startup.
pub fn init_telemetry() -> Result<()> {
    let settings = config::config()
        .map(|c| c.observability.clone())
        .unwrap_or_else(|_| BookingFlowConfig::default().observability);

    if !settings.tracing_enabled {
        return Ok(());
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_level.clone()));

    if settings.json_logs {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter)
            .init();
    }

    tracing::info!("Booking flow telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking external calls (booking RPCs,
/// payment requests) to the flow transitions they eventually trigger
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common booking flow attributes
pub fn create_flow_span(operation: &str, flow_id: Uuid, state: BookingState) -> tracing::Span {
    tracing::info_span!(
        "booking_flow",
        operation = operation,
        flow.id = %flow_id,
        flow.state = %state,
        otel.kind = "internal"
    )
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    // For structured logging, no explicit shutdown needed
    tracing::info!("Booking flow telemetry shutdown complete");
}
