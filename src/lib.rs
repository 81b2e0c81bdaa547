// Booking Flow Library - Service Booking Lifecycle State Machine
// This exposes the core components for testing and host integration

pub mod config;
pub mod context;
pub mod event;
pub mod flow;
pub mod routing;
pub mod state;
pub mod telemetry;
pub mod transition;

// Re-export key types for easy access
pub use config::{config, init_config, BookingFlowConfig};
pub use context::{BookingContext, PaymentMethod, ProviderProfile, ServiceLocation, ServiceOption};
pub use event::{BookingEvent, EventParseError};
pub use flow::{
    BookingFlow, FlowSnapshot, TransitionObserver, TransitionRecord, DEFAULT_HISTORY_LIMIT,
};
pub use routing::{screen_for, Platform};
pub use state::{BookingState, StateParseError};
pub use telemetry::{
    create_flow_span, generate_correlation_id, init_telemetry, shutdown_telemetry,
};
pub use transition::{legal_events, transition};
