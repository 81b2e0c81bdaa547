//! Router-mapping table consumed by host applications.
//!
//! The flow never navigates. Hosts observe state changes and look up where
//! to land the user; web hosts get a URL path, mobile hosts get a navigator
//! screen name. Every canonical state has an entry on both platforms.

use serde::{Deserialize, Serialize};

use crate::state::BookingState;

/// Host platform the routing table serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Web,
    Mobile,
}

/// Destination screen or URL path for a state on the given platform.
pub fn screen_for(state: BookingState, platform: Platform) -> &'static str {
    match platform {
        Platform::Web => web_path(state),
        Platform::Mobile => mobile_screen(state),
    }
}

fn web_path(state: BookingState) -> &'static str {
    use BookingState as S;
    match state {
        S::Idle => "/services",
        S::Draft => "/booking/new",
        S::Searching
        | S::BookingCreated
        | S::ProviderMatching
        | S::ProviderAccepted
        | S::ProviderEnRoute
        | S::ServiceInProgress => "/booking/live",
        S::ServiceCompleted | S::PaymentPending | S::PaymentSuccess => "/booking/summary",
        S::Closed => "/bookings",
    }
}

fn mobile_screen(state: BookingState) -> &'static str {
    use BookingState as S;
    match state {
        S::Idle | S::Draft => "ServiceSelection",
        S::Searching
        | S::BookingCreated
        | S::ProviderMatching
        | S::ProviderAccepted
        | S::ProviderEnRoute
        | S::ServiceInProgress => "LiveBookingHub",
        S::ServiceCompleted | S::PaymentPending | S::PaymentSuccess => "PostBooking",
        S::Closed => "Bookings",
    }
}
