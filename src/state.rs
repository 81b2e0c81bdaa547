//! Booking lifecycle states.
//!
//! The canonical lifecycle runs IDLE → DRAFT → SEARCHING → BOOKING_CREATED →
//! PROVIDER_MATCHING → PROVIDER_ACCEPTED → PROVIDER_EN_ROUTE →
//! SERVICE_IN_PROGRESS → SERVICE_COMPLETED → PAYMENT_PENDING →
//! PAYMENT_SUCCESS → CLOSED, with CANCEL/TIMEOUT short-circuits defined in
//! [`crate::transition`]. CLOSED is the only terminal state.
//!
//! Older clients persisted a wider vocabulary (CONFIRMED, EN_ROUTE,
//! IN_PROGRESS, COMPLETED, CANCELLED, FAILED, ESTIMATING, REQUESTING). Those
//! names are accepted as parse-time aliases and fold into the canonical
//! states below; nothing in the transition table refers to them and
//! [`Display`](std::fmt::Display) always emits the canonical name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stage of the booking lifecycle.
///
/// Using an enum keeps the transition table exhaustive at compile time and
/// prevents invalid states from entering the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    /// No active booking draft.
    Idle,
    /// User is composing a booking (selecting service/options).
    #[serde(alias = "ESTIMATING")]
    Draft,
    /// Broadcasting/matching in progress ("finding provider" UI).
    #[serde(alias = "REQUESTING")]
    Searching,
    /// Backend has a persisted booking record.
    BookingCreated,
    /// Request broadcast to eligible providers.
    ProviderMatching,
    /// A provider has committed to the job.
    #[serde(alias = "CONFIRMED")]
    ProviderAccepted,
    /// Accepted provider is traveling to the service location.
    #[serde(alias = "EN_ROUTE")]
    ProviderEnRoute,
    /// Work has started at the location.
    #[serde(alias = "IN_PROGRESS")]
    ServiceInProgress,
    /// Work finished, awaiting the invoice/payment step.
    #[serde(alias = "COMPLETED")]
    ServiceCompleted,
    /// Invoice generated, payment not yet settled.
    PaymentPending,
    /// Payment settled.
    PaymentSuccess,
    /// Terminal: booking fully resolved (success or cancelled).
    #[serde(alias = "CANCELLED", alias = "FAILED")]
    Closed,
}

/// Error returned when a state name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized booking state: {0}")]
pub struct StateParseError(pub String);

impl BookingState {
    /// Every canonical state, in lifecycle order.
    pub const ALL: [BookingState; 12] = [
        BookingState::Idle,
        BookingState::Draft,
        BookingState::Searching,
        BookingState::BookingCreated,
        BookingState::ProviderMatching,
        BookingState::ProviderAccepted,
        BookingState::ProviderEnRoute,
        BookingState::ServiceInProgress,
        BookingState::ServiceCompleted,
        BookingState::PaymentPending,
        BookingState::PaymentSuccess,
        BookingState::Closed,
    ];

    /// Canonical wire name for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingState::Idle => "IDLE",
            BookingState::Draft => "DRAFT",
            BookingState::Searching => "SEARCHING",
            BookingState::BookingCreated => "BOOKING_CREATED",
            BookingState::ProviderMatching => "PROVIDER_MATCHING",
            BookingState::ProviderAccepted => "PROVIDER_ACCEPTED",
            BookingState::ProviderEnRoute => "PROVIDER_EN_ROUTE",
            BookingState::ServiceInProgress => "SERVICE_IN_PROGRESS",
            BookingState::ServiceCompleted => "SERVICE_COMPLETED",
            BookingState::PaymentPending => "PAYMENT_PENDING",
            BookingState::PaymentSuccess => "PAYMENT_SUCCESS",
            BookingState::Closed => "CLOSED",
        }
    }

    /// Is this a terminal state (no outgoing transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingState::Closed)
    }

    /// Can the customer still cancel from this state?
    ///
    /// Once work starts (SERVICE_IN_PROGRESS onward) cancellation stops being
    /// a lifecycle transition; any real-world abort past that point is an
    /// operational process outside this machine.
    pub fn supports_cancel(self) -> bool {
        matches!(
            self,
            BookingState::Draft
                | BookingState::Searching
                | BookingState::BookingCreated
                | BookingState::ProviderMatching
                | BookingState::ProviderAccepted
                | BookingState::ProviderEnRoute
        )
    }

    /// Has a provider committed to this booking?
    pub fn provider_assigned(self) -> bool {
        matches!(
            self,
            BookingState::ProviderAccepted
                | BookingState::ProviderEnRoute
                | BookingState::ServiceInProgress
        )
    }

    /// Has work started at the location (service running or settling)?
    pub fn in_service(self) -> bool {
        matches!(
            self,
            BookingState::ServiceInProgress
                | BookingState::ServiceCompleted
                | BookingState::PaymentPending
                | BookingState::PaymentSuccess
        )
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingState {
    type Err = StateParseError;

    /// Parse a canonical state name or a legacy alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s {
            "IDLE" => BookingState::Idle,
            "DRAFT" | "ESTIMATING" => BookingState::Draft,
            "SEARCHING" | "REQUESTING" => BookingState::Searching,
            "BOOKING_CREATED" => BookingState::BookingCreated,
            "PROVIDER_MATCHING" => BookingState::ProviderMatching,
            "PROVIDER_ACCEPTED" | "CONFIRMED" => BookingState::ProviderAccepted,
            "PROVIDER_EN_ROUTE" | "EN_ROUTE" => BookingState::ProviderEnRoute,
            "SERVICE_IN_PROGRESS" | "IN_PROGRESS" => BookingState::ServiceInProgress,
            "SERVICE_COMPLETED" | "COMPLETED" => BookingState::ServiceCompleted,
            "PAYMENT_PENDING" => BookingState::PaymentPending,
            "PAYMENT_SUCCESS" => BookingState::PaymentSuccess,
            "CLOSED" | "CANCELLED" | "FAILED" => BookingState::Closed,
            other => return Err(StateParseError(other.to_string())),
        };
        Ok(state)
    }
}

impl Default for BookingState {
    fn default() -> Self {
        BookingState::Idle
    }
}
