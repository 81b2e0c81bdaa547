//! Booking lifecycle events.
//!
//! Host applications address events by wire name, but internally they are a
//! closed enum so the transition table can be checked exhaustively. The
//! any-string contract survives at the boundary: an event name that does not
//! parse is absorbed as a no-op by
//! [`BookingFlow::send_named`](crate::flow::BookingFlow::send_named).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An event fed into the booking lifecycle.
///
/// Variants are payload-free; the accompanying context patch travels beside
/// the event in `send_with`, keeping the host-facing `send(event, payload?)`
/// call shape. Only the pairs enumerated in [`crate::transition`] change
/// state; any other `(state, event)` combination is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingEvent {
    /// Begin composing a booking draft.
    Start,
    /// Submit an instant/live request (draft → searching, and the duplicate
    /// in-flight submit at SEARCHING resolves to BOOKING_CREATED).
    SubmitLive,
    /// Customer cancels; only honored in pre-service states.
    Cancel,
    /// Backend confirmed a persisted booking record.
    CreateBooking,
    /// Broadcast of the request to eligible providers began.
    StartMatching,
    /// A provider committed to the job.
    ProviderAccepted,
    /// The accepted provider started traveling.
    ProviderEnRoute,
    /// Work started at the location.
    StartJob,
    /// Work finished.
    CompleteJob,
    /// Invoice generated for the completed job.
    GenerateInvoice,
    /// Host skipped invoicing (fixed-price jobs go straight to payment).
    SkipInvoice,
    /// Payment settled.
    PaymentSuccess,
    /// Resolve a paid booking.
    Close,
    /// Provider matching ran out of time; fired by the host's timer.
    Timeout,
    /// Merge the payload into the context without touching the state.
    UpdateContext,
}

/// Error returned when an event name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized booking event: {0}")]
pub struct EventParseError(pub String);

impl BookingEvent {
    /// Every recognized event.
    pub const ALL: [BookingEvent; 15] = [
        BookingEvent::Start,
        BookingEvent::SubmitLive,
        BookingEvent::Cancel,
        BookingEvent::CreateBooking,
        BookingEvent::StartMatching,
        BookingEvent::ProviderAccepted,
        BookingEvent::ProviderEnRoute,
        BookingEvent::StartJob,
        BookingEvent::CompleteJob,
        BookingEvent::GenerateInvoice,
        BookingEvent::SkipInvoice,
        BookingEvent::PaymentSuccess,
        BookingEvent::Close,
        BookingEvent::Timeout,
        BookingEvent::UpdateContext,
    ];

    /// Canonical wire name for this event.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingEvent::Start => "START",
            BookingEvent::SubmitLive => "SUBMIT_LIVE",
            BookingEvent::Cancel => "CANCEL",
            BookingEvent::CreateBooking => "CREATE_BOOKING",
            BookingEvent::StartMatching => "START_MATCHING",
            BookingEvent::ProviderAccepted => "PROVIDER_ACCEPTED",
            BookingEvent::ProviderEnRoute => "PROVIDER_EN_ROUTE",
            BookingEvent::StartJob => "START_JOB",
            BookingEvent::CompleteJob => "COMPLETE_JOB",
            BookingEvent::GenerateInvoice => "GENERATE_INVOICE",
            BookingEvent::SkipInvoice => "SKIP_INVOICE",
            BookingEvent::PaymentSuccess => "PAYMENT_SUCCESS",
            BookingEvent::Close => "CLOSE",
            BookingEvent::Timeout => "TIMEOUT",
            BookingEvent::UpdateContext => "UPDATE_CONTEXT",
        }
    }
}

impl fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let event = match s {
            "START" => BookingEvent::Start,
            "SUBMIT_LIVE" => BookingEvent::SubmitLive,
            "CANCEL" => BookingEvent::Cancel,
            "CREATE_BOOKING" => BookingEvent::CreateBooking,
            "START_MATCHING" => BookingEvent::StartMatching,
            "PROVIDER_ACCEPTED" => BookingEvent::ProviderAccepted,
            "PROVIDER_EN_ROUTE" => BookingEvent::ProviderEnRoute,
            "START_JOB" => BookingEvent::StartJob,
            "COMPLETE_JOB" => BookingEvent::CompleteJob,
            "GENERATE_INVOICE" => BookingEvent::GenerateInvoice,
            "SKIP_INVOICE" => BookingEvent::SkipInvoice,
            "PAYMENT_SUCCESS" => BookingEvent::PaymentSuccess,
            "CLOSE" => BookingEvent::Close,
            "TIMEOUT" => BookingEvent::Timeout,
            "UPDATE_CONTEXT" => BookingEvent::UpdateContext,
            other => return Err(EventParseError(other.to_string())),
        };
        Ok(event)
    }
}
