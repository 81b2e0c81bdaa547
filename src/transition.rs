//! Pure transition function for the booking lifecycle.
//!
//! Everything here is total and side-effect free: no I/O, no logging, no
//! clock, no randomness. A `(state, event)` pair without a rule resolves to
//! the input state unchanged. Events may arrive from asynchronous UI
//! callbacks in any order, so an unexpected event is ordinary traffic, not
//! an error.

use crate::context::BookingContext;
use crate::event::BookingEvent;
use crate::state::BookingState;

/// Compute the next lifecycle state for `(state, event)`.
///
/// Valid transitions:
/// - IDLE: START → DRAFT
/// - DRAFT: SUBMIT_LIVE → SEARCHING; CANCEL → IDLE
/// - SEARCHING: CREATE_BOOKING | SUBMIT_LIVE → BOOKING_CREATED; CANCEL → IDLE
/// - BOOKING_CREATED: START_MATCHING → PROVIDER_MATCHING; CANCEL → CLOSED
/// - PROVIDER_MATCHING: PROVIDER_ACCEPTED → PROVIDER_ACCEPTED;
///   TIMEOUT | CANCEL → CLOSED
/// - PROVIDER_ACCEPTED: PROVIDER_EN_ROUTE → PROVIDER_EN_ROUTE; CANCEL → CLOSED
/// - PROVIDER_EN_ROUTE: START_JOB → SERVICE_IN_PROGRESS; CANCEL → CLOSED
/// - SERVICE_IN_PROGRESS: COMPLETE_JOB → SERVICE_COMPLETED
/// - SERVICE_COMPLETED: GENERATE_INVOICE | SKIP_INVOICE → PAYMENT_PENDING
/// - PAYMENT_PENDING: PAYMENT_SUCCESS → PAYMENT_SUCCESS
/// - PAYMENT_SUCCESS: CLOSE → CLOSED
/// - CLOSED: terminal, absorbs everything
///
/// SEARCHING accepts both CREATE_BOOKING and SUBMIT_LIVE so a caller that
/// double-fires the submit during the asynchronous create-booking round trip
/// lands in the same place instead of an inconsistent one.
///
/// `_context` is part of the contract so future flows can branch on it
/// (scheduled vs. instant paths); the canonical table never consults it.
pub fn transition(
    state: BookingState,
    event: BookingEvent,
    _context: &BookingContext,
) -> BookingState {
    use BookingEvent as E;
    use BookingState as S;

    match (state, event) {
        (S::Idle, E::Start) => S::Draft,

        (S::Draft, E::SubmitLive) => S::Searching,
        (S::Draft, E::Cancel) => S::Idle,

        (S::Searching, E::CreateBooking) | (S::Searching, E::SubmitLive) => S::BookingCreated,
        (S::Searching, E::Cancel) => S::Idle,

        (S::BookingCreated, E::StartMatching) => S::ProviderMatching,
        (S::BookingCreated, E::Cancel) => S::Closed,

        (S::ProviderMatching, E::ProviderAccepted) => S::ProviderAccepted,
        (S::ProviderMatching, E::Timeout) | (S::ProviderMatching, E::Cancel) => S::Closed,

        (S::ProviderAccepted, E::ProviderEnRoute) => S::ProviderEnRoute,
        (S::ProviderAccepted, E::Cancel) => S::Closed,

        (S::ProviderEnRoute, E::StartJob) => S::ServiceInProgress,
        (S::ProviderEnRoute, E::Cancel) => S::Closed,

        (S::ServiceInProgress, E::CompleteJob) => S::ServiceCompleted,

        (S::ServiceCompleted, E::GenerateInvoice) | (S::ServiceCompleted, E::SkipInvoice) => {
            S::PaymentPending
        }

        (S::PaymentPending, E::PaymentSuccess) => S::PaymentSuccess,

        (S::PaymentSuccess, E::Close) => S::Closed,

        // Everything else, including all of CLOSED, is a no-op.
        _ => state,
    }
}

/// The events with a transition rule in `state`, in table order.
///
/// Useful for UI affordances (which buttons to enable) and for verifying
/// that every unlisted event really is a no-op.
pub fn legal_events(state: BookingState) -> &'static [BookingEvent] {
    use BookingEvent as E;
    use BookingState as S;

    match state {
        S::Idle => &[E::Start],
        S::Draft => &[E::SubmitLive, E::Cancel],
        S::Searching => &[E::CreateBooking, E::SubmitLive, E::Cancel],
        S::BookingCreated => &[E::StartMatching, E::Cancel],
        S::ProviderMatching => &[E::ProviderAccepted, E::Timeout, E::Cancel],
        S::ProviderAccepted => &[E::ProviderEnRoute, E::Cancel],
        S::ProviderEnRoute => &[E::StartJob, E::Cancel],
        S::ServiceInProgress => &[E::CompleteJob],
        S::ServiceCompleted => &[E::GenerateInvoice, E::SkipInvoice],
        S::PaymentPending => &[E::PaymentSuccess],
        S::PaymentSuccess => &[E::Close],
        S::Closed => &[],
    }
}
