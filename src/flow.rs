//! Stateful flow controller wrapping the pure transition function.
//!
//! One [`BookingFlow`] instance owns one booking attempt. All state changes
//! are synchronous reactions to `send` calls issued by the host's event
//! loop; asynchronous work (creating the booking, polling for acceptance,
//! settling payment) happens outside and re-enters through `send` once it
//! resolves. The only side effect in here is diagnostic: a structured trace
//! entry per state-changing transition, plus whatever registered observers
//! do with the same record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::BookingContext;
use crate::event::BookingEvent;
use crate::state::BookingState;
use crate::transition::transition;

/// Default number of transition records retained per flow.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// One applied state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: BookingState,
    pub event: BookingEvent,
    pub to: BookingState,
    pub timestamp: DateTime<Utc>,
}

/// Hook invoked after every applied transition.
///
/// Tracing emission is built into the controller; observers exist so hosts
/// and tests can react to transition sequences directly instead of scraping
/// log output.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, record: &TransitionRecord);
}

/// Point-in-time view of a flow for monitoring and host-side persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub flow_id: Uuid,
    pub state: BookingState,
    pub context: BookingContext,
    /// Total applied transitions, including any trimmed out of `history`.
    pub transitions: u64,
    /// When the most recent transition applied, independent of how much
    /// history is retained.
    pub last_transition: Option<DateTime<Utc>>,
}

/// Controller for a single booking's lifecycle.
///
/// Construction seeds the initial `(state, context)` pair (defaulting to
/// `IDLE` and an empty context); everything afterwards flows through `send`.
/// The context is append-only: each send shallow-merges its patch and no
/// transition ever clears a field. [`reset`](BookingFlow::reset) is the one
/// full restart.
pub struct BookingFlow {
    flow_id: Uuid,
    state: BookingState,
    context: BookingContext,
    history: Vec<TransitionRecord>,
    history_limit: usize,
    transitions: u64,
    last_transition: Option<DateTime<Utc>>,
    observers: Vec<Box<dyn TransitionObserver>>,
}

impl std::fmt::Debug for BookingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingFlow")
            .field("flow_id", &self.flow_id)
            .field("state", &self.state)
            .field("context", &self.context)
            .field("history", &self.history)
            .field("transitions", &self.transitions)
            .field("last_transition", &self.last_transition)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    /// Create a flow at `IDLE` with an empty context.
    pub fn new() -> Self {
        Self::with_initial(BookingState::Idle, BookingContext::default())
    }

    /// Create a flow seeded with an explicit starting point, e.g. from
    /// navigation parameters handed over by the host application.
    pub fn with_initial(state: BookingState, context: BookingContext) -> Self {
        Self {
            flow_id: Uuid::new_v4(),
            state,
            context,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            transitions: 0,
            last_transition: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer for applied transitions.
    pub fn with_observer(mut self, observer: Box<dyn TransitionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Cap the retained transition history (oldest records are trimmed).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        let excess = self.history.len().saturating_sub(limit);
        self.history.drain(..excess);
        self
    }

    /// Feed an event without a payload.
    pub fn send(&mut self, event: BookingEvent) -> BookingState {
        self.dispatch(event, None)
    }

    /// Feed an event together with a context patch. The patch is merged
    /// before the transition is computed and sticks even when the event
    /// turns out to be a no-op for the current state.
    pub fn send_with(&mut self, event: BookingEvent, patch: BookingContext) -> BookingState {
        self.dispatch(event, Some(patch))
    }

    /// Feed an event by wire name. Hosts may send any string here: an
    /// unrecognized name is absorbed without complaint, and the payload
    /// merge still happens first.
    pub fn send_named(&mut self, event: &str, patch: Option<BookingContext>) -> BookingState {
        if let Some(patch) = patch {
            self.context.apply(patch);
        }
        match event.parse::<BookingEvent>() {
            Ok(parsed) => self.dispatch(parsed, None),
            Err(_) => {
                debug!(
                    flow_id = %self.flow_id,
                    state = %self.state,
                    event = %event,
                    "unrecognized event ignored"
                );
                self.state
            }
        }
    }

    fn dispatch(&mut self, event: BookingEvent, patch: Option<BookingContext>) -> BookingState {
        if let Some(patch) = patch {
            self.context.apply(patch);
        }

        let next = transition(self.state, event, &self.context);
        if next == self.state {
            debug!(
                flow_id = %self.flow_id,
                state = %self.state,
                event = %event,
                "event ignored in current state"
            );
            return self.state;
        }

        let record = TransitionRecord {
            from: self.state,
            event,
            to: next,
            timestamp: Utc::now(),
        };
        info!(
            flow_id = %self.flow_id,
            from = %record.from,
            event = %record.event,
            to = %record.to,
            "booking state transition"
        );

        self.state = next;
        self.transitions += 1;
        self.last_transition = Some(record.timestamp);
        for observer in &self.observers {
            observer.on_transition(&record);
        }
        if self.history_limit > 0 {
            if self.history.len() >= self.history_limit {
                self.history.remove(0);
            }
            self.history.push(record);
        }

        self.state
    }

    /// Discard the booking and start over at `IDLE` with an empty context.
    ///
    /// A reset flow is a new booking attempt: it gets a fresh `flow_id` and
    /// an empty history. Registered observers stay registered.
    pub fn reset(&mut self) {
        let old = self.flow_id;
        self.flow_id = Uuid::new_v4();
        self.state = BookingState::Idle;
        self.context = BookingContext::default();
        self.history.clear();
        self.transitions = 0;
        self.last_transition = None;
        info!(old_flow_id = %old, flow_id = %self.flow_id, "booking flow reset");
    }

    /// Identifier of this flow instance, used in trace output.
    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BookingState {
        self.state
    }

    /// Current accumulated context.
    pub fn context(&self) -> &BookingContext {
        &self.context
    }

    /// Retained transition records, oldest first.
    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    /// Capture the flow for monitoring or host-side persistence.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            flow_id: self.flow_id,
            state: self.state,
            context: self.context.clone(),
            transitions: self.transitions,
            last_transition: self.last_transition,
        }
    }
}
