//! Mutable booking context carried alongside the lifecycle state.
//!
//! The context is one flat record that accumulates over the life of a flow.
//! It is never discriminated by state and never cleared by a transition.
//! Fields persist until overwritten by a later patch or until the owning
//! controller is reset, so consumers must not assume a field was written
//! during the current phase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the customer intends to settle the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on completion.
    Cash,
    /// UPI transfer.
    Upi,
    /// Card/wallet checkout.
    Online,
}

/// The service item picked during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOption {
    pub id: String,
    pub name: String,
    /// Catalog price at selection time; the backend owns the final quote.
    pub price: f64,
}

/// Where the service happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// Identity of the provider matched to the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: String,
    /// Display name; hosts may omit it in early matching payloads.
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Accumulated booking data.
///
/// Every field is optional; a patch is itself a `BookingContext` and
/// [`apply`](BookingContext::apply) overwrites exactly the fields the patch
/// carries, preserving the rest: a shallow spread-style merge. Wire names
/// are camelCase to match the payloads the host applications already
/// exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingContext {
    /// Opaque identifier assigned once the backend persists the booking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<ServiceOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ServiceLocation>,
    /// Requested start time; `None` means an instant/live booking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderProfile>,
    /// Minutes until provider arrival, supplied by matching/tracking.
    #[serde(rename = "eta", skip_serializing_if = "Option::is_none")]
    pub eta_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Display fallback kept for older screens; prefer `selected_option`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Display fallback kept for older screens; prefer `selected_option`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Display fallback kept for older screens; prefer `selected_option`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Last failure note written by the host; the flow never interprets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingContext {
    /// Shallow-merge `patch` into this context.
    ///
    /// Fields the patch carries (`Some`) overwrite; fields it omits are
    /// preserved. There is no way to clear an individual field: a full flow
    /// reset is the only invalidation, matching the append-only contract.
    pub fn apply(&mut self, patch: BookingContext) {
        let BookingContext {
            booking_id,
            service_category,
            selected_option,
            location,
            schedule,
            provider,
            eta_minutes,
            payment_method,
            service_name,
            price,
            image,
            error,
        } = patch;

        if let Some(v) = booking_id {
            self.booking_id = Some(v);
        }
        if let Some(v) = service_category {
            self.service_category = Some(v);
        }
        if let Some(v) = selected_option {
            self.selected_option = Some(v);
        }
        if let Some(v) = location {
            self.location = Some(v);
        }
        if let Some(v) = schedule {
            self.schedule = Some(v);
        }
        if let Some(v) = provider {
            self.provider = Some(v);
        }
        if let Some(v) = eta_minutes {
            self.eta_minutes = Some(v);
        }
        if let Some(v) = payment_method {
            self.payment_method = Some(v);
        }
        if let Some(v) = service_name {
            self.service_name = Some(v);
        }
        if let Some(v) = price {
            self.price = Some(v);
        }
        if let Some(v) = image {
            self.image = Some(v);
        }
        if let Some(v) = error {
            self.error = Some(v);
        }
    }

    /// True when nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        *self == BookingContext::default()
    }
}
