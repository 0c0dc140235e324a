use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enum representing the lifecycle states of a wash ticket.
///
/// The variant names double as the wire values, both in request/response
/// bodies and in the `status` column of the backing table.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum TicketStatus {
    /// Dropped off, waiting to be washed. Column default for new rows.
    #[default]
    Menunggu,
    /// Wash in progress.
    Proses,
    /// Washed and ready for pickup.
    Selesai,
    /// Picked up by the customer.
    Diambil,
}

/// The `wash_items` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Primary key, assigned by the database. Immutable after creation.
    pub id: Uuid,

    /// Name of the customer who dropped off the pair.
    pub customer_name: String,

    /// Shoe brand, free text.
    pub brand: Option<String>,

    /// Shoe size, free text.
    pub size: Option<String>,

    /// Requested service, free text (e.g. deep clean, repaint).
    pub service_type: Option<String>,

    /// Current lifecycle state.
    pub status: TicketStatus,

    /// Drop-off date as a `YYYY-MM-DD` string.
    pub drop_off_date: Option<String>,

    /// Expected or actual pick-up date as a `YYYY-MM-DD` string.
    pub pick_up_date: Option<String>,

    /// Optional notes associated with the ticket.
    pub notes: Option<String>,

    /// Insertion timestamp, assigned by the database. Sole list sort key.
    pub created_at: DateTime<Utc>,
}

/// Validated write shape for insert and partial update.
///
/// `None` fields are omitted from the serialized body, so a partial update
/// only touches the columns the caller supplied.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TicketPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_off_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_up_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TicketPayload {
    /// True when no field was supplied; the update handlers accept this as a
    /// no-op payload.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn status_round_trips_through_display_and_from_str() {
        for status in TicketStatus::iter() {
            assert_eq!(TicketStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn status_rejects_values_outside_the_enumeration() {
        assert!(TicketStatus::from_str("Washed").is_err());
        assert!(TicketStatus::from_str("menunggu").is_err());
        assert!(TicketStatus::from_str("").is_err());
    }

    #[test]
    fn status_serializes_as_plain_string() {
        assert_eq!(
            serde_json::to_value(TicketStatus::Selesai).unwrap(),
            serde_json::json!("Selesai")
        );
    }

    #[test]
    fn payload_serialization_skips_missing_fields() {
        let payload = TicketPayload {
            status: Some(TicketStatus::Proses),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"status": "Proses"})
        );
        assert!(TicketPayload::default().is_empty());
        assert!(!payload.is_empty());
    }
}
