//! Request-body validation for ticket writes.
//!
//! Bodies arrive as arbitrary JSON; validation walks the recognized fields
//! and either produces a normalized [`TicketPayload`] or reports every
//! violated field at once. Unrecognized fields are dropped silently.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{TicketPayload, TicketStatus};

/// Per-field validation failures: field name mapped to the reason codes it
/// violated, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn push(&mut self, field: &str, reason: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(reason.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reasons recorded for one field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Validates a create request: `customer_name` is required and non-empty,
/// everything else optional.
pub fn parse_create(body: &Value) -> Result<TicketPayload, FieldErrors> {
    parse(body, Mode::Create)
}

/// Validates a partial update: same per-field rules as create, but every
/// field is optional. An empty body yields a no-op payload.
pub fn parse_update(body: &Value) -> Result<TicketPayload, FieldErrors> {
    parse(body, Mode::Update)
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Create,
    Update,
}

fn parse(body: &Value, mode: Mode) -> Result<TicketPayload, FieldErrors> {
    let mut errors = FieldErrors::default();

    let Some(map) = body.as_object() else {
        errors.push("body", "expected a JSON object");
        return Err(errors);
    };

    let customer_name = text_field(map, "customer_name", &mut errors);
    if mode == Mode::Create && !map.contains_key("customer_name") {
        errors.push("customer_name", "required");
    }
    if customer_name.as_deref() == Some("") {
        errors.push("customer_name", "must not be empty");
    }

    let payload = TicketPayload {
        customer_name,
        brand: text_field(map, "brand", &mut errors),
        size: text_field(map, "size", &mut errors),
        service_type: text_field(map, "service_type", &mut errors),
        status: status_field(map, &mut errors),
        drop_off_date: text_field(map, "drop_off_date", &mut errors),
        pick_up_date: text_field(map, "pick_up_date", &mut errors),
        notes: text_field(map, "notes", &mut errors),
    };

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(errors)
    }
}

/// A recognized text field must be a JSON string when supplied. `null` counts
/// as a wrong type, matching the write shape (absent, not null, means
/// "leave unchanged").
fn text_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match map.get(field) {
        None => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.push(field, "expected a string");
            None
        }
    }
}

fn status_field(map: &Map<String, Value>, errors: &mut FieldErrors) -> Option<TicketStatus> {
    match map.get("status") {
        None => None,
        Some(Value::String(raw)) => match TicketStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", "invalid status value");
                None
            }
        },
        Some(_) => {
            errors.push("status", "expected a string");
            None
        }
    }
}
