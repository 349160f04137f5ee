// ── Field-based filter predicates ──
//
// Views filter snapshots in memory without re-querying the API. Matching is
// driven by field name so the same engine serves the device, customer, and
// alarm screens. Filtering never mutates its input.

use crate::model::{Alarm, Customer, Device};

/// A field value exposed for filtering.
///
/// Identity fields surface as `Id` and match by exact parsed-integer
/// equality; everything else matches by case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Id(i64),
}

/// Lookup of an entity's fields by name, for the filter engine.
pub trait FieldLookup {
    /// Value of the named field, or `None` when the entity doesn't carry it.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The secondary status/state text, if the entity has one.
    fn status(&self) -> Option<String> {
        None
    }
}

/// How the primary predicate compares values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Substring,
    Exact,
}

/// A recognized filter configuration: one field predicate plus an optional
/// secondary status predicate. Empty match values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: String,
    pub match_value: String,
    pub mode: MatchMode,
    pub status: String,
}

impl FilterSpec {
    /// Predicate on a single field.
    pub fn field_contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            match_value: value.into(),
            mode: MatchMode::Substring,
            status: String::new(),
        }
    }

    /// Add the secondary status predicate.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// True when no predicate is active — `filter` is then the identity.
    pub fn is_empty(&self) -> bool {
        self.match_value.is_empty() && self.status.is_empty()
    }

    fn field_matches<T: FieldLookup>(&self, record: &T) -> bool {
        if self.match_value.is_empty() {
            return true;
        }
        match record.field(&self.field) {
            Some(FieldValue::Id(id)) => {
                // Id-typed fields: exact equality on the parsed integer, so
                // "42" matches 42 and never 420.
                self.match_value.trim().parse::<i64>() == Ok(id)
            }
            Some(FieldValue::Text(text)) => {
                let text = text.to_lowercase();
                let wanted = self.match_value.to_lowercase();
                match self.mode {
                    MatchMode::Substring => text.contains(&wanted),
                    MatchMode::Exact => text == wanted,
                }
            }
            // Absent fields read as empty text, which only the empty filter
            // matches — and that case returned above.
            None => false,
        }
    }

    fn status_matches<T: FieldLookup>(&self, record: &T) -> bool {
        if self.status.is_empty() {
            return true;
        }
        record
            .status()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&self.status.to_lowercase())
    }
}

/// Compute the filtered view of a collection. Pure: returns a new sequence,
/// the input is untouched.
pub fn filter<T: FieldLookup + Clone>(records: &[T], spec: &FilterSpec) -> Vec<T> {
    records
        .iter()
        .filter(|r| spec.field_matches(*r) && spec.status_matches(*r))
        .cloned()
        .collect()
}

// ── FieldLookup implementations ──────────────────────────────────────

impl FieldLookup for Alarm {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "key" => self.key.clone().map(FieldValue::Text),
            "status" => self.status.clone().map(FieldValue::Text),
            "entityType" => self.entity_type.clone().map(FieldValue::Text),
            "entityId" => self.entity_id.map(FieldValue::Id),
            "severity" => self
                .severity
                .map(|s| FieldValue::Text(s.to_string())),
            _ => None,
        }
    }

    fn status(&self) -> Option<String> {
        self.status.clone()
    }
}

impl FieldLookup for Device {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "deviceId" => self.device_id.map(FieldValue::Id),
            "deviceName" => self.name.clone().map(FieldValue::Text),
            "ssid" => self.ssid.clone().map(FieldValue::Text),
            "macAddress" => self.mac.as_ref().map(|m| FieldValue::Text(m.to_string())),
            "ipAddress" => self.ip.map(|ip| FieldValue::Text(ip.to_string())),
            "codeVersion" => self.code_version.clone().map(FieldValue::Text),
            "applianceState" => self.appliance_state.clone().map(FieldValue::Text),
            _ => None,
        }
    }

    fn status(&self) -> Option<String> {
        Some(self.state.to_string())
    }
}

impl FieldLookup for Customer {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => self.id.map(FieldValue::Id),
            "name" => self.name.clone().map(FieldValue::Text),
            "email" => self.email.clone().map(FieldValue::Text),
            "mobile" => self.mobile.clone().map(FieldValue::Text),
            "code" => self.code.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}
