//! Stock movement records.
//!
//! [`RawMovement`] is the record the backend hands us, one per historical
//! stock change. Its serialized form follows the inventory endpoint
//! (`date`, `type`, `quantity_change`, `quantity_before`, `quantity_after`);
//! `at` and `kind` are accepted as aliases.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::time::parse_timestamp;

/// Direction of a stock change.
///
/// Only consumption is outflow. Any other label (`replenishment`, the
/// Italian `rifornimento`/`carico`, or something we have never seen) counts as
/// inflow, so an unexpected label never rejects a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MovementKind {
    Consumption,
    Replenishment,
}

impl MovementKind {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "consumption" | "consumo" | "consume" | "outflow" => MovementKind::Consumption,
            _ => MovementKind::Replenishment,
        }
    }

    pub fn is_consumption(&self) -> bool {
        matches!(self, MovementKind::Consumption)
    }
}

impl From<String> for MovementKind {
    fn from(label: String) -> Self {
        MovementKind::from_label(&label)
    }
}

/// One recorded stock change, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovement {
    #[serde(
        rename = "date",
        alias = "at",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub at: DateTime<Utc>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: MovementKind,
    /// Magnitude of the change. Missing or non-finite values count as zero.
    #[serde(default)]
    pub quantity_change: Option<f64>,
    /// On-hand quantity recorded just before the change.
    #[serde(default)]
    pub quantity_before: Option<f64>,
    /// On-hand quantity recorded just after the change.
    #[serde(default)]
    pub quantity_after: Option<f64>,
}

impl RawMovement {
    pub fn new(at: DateTime<Utc>, kind: MovementKind, quantity_change: f64) -> Self {
        Self {
            at,
            kind,
            quantity_change: Some(quantity_change),
            quantity_before: None,
            quantity_after: None,
        }
    }

    pub fn consumption(at: DateTime<Utc>, quantity: f64) -> Self {
        Self::new(at, MovementKind::Consumption, quantity)
    }

    pub fn replenishment(at: DateTime<Utc>, quantity: f64) -> Self {
        Self::new(at, MovementKind::Replenishment, quantity)
    }

    pub fn with_quantity_before(mut self, quantity: f64) -> Self {
        self.quantity_before = Some(quantity);
        self
    }

    pub fn with_quantity_after(mut self, quantity: f64) -> Self {
        self.quantity_after = Some(quantity);
        self
    }
}

/// Signed quantity change at an instant. Negative for consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMovement {
    pub at: DateTime<Utc>,
    pub delta: f64,
}

fn serialize_timestamp<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Accepts any string [`parse_timestamp`] understands, or epoch milliseconds.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrMillis {
        String(String),
        Millis(i64),
    }

    match StringOrMillis::deserialize(deserializer)? {
        StringOrMillis::String(s) => parse_timestamp(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", s))),
        StringOrMillis::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_labels() {
        assert_eq!(MovementKind::from_label("consumption"), MovementKind::Consumption);
        assert_eq!(MovementKind::from_label("Consumo"), MovementKind::Consumption);
        assert_eq!(MovementKind::from_label("rifornimento"), MovementKind::Replenishment);
        assert_eq!(MovementKind::from_label("replenishment"), MovementKind::Replenishment);
        assert_eq!(MovementKind::from_label("inventory_fix"), MovementKind::Replenishment);
    }

    #[test]
    fn test_deserialize_endpoint_record() {
        let json = r#"{
            "date": "2024-06-01T10:15:00Z",
            "type": "consumo",
            "quantity_change": 2,
            "quantity_before": 12,
            "quantity_after": 10
        }"#;
        let movement: RawMovement = serde_json::from_str(json).unwrap();

        assert_eq!(movement.at, Utc.with_ymd_and_hms(2024, 6, 1, 10, 15, 0).unwrap());
        assert_eq!(movement.kind, MovementKind::Consumption);
        assert_eq!(movement.quantity_change, Some(2.0));
        assert_eq!(movement.quantity_before, Some(12.0));
        assert_eq!(movement.quantity_after, Some(10.0));
    }

    #[test]
    fn test_deserialize_aliases_and_missing_fields() {
        let json = r#"{"at": "2024-06-01 08:00:00", "kind": "replenishment", "quantity_change": null}"#;
        let movement: RawMovement = serde_json::from_str(json).unwrap();

        assert_eq!(movement.at, Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        assert_eq!(movement.kind, MovementKind::Replenishment);
        assert_eq!(movement.quantity_change, None);
        assert_eq!(movement.quantity_before, None);
        assert_eq!(movement.quantity_after, None);
    }

    #[test]
    fn test_deserialize_epoch_millis() {
        let json = r#"{"date": 1717236000000, "type": "consumption", "quantity_change": 1}"#;
        let movement: RawMovement = serde_json::from_str(json).unwrap();
        assert_eq!(movement.at, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let json = r#"{"date": "not a date", "type": "consumption"}"#;
        assert!(serde_json::from_str::<RawMovement>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_endpoint_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let value = serde_json::to_value(RawMovement::consumption(at, 3.0).with_quantity_after(7.0))
            .unwrap();

        assert_eq!(value["date"], "2024-06-01T10:00:00Z");
        assert_eq!(value["type"], "consumption");
        assert_eq!(value["quantity_change"], 3.0);
        assert_eq!(value["quantity_after"], 7.0);
        assert!(value["quantity_before"].is_null());
    }
}
