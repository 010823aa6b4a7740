//! Types that mirror the metrics service JSON schema.
//!
//! Every field is optional on the wire. Absent and `null` values collapse to
//! the defaults here so the rest of the crate never re-checks them.

use std::fmt;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    #[serde(default, deserialize_with = "null_default")]
    pub device_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub device_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub is_online: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub ram: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub disk: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub battery: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub is_plugged: bool,
    // display-only, never parsed
    #[serde(default)]
    pub last_seen: Option<serde_json::Value>,
}

impl DeviceSnapshot {
    /// Name shown in the section title; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.device_name.is_empty() {
            &self.device_id
        } else {
            &self.device_name
        }
    }

    pub fn last_seen_text(&self) -> String {
        match &self.last_seen {
            None | Some(serde_json::Value::Null) => "unknown".into(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// X-axis key of a history sample. The service sends either epoch numbers or
/// preformatted clock strings; both are only ever displayed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TimeKey {
    Number(serde_json::Number),
    Text(String),
}

impl Default for TimeKey {
    fn default() -> Self {
        TimeKey::Text(String::new())
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeKey::Number(n) => write!(f, "{n}"),
            TimeKey::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct HistoryPoint {
    #[serde(default, deserialize_with = "null_default")]
    pub time: TimeKey,
    #[serde(default, deserialize_with = "null_default")]
    pub ram: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub battery: f64,
}

fn null_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let d: DeviceSnapshot = serde_json::from_str(r#"{"device_id":"d1"}"#).unwrap();
        assert_eq!(d.device_id, "d1");
        assert_eq!(d.ram, 0.0);
        assert_eq!(d.disk, 0.0);
        assert_eq!(d.battery, 0.0);
        assert!(!d.is_online);
        assert!(!d.is_plugged);
        assert_eq!(d.last_seen_text(), "unknown");
        assert_eq!(d.display_name(), "d1");
    }

    #[test]
    fn null_fields_take_defaults() {
        let d: DeviceSnapshot = serde_json::from_str(
            r#"{"device_id":"d2","device_name":null,"is_online":null,"ram":null,"battery":null,"last_seen":null}"#,
        )
        .unwrap();
        assert_eq!(d.device_name, "");
        assert!(!d.is_online);
        assert_eq!(d.ram, 0.0);
        assert_eq!(d.last_seen_text(), "unknown");
    }

    #[test]
    fn full_snapshot_parses() {
        let d: DeviceSnapshot = serde_json::from_str(
            r#"{"device_id":"d1","device_name":"Phone","is_online":true,"ram":42.5,
                "disk":70,"battery":88,"is_plugged":true,"last_seen":"12:00"}"#,
        )
        .unwrap();
        assert_eq!(d.display_name(), "Phone");
        assert!(d.is_online && d.is_plugged);
        assert_eq!(d.ram, 42.5);
        assert_eq!(d.disk, 70.0);
        assert_eq!(d.last_seen_text(), "12:00");
    }

    #[test]
    fn last_seen_non_string_is_shown_as_json() {
        let d: DeviceSnapshot = serde_json::from_str(r#"{"last_seen":1700000000}"#).unwrap();
        assert_eq!(d.last_seen_text(), "1700000000");
    }

    #[test]
    fn history_time_accepts_numbers_and_strings() {
        let pts: Vec<HistoryPoint> = serde_json::from_str(
            r#"[{"time":"10:00:05","ram":40,"battery":90},{"time":17,"ram":41.5},{"ram":1}]"#,
        )
        .unwrap();
        assert_eq!(pts[0].time.to_string(), "10:00:05");
        assert_eq!(pts[1].time.to_string(), "17");
        assert_eq!(pts[1].battery, 0.0);
        assert_eq!(pts[2].time, TimeKey::default());
    }
}
