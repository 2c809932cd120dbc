//! Earthquake observation types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored earthquake observation.
///
/// Only `magnitude` is guaranteed; the remaining fields depend on the active
/// [`SchemaVariant`](super::SchemaVariant). The `id` is always assigned by the
/// store and never constructed by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub magnitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
}

/// Insert payload: an earthquake record minus its id.
///
/// Every field is optional here; required columns are enforced by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEarthquake {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub occurrence: Option<NaiveDate>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

impl NewEarthquake {
    /// A record carrying only the columns of the minimal schema.
    pub fn simple(name: impl Into<String>, magnitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            magnitude: Some(magnitude),
            ..Self::default()
        }
    }

    /// Attach an occurrence date.
    pub fn with_occurrence(mut self, occurrence: NaiveDate) -> Self {
        self.occurrence = Some(occurrence);
        self
    }

    /// Attach geocoordinates.
    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self
    }

    /// Name of the first populated field that only the extended schema stores.
    pub fn first_extended_field(&self) -> Option<&'static str> {
        if self.occurrence.is_some() {
            Some("occurrence")
        } else if self.longitude.is_some() {
            Some("longitude")
        } else if self.latitude.is_some() {
            Some("latitude")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_omits_absent_optionals() {
        let record = EarthquakeRecord {
            id: None,
            name: Some("Earthquake 1".to_string()),
            magnitude: 2.2,
            occurrence: None,
            longitude: None,
            latitude: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Earthquake 1", "magnitude": 2.2})
        );
    }

    #[test]
    fn test_new_earthquake_accepts_partial_body() {
        let parsed: NewEarthquake =
            serde_json::from_str(r#"{"name":"Quake","occurrence":"2018-01-01"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Quake"));
        assert_eq!(parsed.magnitude, None);
        assert_eq!(parsed.occurrence, NaiveDate::from_ymd_opt(2018, 1, 1));
    }

    #[test]
    fn test_first_extended_field() {
        let simple = NewEarthquake::simple("Quake", 3.0);
        assert_eq!(simple.first_extended_field(), None);

        let located = simple.clone().with_location(-115.1, 36.2);
        assert_eq!(located.first_extended_field(), Some("longitude"));

        let dated = simple.with_occurrence(NaiveDate::from_ymd_opt(2017, 12, 31).unwrap());
        assert_eq!(dated.first_extended_field(), Some("occurrence"));
    }
}
