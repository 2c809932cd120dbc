//! Reference observations loaded by the seed tool.

use chrono::NaiveDate;

use super::{NewEarthquake, SchemaVariant};

/// (name, magnitude, (year, month, day), longitude, latitude)
const REFERENCE: [(&str, f64, (i32, u32, u32), f64, f64); 7] = [
    ("Earthquake 1", 2.2, (2017, 12, 31), -115.139830, 36.169941),
    ("Earthquake 2", 7.0, (2018, 1, 1), -122.419416, 37.774929),
    ("Earthquake 3", 1.8, (2017, 12, 22), -74.005973, 40.712775),
    ("Earthquake 4", 5.2, (2017, 11, 25), -118.243685, 34.052234),
    ("Earthquake 5", 2.9, (2013, 9, 11), -122.676482, 45.523062),
    ("Earthquake 6", 0.6, (2016, 8, 1), -97.743061, 30.267153),
    ("Earthquake 7", 6.6, (2016, 3, 19), -104.990251, 39.739236),
];

/// The seven reference earthquakes, shaped for the given schema variant.
pub fn reference_records(variant: SchemaVariant) -> Vec<NewEarthquake> {
    REFERENCE
        .iter()
        .map(|&(name, magnitude, (y, m, d), longitude, latitude)| {
            let record = NewEarthquake::simple(name, magnitude);
            match variant {
                SchemaVariant::Minimal => record,
                SchemaVariant::Extended => NewEarthquake {
                    occurrence: NaiveDate::from_ymd_opt(y, m, d),
                    ..record.with_location(longitude, latitude)
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_reference_has_no_extended_fields() {
        let records = reference_records(SchemaVariant::Minimal);
        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| r.first_extended_field().is_none()));
    }

    #[test]
    fn test_extended_reference_is_fully_populated() {
        let records = reference_records(SchemaVariant::Extended);
        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| r.occurrence.is_some()
            && r.longitude.is_some()
            && r.latitude.is_some()));
        assert_eq!(records[1].name.as_deref(), Some("Earthquake 2"));
        assert_eq!(records[1].magnitude, Some(7.0));
        assert_eq!(records[1].occurrence, NaiveDate::from_ymd_opt(2018, 1, 1));
    }
}
