//! Free-text vehicle search.
//!
//! A vehicle matches when the lowered query is a substring of its name, its
//! id, or its zone's name. Lowering is Unicode `to_lowercase`, which does not
//! depend on the process locale.

use crate::vehicle::Vehicle;

/// A query lowered once, ready to be matched against many vehicles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    lowered: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            lowered: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }

    /// `zone_name` is `None` when the vehicle's zone reference does not
    /// resolve; the zone clause then simply fails.
    pub fn matches(&self, vehicle: &Vehicle, zone_name: Option<&str>) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        contains_lowered(&vehicle.name, &self.lowered)
            || contains_lowered(vehicle.id.as_str(), &self.lowered)
            || zone_name.is_some_and(|name| contains_lowered(name, &self.lowered))
    }
}

fn contains_lowered(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{GeoPosition, VehicleStatus};

    fn john() -> Vehicle {
        Vehicle::new(
            "TX-042",
            "John Doe",
            "Z1",
            VehicleStatus::Busy,
            GeoPosition::default(),
        )
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(SearchQuery::new("").matches(&john(), None));
    }

    #[test]
    fn test_case_insensitive_name() {
        let v = john();
        assert!(SearchQuery::new("john").matches(&v, None));
        assert!(SearchQuery::new("JOHN").matches(&v, None));
        assert!(SearchQuery::new("n d").matches(&v, None));
    }

    #[test]
    fn test_matches_id() {
        assert!(SearchQuery::new("tx-04").matches(&john(), None));
    }

    #[test]
    fn test_matches_zone_name_only_when_resolved() {
        let v = john();
        assert!(SearchQuery::new("north").matches(&v, Some("Northside")));
        assert!(!SearchQuery::new("north").matches(&v, None));
    }

    #[test]
    fn test_no_match() {
        assert!(!SearchQuery::new("zzz").matches(&john(), Some("North")));
    }

    #[test]
    fn test_unicode_lowering() {
        let v = Vehicle::new(
            "T5",
            "ÉLODIE",
            "Z1",
            VehicleStatus::Available,
            GeoPosition::default(),
        );
        assert!(SearchQuery::new("élodie").matches(&v, None));
        assert!(SearchQuery::new("Élo").matches(&v, Some("Centre")));
    }

    #[test]
    fn test_whitespace_query_is_not_trimmed() {
        let v = john();
        assert!(!SearchQuery::new(" ").is_empty());
        assert!(SearchQuery::new(" ").matches(&v, None));
        assert!(!SearchQuery::new("  john").matches(&v, None));
    }
}
