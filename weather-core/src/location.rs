use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::WeatherError;

/// A named point on the map, in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

/// Locations every registry starts with.
const BUILTIN_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Stavanger", 58.9700, 5.7331),
    ("Oslo", 59.9139, 10.7522),
    ("Bergen", 60.3913, 5.3221),
];

/// Name → coordinates lookup table.
///
/// Read-only once the server is running; extra entries come from the
/// `[locations]` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    entries: HashMap<String, Location>,
}

impl LocationRegistry {
    /// Registry holding only the built-in Norwegian cities.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for (name, lat, lon) in BUILTIN_LOCATIONS {
            registry.insert(Location::new(*name, *lat, *lon));
        }
        registry
    }

    /// Add a location, replacing any entry with the same name.
    pub fn insert(&mut self, location: Location) {
        self.entries.insert(location.name.clone(), location);
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Result<&Location, WeatherError> {
        self.entries
            .get(name)
            .ok_or_else(|| WeatherError::UnknownLocation(name.to_string()))
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_oslo() {
        let registry = LocationRegistry::builtin();
        let oslo = registry.resolve("Oslo").expect("Oslo is built in");
        assert_eq!(oslo.latitude, 59.9139);
        assert_eq!(oslo.longitude, 10.7522);
    }

    #[test]
    fn unknown_location_error_contains_name() {
        let registry = LocationRegistry::builtin();
        let err = registry.resolve("Nowhere").unwrap_err();
        assert!(matches!(err, WeatherError::UnknownLocation(ref n) if n == "Nowhere"));
        assert!(err.to_string().contains("Nowhere"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = LocationRegistry::builtin();
        assert!(registry.resolve("oslo").is_err());
        assert!(registry.resolve("Oslo ").is_err());
    }

    #[test]
    fn insert_extends_and_replaces() {
        let mut registry = LocationRegistry::builtin();
        assert_eq!(registry.len(), 3);

        registry.insert(Location::new("Tromsø", 69.6492, 18.9553));
        registry.insert(Location::new("Oslo", 1.0, 2.0));

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.resolve("Oslo").unwrap().latitude, 1.0);
        assert_eq!(registry.names(), vec!["Bergen", "Oslo", "Stavanger", "Tromsø"]);
    }
}
