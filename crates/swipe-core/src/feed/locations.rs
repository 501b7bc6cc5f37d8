use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of drop-off point a donation center is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Ngo,
    RecyclingCenter,
    OldAgeHome,
    School,
}

impl LocationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationType::Ngo => "NGO",
            LocationType::RecyclingCenter => "Recycling Center",
            LocationType::OldAgeHome => "Old Age Home",
            LocationType::School => "School",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = ParseLocationTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "ngo" => Ok(LocationType::Ngo),
            "recycling center" => Ok(LocationType::RecyclingCenter),
            "old age home" => Ok(LocationType::OldAgeHome),
            "school" => Ok(LocationType::School),
            _ => Err(ParseLocationTypeError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocationTypeError(String);

impl fmt::Display for ParseLocationTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown location type '{}'", self.0)
    }
}

impl std::error::Error for ParseLocationTypeError {}

/// One donation or recycling drop-off point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub kind: LocationType,
    pub address: String,
    pub distance_km: f32,
    pub rating: f32,
    pub phone: String,
    pub hours: String,
    pub accepted_items: Vec<String>,
}

/// Searchable directory of nearby drop-off points.
#[derive(Debug, Clone, Default)]
pub struct LocationDirectory {
    locations: Vec<Location>,
}

impl LocationDirectory {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Case-insensitive substring search over name and address, optionally
    /// narrowed to one location type. An empty query matches everything;
    /// `None` leaves every type in.
    pub fn search(&self, query: &str, kind: Option<LocationType>) -> Vec<&Location> {
        let needle = query.to_lowercase();

        self.locations
            .iter()
            .filter(|location| {
                let matches_query = needle.is_empty()
                    || location.name.to_lowercase().contains(&needle)
                    || location.address.to_lowercase().contains(&needle);
                let matches_kind = kind.is_none_or(|k| location.kind == k);
                matches_query && matches_kind
            })
            .collect()
    }

    /// Drop-off points that take a given item category.
    pub fn accepting(&self, item: &str) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|location| {
                location
                    .accepted_items
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(item))
            })
            .collect()
    }
}
