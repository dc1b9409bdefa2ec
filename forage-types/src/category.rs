//! The closed set of amenity categories a catalog entry may carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amenity kinds accepted into the catalog.
///
/// Parsed from the `amenity` tag of a raw record. Anything outside this set is
/// excluded from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Pub,
    FastFood,
    Cafe,
    Bar,
    IceCream,
    Cinema,
    EventsVenue,
    Theatre,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Restaurant,
        Category::Pub,
        Category::FastFood,
        Category::Cafe,
        Category::Bar,
        Category::IceCream,
        Category::Cinema,
        Category::EventsVenue,
        Category::Theatre,
    ];

    /// The tag value this category is spelled as.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Pub => "pub",
            Category::FastFood => "fast_food",
            Category::Cafe => "cafe",
            Category::Bar => "bar",
            Category::IceCream => "ice_cream",
            Category::Cinema => "cinema",
            Category::EventsVenue => "events_venue",
            Category::Theatre => "theatre",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag value does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported category: {:?}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Matches the exact lowercase tag spelling; OSM tag values are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
