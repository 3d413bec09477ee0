//! Preference entity

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised when a submission does not describe a usable preference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceError {
    #[error("budget must be a positive amount, got {0}")]
    NonPositiveBudget(f64),

    #[error("duration must be at least one day")]
    ZeroDuration,

    #[error("unknown travel style '{0}' (expected relaxation, adventure, cultural or luxury)")]
    UnknownTravelStyle(String),
}

/// How a member likes to travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum TravelStyle {
    #[default]
    Relaxation,
    Adventure,
    Cultural,
    Luxury,
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Relaxation => "Relaxation",
            TravelStyle::Adventure => "Adventure",
            TravelStyle::Cultural => "Cultural",
            TravelStyle::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TravelStyle {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxation" => Ok(TravelStyle::Relaxation),
            "adventure" => Ok(TravelStyle::Adventure),
            "cultural" => Ok(TravelStyle::Cultural),
            "luxury" => Ok(TravelStyle::Luxury),
            _ => Err(PreferenceError::UnknownTravelStyle(s.to_string())),
        }
    }
}

// Submissions spell styles in any case ("adventure", "Adventure").
impl<'de> Deserialize<'de> for TravelStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One member's trip preference (Entity)
///
/// Budgets are in the member's local currency unit; the destination is an
/// advisory hint, not a vote that binds the group.
///
/// # Example
///
/// ```
/// use packvote_domain::{Preference, TravelStyle};
///
/// let pref = Preference::new(3000.0, "Goa", 4, TravelStyle::Relaxation, "handicrafts").unwrap();
/// assert_eq!(pref.duration, 4);
/// assert!(Preference::new(0.0, "Goa", 4, TravelStyle::Relaxation, "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub budget: f64,
    #[serde(default)]
    pub destination: String,
    pub duration: u32,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default)]
    pub shopping_interest: String,
}

impl Preference {
    /// Create a validated preference
    pub fn new(
        budget: f64,
        destination: impl Into<String>,
        duration: u32,
        travel_style: TravelStyle,
        shopping_interest: impl Into<String>,
    ) -> Result<Self, PreferenceError> {
        let pref = Self {
            budget,
            destination: destination.into().trim().to_string(),
            duration,
            travel_style,
            shopping_interest: shopping_interest.into().trim().to_string(),
        };
        pref.validate()?;
        Ok(pref)
    }

    /// Check the invariants of a record that arrived through deserialization
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if !(self.budget.is_finite() && self.budget > 0.0) {
            return Err(PreferenceError::NonPositiveBudget(self.budget));
        }
        if self.duration == 0 {
            return Err(PreferenceError::ZeroDuration);
        }
        Ok(())
    }

    /// One-line summary used when describing members to the planning engine
    pub fn summary(&self) -> String {
        let destination = if self.destination.is_empty() {
            "no preference"
        } else {
            &self.destination
        };
        let shopping = if self.shopping_interest.is_empty() {
            "none"
        } else {
            &self.shopping_interest
        };
        format!(
            "budget {:.2}, {} days, destination: {}, style: {}, shopping: {}",
            self.budget, self.duration, destination, self.travel_style, shopping
        )
    }
}
