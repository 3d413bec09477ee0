//! Member preferences
//!
//! A [`Preference`] is one member's submission for a trip. Records are
//! grouped by [`GroupId`] and summarized by [`GroupAnalytics`].

pub mod analytics;
pub mod entities;
pub mod value_objects;

pub use analytics::GroupAnalytics;
pub use entities::{Preference, PreferenceError, TravelStyle};
pub use value_objects::GroupId;
