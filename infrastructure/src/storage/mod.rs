//! Preference storage adapters
//!
//! Both implement the [`PreferenceRepository`](packvote_application::PreferenceRepository)
//! port. The in-memory store lives for one process; the JSON store persists
//! every group in a single document.

mod json_repository;
mod memory;

pub use json_repository::JsonPreferenceRepository;
pub use memory::InMemoryPreferenceRepository;
