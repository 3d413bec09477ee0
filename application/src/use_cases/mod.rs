//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod clear_group;
pub mod generate_plan;
pub mod group_locks;
pub mod submit_preference;

#[cfg(test)]
pub(crate) mod test_support;
