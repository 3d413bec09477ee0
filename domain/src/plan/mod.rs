//! Group plan domain
//!
//! The generative engine is untrusted for both structure and affordability.
//! [`PlanValidator`] is the only way to obtain a [`Plan`]: it recovers a JSON
//! document from free-form text, checks the nine required fields and enforces
//! the budget floor.
//!
//! # Pipeline
//!
//! | Step | Failure |
//! |------|---------|
//! | [`RecoveryStep::Direct`] parse | fall through |
//! | [`RecoveryStep::ExtractObjectSpan`] (first `{` .. last `}`) | `malformed_response` when no span exists |
//! | [`RecoveryStep::StripTrailingCommas`] | `malformed_response` when still unparseable |
//! | schema check in [`REQUIRED_FIELDS`] order | `missing_field:<name>` |
//! | `per_person_total` ≤ budget floor | `budget_exceeded` |

pub mod entities;
pub mod recovery;
pub mod validator;

pub use entities::{BudgetBreakdown, Plan, REQUIRED_FIELDS};
pub use recovery::{RecoveryStep, extract_object_span, recover_document, strip_trailing_commas};
pub use validator::{PlanValidator, validate_plan};
