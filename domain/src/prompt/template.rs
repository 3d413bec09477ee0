//! Prompt templates for plan generation

use crate::consensus::GroupProfile;
use crate::core::error::DomainError;
use crate::plan::REQUIRED_FIELDS;
use crate::preference::{GroupAnalytics, Preference};

/// Templates for the request sent to the generative planning engine
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the planning engine
    pub fn planning_system() -> &'static str {
        r#"You are a group travel planner. You receive the combined preferences of a travelling group
and produce one fair, affordable plan that every member can join.
The per-person budget floor you are given is a hard limit: the plan's per-person total must never exceed it.
You answer with a single JSON object and nothing else: no prose, no markdown, no code fences."#
    }

    /// User prompt describing the group
    pub fn planning_request(
        profile: &GroupProfile,
        analytics: &GroupAnalytics,
        members: &[Preference],
    ) -> String {
        let destination = if profile.has_destination() {
            profile.destination.as_str()
        } else {
            "no consensus, suggest one"
        };
        let shopping: Vec<&str> = profile
            .shopping
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        let shopping = if shopping.is_empty() {
            "none stated".to_string()
        } else {
            shopping.join(", ")
        };

        let mut prompt = format!(
            r#"Plan a group trip for {members} member(s).

Group consensus:
- Preferred destination: {destination}
- Representative budget per person: {budget:.2}
- Trip length: {duration} days (members asked for between {min_duration} and {max_duration})
- Shopping interests: {shopping}
- Average budget: {avg_budget:.2}, highest budget: {max_budget:.2}

HARD CONSTRAINT (non-negotiable): the per-person total cost must not exceed {floor:.2},
the budget of the most constrained member. Plans above this amount will be rejected.

Member preferences:
"#,
            members = analytics.total_members,
            destination = destination,
            budget = profile.budget,
            duration = profile.duration,
            min_duration = profile.min_duration,
            max_duration = profile.max_duration,
            shopping = shopping,
            avg_budget = analytics.avg_budget,
            max_budget = analytics.max_budget,
            floor = profile.budget_floor(),
        );

        for (i, member) in members.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, member.summary()));
        }

        prompt.push_str(&Self::response_format());
        prompt
    }

    /// Reminder appended when a previous response was rejected
    pub fn retry_reminder(error: &DomainError, min_budget: f64) -> String {
        let correction = match error {
            DomainError::MissingField(field) => {
                format!("Your previous answer was missing the \"{}\" field.", field)
            }
            DomainError::BudgetExceeded {
                per_person_total, ..
            } => format!(
                "Your previous answer cost {:.2} per person. Reduce costs so that budget_breakdown.per_person_total is at most {:.2}.",
                per_person_total, min_budget
            ),
            DomainError::MalformedResponse(_) => {
                "Your previous answer was not a valid JSON object.".to_string()
            }
            DomainError::InsufficientMembers => String::new(),
        };

        format!(
            r#"

IMPORTANT: {correction}
Reply with exactly one JSON object containing all of these fields: {fields}.
Do not add any text before or after the JSON."#,
            correction = correction,
            fields = REQUIRED_FIELDS.join(", "),
        )
    }

    fn response_format() -> String {
        format!(
            r#"
Respond with ONLY a JSON object of this shape:
{{
  "destination": "string",
  "reason": "why this destination suits the group",
  "fairness_explanation": "how the plan balances every member's preferences and budget",
  "itinerary": ["Day 1: ...", "Day 2: ..."],
  "optional_addons": ["extras members with larger budgets can pay for themselves"],
  "budget_breakdown": {{
    "per_person_total": 0,
    "stay": 0,
    "food": 0,
    "transport": 0,
    "activities": 0
  }},
  "activities": ["..."],
  "food_suggestions": ["..."],
  "travel_tips": ["..."]
}}
All {count} fields are required. Amounts are numbers in the members' currency."#,
            count = REQUIRED_FIELDS.len()
        )
    }
}
