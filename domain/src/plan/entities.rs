//! Plan entity

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use super::recovery::RecoveryStep;

/// Top-level fields every plan must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 9] = [
    "destination",
    "reason",
    "fairness_explanation",
    "itinerary",
    "optional_addons",
    "budget_breakdown",
    "activities",
    "food_suggestions",
    "travel_tips",
];

/// A validated group plan
///
/// Holds the engine's document verbatim (including any extra fields) and
/// exposes typed accessors for the parts the rest of the system reads.
/// Only [`PlanValidator`](super::PlanValidator) constructs plans.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    document: Map<String, Value>,
    recovered_with: RecoveryStep,
}

impl Plan {
    pub(crate) fn new(document: Map<String, Value>, recovered_with: RecoveryStep) -> Self {
        Self {
            document,
            recovered_with,
        }
    }

    pub fn destination(&self) -> &str {
        self.text("destination").unwrap_or_default()
    }

    pub fn reason(&self) -> &str {
        self.text("reason").unwrap_or_default()
    }

    pub fn fairness_explanation(&self) -> &str {
        self.text("fairness_explanation").unwrap_or_default()
    }

    pub fn itinerary(&self) -> &Value {
        self.field("itinerary").unwrap_or(&Value::Null)
    }

    pub fn budget_breakdown(&self) -> BudgetBreakdown {
        self.field("budget_breakdown")
            .map(BudgetBreakdown::from_value)
            .unwrap_or_default()
    }

    /// Raw value of any top-level field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.document.get(name)
    }

    /// Which recovery step produced a parseable document
    pub fn recovered_with(&self) -> RecoveryStep {
        self.recovered_with
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }

    /// Render a list-like field as display lines.
    ///
    /// Arrays yield one line per element; objects yield `key: value` lines;
    /// scalars yield a single line.
    pub fn lines(&self, name: &str) -> Vec<String> {
        match self.field(name) {
            Some(Value::Array(items)) => items.iter().map(display_value).collect(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, display_value(v)))
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![display_value(other)],
        }
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

impl Serialize for Plan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.document.serialize(serializer)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cost summary extracted from a plan's `budget_breakdown`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetBreakdown {
    /// `None` when the engine omitted the total or it was not numeric
    pub per_person_total: Option<f64>,
    /// Category subtotals that parsed as amounts, ordered by key
    pub categories: Vec<(String, f64)>,
}

impl BudgetBreakdown {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let per_person_total = map.get("per_person_total").and_then(parse_amount);
        let categories = map
            .iter()
            .filter(|(key, _)| key.as_str() != "per_person_total")
            .filter_map(|(key, v)| parse_amount(v).map(|amount| (key.clone(), amount)))
            .collect();

        Self {
            per_person_total,
            categories,
        }
    }

    /// Sum of the category subtotals
    pub fn categories_total(&self) -> f64 {
        self.categories.iter().map(|(_, amount)| amount).sum()
    }
}

/// A plain amount with an optional rupee prefix or suffix: `2500`, `"2,500.50"`,
/// `"₹ 3000"`, `"Rs. 5,000"`, `"INR 1,20,000"`, `"3000 INR"`, `"3000/-"`.
static TEXT_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:₹|(?i:rs\.?|inr))?\s*(\d{1,3}(?:,\d{2,3})+|\d+)(\.\d+)?\s*(?:(?i:inr)|/-)?$",
    )
    .expect("amount pattern is valid")
});

/// Read an amount written either as a JSON number or as text such as `"2,500"`
/// or `"₹ 3000"`.
///
/// Text that is not a plain amount (`"5k"`, `"2000-3000"`, prose) yields
/// `None` rather than a guess.
pub(crate) fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let captures = TEXT_AMOUNT.captures(s.trim())?;
            let whole = captures.get(1)?.as_str().replace(',', "");
            let fraction = captures.get(2).map_or("", |m| m.as_str());
            format!("{}{}", whole, fraction)
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_breakdown_from_numbers_and_text() {
        let breakdown = BudgetBreakdown::from_value(&json!({
            "per_person_total": "2,800",
            "stay": 1200,
            "food": "₹ 600",
            "notes": "shared taxi"
        }));

        assert_eq!(breakdown.per_person_total, Some(2800.0));
        assert_eq!(
            breakdown.categories,
            vec![("food".to_string(), 600.0), ("stay".to_string(), 1200.0)]
        );
        assert_eq!(breakdown.categories_total(), 1800.0);
    }

    #[test]
    fn test_budget_breakdown_missing_total() {
        let breakdown = BudgetBreakdown::from_value(&json!({"stay": 100}));
        assert_eq!(breakdown.per_person_total, None);
        assert_eq!(BudgetBreakdown::from_value(&json!("cheap")), BudgetBreakdown::default());
    }

    #[test]
    fn test_parse_amount_rejects_non_numbers() {
        assert_eq!(parse_amount(&json!("about three thousand")), None);
        assert_eq!(parse_amount(&json!(true)), None);
        assert_eq!(parse_amount(&json!(1500.5)), Some(1500.5));
    }

    #[test]
    fn test_parse_amount_accepts_rupee_notations() {
        assert_eq!(parse_amount(&json!("Rs. 5000")), Some(5000.0));
        assert_eq!(parse_amount(&json!("Rs.5,000")), Some(5000.0));
        assert_eq!(parse_amount(&json!("rs 750")), Some(750.0));
        assert_eq!(parse_amount(&json!("INR 1,20,000")), Some(120000.0));
        assert_eq!(parse_amount(&json!("₹2,500.50")), Some(2500.5));
        assert_eq!(parse_amount(&json!("3000 INR")), Some(3000.0));
        assert_eq!(parse_amount(&json!("3000/-")), Some(3000.0));
    }

    #[test]
    fn test_parse_amount_rejects_shorthand_and_ranges() {
        for text in ["5k", "INR 5k", "5.5k", "2000-3000", "-500", "approx 3000", "5,0", "Rs."] {
            assert_eq!(parse_amount(&json!(text)), None, "{text}");
        }
    }

    #[test]
    fn test_lines_for_arrays_objects_and_scalars() {
        let mut document = Map::new();
        document.insert("travel_tips".into(), json!(["Carry cash", "Book early"]));
        document.insert("itinerary".into(), json!({"day_1": "Beach", "day_2": "Fort"}));
        document.insert("optional_addons".into(), json!("Scuba diving"));
        let plan = Plan::new(document, RecoveryStep::Direct);

        assert_eq!(plan.lines("travel_tips"), vec!["Carry cash", "Book early"]);
        assert_eq!(plan.lines("itinerary"), vec!["day_1: Beach", "day_2: Fort"]);
        assert_eq!(plan.lines("optional_addons"), vec!["Scuba diving"]);
        assert!(plan.lines("activities").is_empty());
    }
}
