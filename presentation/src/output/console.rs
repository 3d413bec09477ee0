//! Console output formatter for planning results

use colored::Colorize;
use packvote_application::{GeneratePlanError, GeneratePlanOutput};
use packvote_domain::{Aggregation, DomainError, Plan, Preference};
use serde_json::json;

/// List sections of a plan, in display order
const PLAN_LISTS: [(&str, &str); 4] = [
    ("activities", "Activities"),
    ("food_suggestions", "Food Suggestions"),
    ("optional_addons", "Optional Add-ons"),
    ("travel_tips", "Travel Tips"),
];

/// Formats planning results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format profile, clusters and plan of a generation run
    pub fn format_full(output: &GeneratePlanOutput, members: &[Preference]) -> String {
        let mut text = String::new();

        text.push_str(&Self::header(&format!("PackVote Plan: {}", output.group)));
        text.push('\n');
        text.push_str(&Self::format_profile(&output.aggregation, members));
        text.push_str(&Self::section_header("Plan"));
        text.push_str(&Self::format_plan(&output.plan));
        text.push_str(&format!(
            "\n{} {}   {} {}\n",
            "Attempts:".dimmed(),
            output.attempts,
            "Records cleared:".dimmed(),
            output.cleared
        ));
        text.push_str(&Self::footer());

        text
    }

    /// Format the group profile, analytics and (for larger groups) clusters
    pub fn format_profile(aggregation: &Aggregation, members: &[Preference]) -> String {
        let profile = &aggregation.profile;
        let analytics = &aggregation.analytics;
        let mut text = String::new();

        text.push_str(&Self::section_header("Group Profile"));
        text.push_str(&format!(
            "{} {} ({} members)\n",
            "Tier:".cyan().bold(),
            aggregation.tier,
            analytics.total_members
        ));
        text.push_str(&format!(
            "{} {:.2} (floor {:.2}, max {:.2})\n",
            "Budget:".cyan().bold(),
            profile.budget,
            profile.budget_floor(),
            profile.max_budget
        ));
        text.push_str(&format!(
            "{} {} days ({}-{})\n",
            "Duration:".cyan().bold(),
            profile.duration,
            profile.min_duration,
            profile.max_duration
        ));
        let destination = if profile.has_destination() {
            profile.destination.as_str()
        } else {
            "(no consensus)"
        };
        text.push_str(&format!("{} {}\n", "Destination:".cyan().bold(), destination));
        let shopping: Vec<&str> = profile
            .shopping
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if !shopping.is_empty() {
            text.push_str(&format!("{} {}\n", "Shopping:".cyan().bold(), shopping.join(", ")));
        }

        text.push_str(&Self::section_header("Analytics"));
        text.push_str(&format!(
            "  average budget {:.2}, spread {:.2}\n",
            analytics.avg_budget,
            analytics.budget_spread()
        ));

        if let Some(clusters) = &aggregation.clusters {
            text.push_str(&Self::section_header("Clusters"));
            for cluster in 0..clusters.cluster_count() {
                text.push_str(&format!(
                    "{}\n",
                    format!("── Cluster {} ──", cluster + 1).yellow().bold()
                ));
                for (index, member) in members.iter().enumerate() {
                    if aggregation.cluster_of(index) == Some(cluster) {
                        text.push_str(&format!("  {}. {}\n", index + 1, member.summary()));
                    }
                }
            }
        }

        text
    }

    /// Format a validated plan
    pub fn format_plan(plan: &Plan) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{} {}\n\n",
            "Destination:".green().bold(),
            plan.destination()
        ));
        text.push_str(&format!("{}\n{}\n\n", "Why:".bold(), Self::indent(plan.reason(), "  ")));
        text.push_str(&format!(
            "{}\n{}\n",
            "Fairness:".bold(),
            Self::indent(plan.fairness_explanation(), "  ")
        ));

        let itinerary = plan.lines("itinerary");
        if !itinerary.is_empty() {
            text.push_str(&format!("\n{}\n", "Itinerary:".cyan().bold()));
            for day in &itinerary {
                text.push_str(&format!("  * {}\n", day));
            }
        }

        let breakdown = plan.budget_breakdown();
        text.push_str(&format!("\n{}\n", "Budget (per person):".cyan().bold()));
        for (category, amount) in &breakdown.categories {
            text.push_str(&format!("  {:<20} {:>10.2}\n", category, amount));
        }
        text.push_str(&format!(
            "  {:<20} {:>10.2}\n",
            "total".bold(),
            breakdown.per_person_total.unwrap_or(0.0)
        ));

        for (field, title) in PLAN_LISTS {
            let items = plan.lines(field);
            if items.is_empty() {
                continue;
            }
            text.push_str(&format!("\n{}\n", format!("{}:", title).cyan().bold()));
            for item in items {
                text.push_str(&format!("  * {}\n", item));
            }
        }

        text
    }

    /// Format a generation run as JSON
    pub fn format_json(output: &GeneratePlanOutput) -> String {
        let value = json!({
            "group": output.group,
            "tier": output.aggregation.tier,
            "profile": output.aggregation.profile,
            "analytics": output.aggregation.analytics,
            "clusters": output.aggregation.clusters,
            "plan": output.plan,
            "attempts": output.attempts,
            "cleared": output.cleared,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format an aggregation as JSON (profile command)
    pub fn format_profile_json(aggregation: &Aggregation) -> String {
        serde_json::to_string_pretty(aggregation).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a plan document as JSON
    pub fn format_plan_json(plan: &Plan) -> String {
        serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string())
    }

    /// Human-readable failure with its reason tag
    pub fn format_error(error: &GeneratePlanError) -> String {
        match error.kind() {
            Some(kind) => format!("{} [{}] {}", "Error".red().bold(), kind, error),
            None => format!("{} {}", "Error".red().bold(), error),
        }
    }

    /// Validation failure of a saved response
    pub fn format_domain_error(error: &DomainError) -> String {
        format!("{} [{}] {}", "Rejected".red().bold(), error.kind(), error)
    }

    /// Failure as a JSON object: `{"error": "<tag>", "message": "..."}`
    pub fn format_error_json(kind: Option<String>, message: &str) -> String {
        let value = json!({ "error": kind, "message": message });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
