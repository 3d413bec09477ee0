//! Progress reporting for plan generation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use packvote_application::ports::progress::{PlanningPhase, ProgressNotifier};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per phase
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_short_name(phase: &PlanningPhase) -> &'static str {
        match phase {
            PlanningPhase::Aggregation => "Aggregation",
            PlanningPhase::Generation => "Generation",
            PlanningPhase::Validation => "Validation",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &PlanningPhase, attempt: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(phase.as_str());
        if attempt > 1 {
            pb.set_message(format!("(attempt {})", attempt));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_phase_complete(&self, phase: &PlanningPhase, success: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            let name = Self::phase_short_name(phase);
            if success {
                pb.finish_with_message(format!("{} {}", "v".green(), name.green()));
            } else {
                pb.finish_with_message(format!("{} {}", "x".red(), name.red()));
            }
        }
    }

    fn on_retry(&self, next_attempt: u32, max_attempts: u32, reason: &str) {
        let line = format!(
            "{} retrying ({}/{}): {}",
            "!".yellow(),
            next_attempt,
            max_attempts,
            reason
        );
        match self.spinner.lock().ok().and_then(|slot| slot.clone()) {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }
}

/// Simple text-based progress (no spinners), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &PlanningPhase, attempt: u32) {
        if attempt > 1 {
            eprintln!("{} {} (attempt {})", "->".cyan(), phase.as_str().bold(), attempt);
        } else {
            eprintln!("{} {}", "->".cyan(), phase.as_str().bold());
        }
    }

    fn on_phase_complete(&self, phase: &PlanningPhase, success: bool) {
        let name = ProgressReporter::phase_short_name(phase);
        if success {
            eprintln!("  {} {}", "v".green(), name);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), name);
        }
    }

    fn on_retry(&self, next_attempt: u32, max_attempts: u32, reason: &str) {
        eprintln!(
            "  {} retrying ({}/{}): {}",
            "!".yellow(),
            next_attempt,
            max_attempts,
            reason
        );
    }
}
