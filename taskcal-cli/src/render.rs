//! TUI rendering traits for taskcal types.
//!
//! Extension traits adding colored terminal rendering to taskcal-core types
//! using owo_colors.

use owo_colors::OwoColorize;
use taskcal_core::sync::{Action, PlannedChange, SyncPlan, SyncReport};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Action {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            Action::Create { .. } => symbol.green().to_string(),
            Action::Update { .. } => symbol.yellow().to_string(),
            Action::Delete { .. } => symbol.red().to_string(),
            Action::Skip | Action::OutOfWindow | Action::Unchanged { .. } => symbol.to_string(),
        }
    }
}

fn colorize(action: &Action, text: &str) -> String {
    match action {
        Action::Create { .. } => text.green().to_string(),
        Action::Update { .. } => text.yellow().to_string(),
        Action::Delete { .. } => text.red().to_string(),
        Action::Skip | Action::OutOfWindow | Action::Unchanged { .. } => text.dimmed().to_string(),
    }
}

impl Render for PlannedChange {
    fn render(&self) -> String {
        let summary = colorize(&self.action, &self.task.description);
        let detail = match &self.action {
            Action::Create { desired } => desired.start.to_iso_string(),
            Action::Update { desired, drift, .. } => {
                format!("{} ({})", desired.start.to_iso_string(), drift)
            }
            Action::Delete { .. } => "dates cleared".to_string(),
            Action::Skip => "no dates".to_string(),
            Action::OutOfWindow => "outside sync window".to_string(),
            Action::Unchanged { .. } => "up to date".to_string(),
        };

        format!("{} {} {}", self.action.render(), summary, detail.dimmed())
    }
}

impl Render for SyncReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if self.has_changes() {
            lines.push(format!(
                "{} created, {} updated, {} deleted",
                self.created.green(),
                self.updated.yellow(),
                self.deleted.red()
            ));
        } else {
            lines.push("No changes".dimmed().to_string());
        }

        lines.push(
            format!(
                "{} tasks, {} unchanged, {} without dates",
                self.total, self.unchanged, self.skipped
            )
            .dimmed()
            .to_string(),
        );

        if self.failed > 0 {
            lines.push(format!("{} failed", self.failed).red().to_string());
        }

        if self.cancelled {
            lines.push("Cancelled, remaining tasks were not written".yellow().to_string());
        }

        lines.extend(render_warnings(&self.warnings));
        lines.join("\n")
    }
}

fn render_warnings(warnings: &[String]) -> Vec<String> {
    warnings
        .iter()
        .map(|w| format!("{} {}", "!".yellow(), w))
        .collect()
}

/// Threshold for compact view (show counts instead of individual tasks)
const COMPACT_THRESHOLD: usize = 10;

/// Rendering for a dry-run plan, compact unless verbose.
pub trait PlanRender {
    fn render(&self, verbose: bool) -> String;
}

impl PlanRender for SyncPlan {
    fn render(&self, verbose: bool) -> String {
        let mut lines = Vec::new();
        let writes: Vec<&PlannedChange> = self.writes().collect();

        if writes.is_empty() {
            lines.push("No changes".dimmed().to_string());
        } else if verbose || writes.len() <= COMPACT_THRESHOLD {
            for change in &writes {
                lines.push(change.render());
            }
        } else {
            let count = |pred: fn(&Action) -> bool| {
                writes.iter().filter(|c| pred(&c.action)).count()
            };
            let creates = count(|a| matches!(a, Action::Create { .. }));
            let updates = count(|a| matches!(a, Action::Update { .. }));
            let deletes = count(|a| matches!(a, Action::Delete { .. }));

            if creates > 0 {
                lines.push(format!("{} {}", "+".green(), format!("({creates} to create)").green()));
            }
            if updates > 0 {
                lines.push(format!("{} {}", "~".yellow(), format!("({updates} to update)").yellow()));
            }
            if deletes > 0 {
                lines.push(format!("{} {}", "-".red(), format!("({deletes} to delete)").red()));
            }
        }

        if verbose {
            for change in self.changes.iter().filter(|c| !c.action.is_write()) {
                lines.push(change.render());
            }
        }

        lines.extend(render_warnings(&self.warnings));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_report_says_so() {
        let report = SyncReport {
            total: 2,
            created: 1,
            cancelled: true,
            ..SyncReport::default()
        };

        let text = report.render();
        assert!(text.contains("Cancelled"));
        assert!(!SyncReport::default().render().contains("Cancelled"));
    }
}
