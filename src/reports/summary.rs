//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ansi_color, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffOutcome, DiffSummary};

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn change_lines(&self, summary: &DiffSummary) -> Vec<String> {
        let counts = [
            (summary.classes_added, "+", "green", ("class", "classes"), "added"),
            (summary.classes_dropped, "-", "red", ("class", "classes"), "dropped"),
            (summary.fields_added, "+", "green", ("field", "fields"), "added"),
            (summary.fields_dropped, "-", "red", ("field", "fields"), "dropped"),
            (summary.fields_moved, "~", "yellow", ("field", "fields"), "moved"),
            (summary.fields_altered, "~", "yellow", ("field", "fields"), "changed"),
        ];
        counts
            .into_iter()
            .filter(|(count, ..)| *count > 0)
            .map(|(count, marker, color, (one, many), verb)| {
                format!(
                    "  {} {} {verb}",
                    self.color(&format!("{marker}{count}"), color),
                    if count == 1 { one } else { many }
                )
            })
            .collect()
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        outcome: &DiffOutcome,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let result = match outcome {
            DiffOutcome::Identical { identity } => {
                return Ok(format!(
                    "{}\n",
                    self.color(
                        &format!("Identical snapshots '{identity}', nothing to compare."),
                        "dim"
                    )
                ));
            }
            DiffOutcome::Compared(result) => result,
        };

        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Datamap Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} → {}",
            self.color("Snapshots:", "cyan"),
            result.left.identity(),
            result.right.identity()
        ));
        lines.push(format!(
            "{}  {} → {} classes, {} → {} fields",
            self.color("Size:", "cyan"),
            result.left.class_count,
            result.right.class_count,
            result.left.field_count,
            result.right.field_count
        ));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        let changes = self.change_lines(&result.summary);
        if changes.is_empty() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        } else {
            lines.extend(changes);
            lines.push(format!(
                "  {} {} classes with field changes",
                self.color("Classes:", "cyan"),
                result.summary.classes_changed
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffResult, SnapshotInfo};

    fn info(version: &str, classes: usize) -> SnapshotInfo {
        SnapshotInfo {
            game_name: "hl2".to_string(),
            game_version: version.to_string(),
            class_count: classes,
            field_count: 10,
        }
    }

    #[test]
    fn test_counts_and_plurals() {
        let mut result = DiffResult::new(info("1", 2), info("2", 4));
        result.classes.added = vec!["Ammo".to_string(), "Weapon".to_string()];
        result.summary = DiffSummary {
            classes_added: 2,
            fields_moved: 1,
            total_changes: 3,
            classes_changed: 1,
            ..DiffSummary::default()
        };

        let text = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&DiffOutcome::Compared(result), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("Snapshots:  hl2 (1) → hl2 (2)"));
        assert!(text.contains("Size:  2 → 4 classes, 10 → 10 fields"));
        assert!(text.contains("+2 classes added"));
        assert!(text.contains("~1 field moved"));
        assert!(!text.contains("dropped"));
    }

    #[test]
    fn test_no_changes() {
        let result = DiffResult::new(info("1", 2), info("2", 2));
        let text = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&DiffOutcome::Compared(result), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("No changes"));
    }

    #[test]
    fn test_identical() {
        let outcome = DiffOutcome::Identical {
            identity: "hl2 (1)".to_string(),
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&outcome, &ReportConfig::default())
            .unwrap();
        assert_eq!(text, "Identical snapshots 'hl2 (1)', nothing to compare.\n");
    }
}
