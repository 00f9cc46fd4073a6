//! Text report generator.
//!
//! Renders a diff outcome as titled sections of indented lines:
//!
//! ```text
//! Comparing 'hl2 (1)' with 'hl2 (2)'
//! Added classes:
//!   + Weapon
//! Class Player:
//!   Added fields:
//!     + health @ 12
//! ```

use super::{ansi_color, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{AttributeChange, AttributeDelta, ClassFieldChanges, DiffOutcome, DiffResult};
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// A titled group of report lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    /// Lines relative to the title; nested indentation is already applied
    pub lines: Vec<String>,
}

impl ReportSection {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }
}

/// An ordered sequence of report sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Flatten to display lines, indenting section bodies under their titles.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|section| {
                std::iter::once(section.title.clone())
                    .chain(section.lines.iter().map(|line| format!("{INDENT}{line}")))
            })
            .collect()
    }
}

/// Text reporter
pub struct TextReporter {
    /// Use colored section titles
    colored: bool,
}

impl TextReporter {
    /// Create a new text reporter
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

    /// Build the structured report for a diff outcome.
    #[must_use]
    pub fn render(&self, outcome: &DiffOutcome) -> Report {
        match outcome {
            DiffOutcome::Identical { identity } => Report {
                sections: vec![ReportSection::new(format!(
                    "Identical snapshots '{identity}', nothing to compare."
                ))],
            },
            DiffOutcome::Compared(result) => render_result(result),
        }
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn render_result(result: &DiffResult) -> Report {
    let mut sections = vec![ReportSection::new(format!(
        "Comparing '{}' with '{}'",
        result.left.identity(),
        result.right.identity()
    ))];

    if result.classes.is_empty() {
        sections.push(ReportSection::new("No class differences."));
    } else {
        for (title, marker, names) in [
            ("Added classes:", '+', &result.classes.added),
            ("Dropped classes:", '-', &result.classes.dropped),
        ] {
            if names.is_empty() {
                continue;
            }
            let mut section = ReportSection::new(title);
            section
                .lines
                .extend(names.iter().map(|name| format!("{marker} {name}")));
            sections.push(section);
        }
    }

    sections.extend(
        result
            .fields
            .iter()
            .filter(|class| !class.is_empty())
            .map(render_class),
    );

    Report { sections }
}

fn render_class(class: &ClassFieldChanges) -> ReportSection {
    let mut section = ReportSection::new(format!("Class {}:", class.class_name));
    let mut group = |title: &str, lines: Vec<String>| {
        if !lines.is_empty() {
            section.lines.push(title.to_string());
            section
                .lines
                .extend(lines.into_iter().map(|line| format!("{INDENT}{line}")));
        }
    };

    group(
        "Added fields:",
        class
            .added
            .iter()
            .map(|f| format!("+ {} @ {}", f.name, f.offset))
            .collect(),
    );
    group(
        "Dropped fields:",
        class
            .dropped
            .iter()
            .map(|f| format!("- {} @ {}", f.name, f.offset))
            .collect(),
    );
    group(
        "Moved fields:",
        class
            .moved
            .iter()
            .map(|m| format!("~ {}: {} → {}", m.name, m.from_offset, m.to_offset))
            .collect(),
    );
    group(
        "Changed fields:",
        class
            .altered
            .iter()
            .flat_map(|a| a.changes.iter().map(|c| describe_change(&a.name, c)))
            .collect(),
    );

    section
}

fn describe_change(field: &str, change: &AttributeChange) -> String {
    match &change.delta {
        AttributeDelta::Value { before, after } => {
            format!("{field}: {} {before} → {after}", change.attribute)
        }
        AttributeDelta::Presence { .. } => format!("{field}: {change}"),
    }
}

impl ReportGenerator for TextReporter {
    fn generate_diff_report(
        &self,
        outcome: &DiffOutcome,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        if let Some(title) = &config.title {
            writeln!(out, "{}", ansi_color(title, "bold", self.colored))?;
        }
        for section in self.render(outcome).sections {
            writeln!(out, "{}", ansi_color(&section.title, "bold", self.colored))?;
            for line in &section.lines {
                writeln!(out, "{INDENT}{line}")?;
            }
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
