use crate::advice::{category_of, Advice, ComprehensiveAdvice, DependencyTrace};
use crate::analysis::{BuildReport, ProjectReport};
use crate::config::IssueCategory;
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Print the path behind each added transitive
    show_traces: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_traces: false }
    }

    pub fn with_traces(mut self, show: bool) -> Self {
        self.show_traces = show;
        self
    }

    pub fn report(&self, report: &BuildReport) -> Result<()> {
        let with_advice: Vec<&ProjectReport> = report
            .projects
            .iter()
            .filter(|p| !p.advice.is_empty())
            .collect();

        if with_advice.is_empty() && report.failures.is_empty() {
            println!("{}", "No dependency issues found!".green().bold());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!(
                "Found {} advice in {} projects:",
                report.advice_count(),
                with_advice.len()
            )
            .yellow()
            .bold()
        );
        println!();

        for project in with_advice {
            self.print_project(project);
            println!();
        }

        if !report.ripples.is_empty() {
            println!("{}", "Ripples:".yellow().bold());
            for ripple in &report.ripples {
                println!("  {} {}", "~".yellow(), ripple);
            }
            println!();
        }

        for failure in &report.failures {
            println!(
                "{} {} ({}): {}",
                "error".red().bold(),
                failure.project.cyan(),
                failure.variant,
                failure.error
            );
        }

        self.print_summary(report);
        Ok(())
    }

    fn print_project(&self, project: &ProjectReport) {
        let advice = &project.advice;
        let header = if advice.should_fail {
            format!("{} {}", advice.project_path.cyan().bold(), "[FAIL]".red().bold())
        } else {
            advice.project_path.cyan().bold().to_string()
        };
        println!("{}", header);

        for (category, items) in group_by_category(advice) {
            println!("  {}", format!("{}:", capitalize(category.as_str())).dimmed());
            for item in items {
                self.print_advice(item, &project.traces);
            }
        }

        if !advice.plugin_advice.is_empty() {
            println!("  {}", "Redundant plugins:".dimmed());
            for plugin in &advice.plugin_advice {
                println!("    {} {}", plugin.plugin_id.white(), plugin.reason.dimmed());
            }
        }
    }

    fn print_advice(&self, item: &Advice, traces: &[DependencyTrace]) {
        let line = match (item.from_configuration(), item.to_configuration()) {
            (Some(from), Some(to)) => format!(
                "{}({}) {}",
                to.green(),
                item.printable_identifier(),
                format!("(was {})", from).dimmed()
            ),
            (Some(from), None) => format!("{}({})", from.red(), item.printable_identifier()),
            (None, Some(to)) => format!("{}({})", to.green(), item.printable_identifier()),
            (None, None) => item.printable_identifier(),
        };
        println!("    {}", line);

        if !item.used_transitive_dependencies().is_empty() {
            let names: Vec<String> = item
                .used_transitive_dependencies()
                .iter()
                .map(|d| d.identifier.to_string())
                .collect();
            println!("      {} supplies {}", "→".dimmed(), names.join(", ").dimmed());
        }

        if self.show_traces && item.is_add() {
            if let Some(trace) = traces.iter().find(|t| &t.dependency == item.identifier()) {
                for path in trace.to_string().lines() {
                    println!("      {} {}", "→".dimmed(), path.dimmed());
                }
            }
        }
    }

    fn print_summary(&self, report: &BuildReport) {
        let mut counts: BTreeMap<IssueCategory, usize> = BTreeMap::new();
        for project in &report.projects {
            for item in &project.advice.dependency_advice {
                *counts.entry(category_of(item)).or_default() += 1;
            }
            if !project.advice.plugin_advice.is_empty() {
                *counts.entry(IssueCategory::RedundantPlugins).or_default() +=
                    project.advice.plugin_advice.len();
            }
        }

        println!("{}", "─".repeat(60).dimmed());
        let parts: Vec<String> = counts
            .iter()
            .map(|(category, count)| format!("{} {}", count, category.as_str()))
            .collect();
        if !parts.is_empty() {
            println!("Summary: {}", parts.join(", "));
        }
        if !report.failures.is_empty() {
            println!(
                "{}",
                format!("{} variants could not be analyzed", report.failures.len()).red()
            );
        }
        if report.should_fail() {
            println!("{}", "Build should fail on this advice".red().bold());
        }
    }
}

fn group_by_category(advice: &ComprehensiveAdvice) -> BTreeMap<IssueCategory, Vec<&Advice>> {
    let mut groups: BTreeMap<IssueCategory, Vec<&Advice>> = BTreeMap::new();
    for item in &advice.dependency_advice {
        groups.entry(category_of(item)).or_default().push(item);
    }
    groups
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
