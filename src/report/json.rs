use crate::analysis::BuildReport;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &BuildReport) -> Result<()> {
        let json = self.render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(&self, report: &BuildReport) -> Result<String> {
        let document = JsonReport {
            version: "1.0",
            total_advice: report.advice_count(),
            should_fail: report.should_fail(),
            report,
        };
        serde_json::to_string_pretty(&document).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_advice: usize,
    should_fail: bool,
    #[serde(flatten)]
    report: &'a BuildReport,
}
