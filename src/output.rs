//! Report Rendering
//!
//! Turns the aggregate views into the human-readable text report. Amount
//! formatting is carried by an explicit [`ReportFormat`] value, so rendering is
//! a pure function of its inputs.

use crate::aggregate::Summary;
use crate::cli::VerbosityLevel;
use crate::employee::Employee;

/// How monetary amounts are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormat {
    /// Digits after the decimal point
    pub precision: usize,
    /// Prefix placed in front of every amount
    pub currency: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            currency: "$".to_string(),
        }
    }
}

impl ReportFormat {
    pub fn amount(&self, value: f64) -> String {
        format!("{}{:.*}", self.currency, self.precision, value)
    }
}

/// Counts carried alongside the summary for verbose output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestCounts {
    pub accepted: usize,
    pub rejected: usize,
}

/// Simple output formatter for human-readable results
pub struct Output {
    format: ReportFormat,
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(format: ReportFormat, verbosity: VerbosityLevel) -> Self {
        Self {
            format,
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = self.show_colors && enabled;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_report(&self, summary: &Summary, counts: IngestCounts) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Average salary: {}\n\n",
            self.format.amount(summary.mean_salary)
        ));

        output.push_str(&self.colorize("Highest paid employee:", "1"));
        output.push('\n');
        output.push_str(&self.format_highest_paid(&summary.highest_paid));
        output.push('\n');

        output.push_str(&self.colorize("Sorted list of employees by ID:", "1"));
        output.push('\n');
        for employee in &summary.sorted {
            output.push_str(&self.format_employee_line(employee));
            output.push('\n');
        }

        if self.verbosity >= VerbosityLevel::Verbose {
            output.push_str(&self.format_counts(counts));
        }

        output
    }

    fn format_highest_paid(&self, employee: &Employee) -> String {
        format!(
            "Name: {}\nID: {}\nDepartment: {}\nSalary: {}\n",
            employee.name,
            employee.id,
            employee.department,
            self.format.amount(employee.salary)
        )
    }

    pub fn format_employee_line(&self, employee: &Employee) -> String {
        format!(
            "Name: {}, ID: {}, Department: {}, Salary: {}",
            employee.name,
            employee.id,
            employee.department,
            self.format.amount(employee.salary)
        )
    }

    fn format_counts(&self, counts: IngestCounts) -> String {
        let mut output = String::from("\n");
        output.push_str(&format!("Records accepted: {}\n", counts.accepted));

        let rejected = format!("Records rejected: {}", counts.rejected);
        if counts.rejected > 0 {
            output.push_str(&self.colorize(&rejected, "33"));
        } else {
            output.push_str(&rejected);
        }
        output.push('\n');

        if self.verbosity == VerbosityLevel::Debug {
            output.push_str(&format!(
                "Records seen: {}\n",
                counts.accepted + counts.rejected
            ));
        }
        output
    }
}
