use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::schema::TableKind;

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Individual validation check result
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Table the check ran against
    pub table: TableKind,
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(table: TableKind, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(table: TableKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(table: TableKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Integrity report over the tables of a snapshot
#[derive(Debug)]
pub struct ValidationReport {
    /// List of individual validation check results
    pub checks: Vec<ValidationCheck>,
    /// What was validated (data directory or table list)
    pub source: String,
}

impl ValidationReport {
    /// Create an empty report for the given source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            source: source.into(),
        }
    }

    /// Add a validation check result to the report
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    /// Count the number of successful checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    /// Count the number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Tables that have at least one check, in first-check order
    pub fn tables(&self) -> Vec<TableKind> {
        let mut tables: Vec<TableKind> = Vec::new();
        for check in &self.checks {
            if !tables.contains(&check.table) {
                tables.push(check.table);
            }
        }
        tables
    }

    /// Checks that ran against one table
    pub fn checks_for(&self, table: TableKind) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(move |c| c.table == table)
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Snapshot Validation Report").bold().cyan()));
            output.push_str(&format!("{}: {}\n", style("Source").bold(), self.source));

            for table in self.tables() {
                output.push_str(&format!("\n{}\n", style(format!("[{}]", table)).bold()));
                for check in self.checks_for(table) {
                    let line = format!("  {} {}", check.status.symbol(), check.name);
                    match &check.status {
                        CheckStatus::Ok => output.push_str(&format!("{}\n", style(line).green())),
                        CheckStatus::Warning(msg) => output.push_str(&format!(
                            "{} - {}\n",
                            style(line).yellow(),
                            msg
                        )),
                        CheckStatus::Failed(msg) => output.push_str(&format!(
                            "{} - {}\n",
                            style(line).red().bold(),
                            msg
                        )),
                    }
                }
            }

            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));

            let verdict = if self.has_failures() {
                style(self.verdict()).red().bold()
            } else if self.has_warnings() {
                style(self.verdict()).yellow().bold()
            } else {
                style(self.verdict()).green().bold()
            };
            output.push_str(&format!("{}\n", verdict));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Snapshot Validation Report")?;
        writeln!(f, "Source: {}", self.source)?;

        for table in self.tables() {
            writeln!(f)?;
            writeln!(f, "[{}]", table)?;
            for check in self.checks_for(table) {
                write!(f, "  {} {}", check.status.symbol(), check.name)?;
                match &check.status {
                    CheckStatus::Ok => writeln!(f)?,
                    CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                    CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
                }
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f, "{}", self.verdict())
    }
}
