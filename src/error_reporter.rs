use crate::cli::VerbosityLevel;
use crate::error::{AppError, IngestError};

/// Error reporter with configurable verbosity
pub struct ErrorReporter {
    verbosity: VerbosityLevel,
    show_timestamps: bool,
}

impl ErrorReporter {
    /// Create a new error reporter with specified verbosity
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_timestamps: false,
        }
    }

    /// Create a new error reporter with additional options
    pub fn with_options(verbosity: VerbosityLevel, show_timestamps: bool) -> Self {
        Self {
            verbosity,
            show_timestamps,
        }
    }

    /// Report a fatal error to stderr with appropriate verbosity
    pub fn report(&self, error: &AppError) {
        eprintln!("{}", self.format_error(error));
    }

    /// Report the usage message for a missing input path
    pub fn report_usage(&self, usage: &str) {
        eprintln!("{}", usage.trim_end());
    }

    pub fn format_error(&self, error: &AppError) -> String {
        match self.verbosity {
            VerbosityLevel::Quiet => self.format_error_brief(error),
            VerbosityLevel::Normal => self.format_error_normal(error),
            VerbosityLevel::Verbose => self.format_error_verbose(error),
            VerbosityLevel::Debug => self.format_error_debug(error),
        }
    }

    /// Format error for brief output (quiet mode)
    fn format_error_brief(&self, error: &AppError) -> String {
        match error {
            AppError::Ingest(ingest) => format!("ERROR: {}", ingest.path().display()),
            AppError::UnsupportedFormat { path } => format!("UNSUPPORTED: {}", path.display()),
            AppError::NoRecords { path } => format!("EMPTY: {}", path.display()),
            AppError::Config(_) => format!("ERROR: {}", error),
        }
    }

    /// Format error for normal output
    fn format_error_normal(&self, error: &AppError) -> String {
        let timestamp = if self.show_timestamps {
            format!("[{}] ", chrono::Utc::now().format("%H:%M:%S"))
        } else {
            String::new()
        };

        format!("{}Error: {}", timestamp, error)
    }

    /// Format error for verbose output
    fn format_error_verbose(&self, error: &AppError) -> String {
        let mut output = self.format_error_normal(error);
        output.push_str("\nSuggestion: ");
        output.push_str(self.suggestion(error));
        output
    }

    /// Format error for debug output
    fn format_error_debug(&self, error: &AppError) -> String {
        let mut output = self.format_error_verbose(error);
        output.push_str(&format!("\nDebug Info: {:?}", error));

        output.push_str("\nError Chain:");
        let mut current_error: &dyn std::error::Error = error;
        let mut level = 0;
        while let Some(source) = current_error.source() {
            output.push_str(&format!("\n  {}: {}", level + 1, source));
            current_error = source;
            level += 1;
        }

        output
    }

    fn suggestion(&self, error: &AppError) -> &'static str {
        match error {
            AppError::Ingest(IngestError::Io { .. }) => {
                "Check that the file exists and is readable"
            }
            AppError::Ingest(IngestError::Parse { .. }) => {
                "Check the file syntax; it must be well-formed JSON or XML"
            }
            AppError::Ingest(IngestError::Schema { .. }) => {
                "Check the document layout (--layout, --collection-key, --xml-root)"
            }
            AppError::Config(_) => {
                "Check the configuration file and EMPLOYEE_REPORT_* environment variables"
            }
            AppError::UnsupportedFormat { .. } => {
                "Pass a file whose name contains .json or .xml"
            }
            AppError::NoRecords { .. } => {
                "Every record was rejected or the collection is empty; see the warnings above, or use --lenient"
            }
        }
    }
}
