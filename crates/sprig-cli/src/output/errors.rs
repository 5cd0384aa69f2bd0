//! Error message formatting with actionable suggestions.

use super::colors::ColorSupport;
use sprig_core::error::SprigError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    #[cfg(test)]
    fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its code, a suggestion and the source chain
    pub fn format_error(&self, error: &SprigError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(&format!("[{}]: {}\n", error.code(), error));

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_out_of_sync() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let error = SprigError::LockOutOfSync {
            lockfile: "yarn.lock".to_string(),
            name: "a".to_string(),
            range: "^1.0.0".to_string(),
        };

        let output = formatter.format_error(&error);
        assert!(output.starts_with(
            "error[LOCK_OUT_OF_SYNC]: yarn.lock and package.json out of sync: no entry for a@^1.0.0"
        ));
        assert!(output.contains("help: "));
    }

    #[test]
    fn test_format_source_chain() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let error = SprigError::io(
            "Failed to read package.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );

        let output = formatter.format_error(&error);
        assert!(output.contains("caused by: no such file"));
    }
}
