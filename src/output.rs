//! Output formatting for validation outcomes.

use std::io::IsTerminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::outcome::ValidationOutcome;

/// Output format for the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Status line followed by indented diagnostics
    #[default]
    Human,
    /// Pretty-printed `{ valid, result, messages }`
    Json,
}

pub struct Output {
    format: OutputFormat,
    show_colors: bool,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            show_colors: std::io::stdout().is_terminal(),
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.show_colors = false;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_outcome(&self, outcome: &ValidationOutcome) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(outcome)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
            OutputFormat::Human => {
                let label = if outcome.valid {
                    self.colorize("✓ VALID", "32")
                } else {
                    self.colorize("✗ INVALID", "31")
                };

                let mut output = format!("{} (status={})", label, outcome.result);
                for message in &outcome.messages {
                    output.push_str(&format!("\n    {}", message));
                }
                output
            }
        }
    }

    /// Format a failure that produced no outcome (missing runtime, spawn error, ...)
    pub fn format_failure(&self, error: &dyn std::error::Error) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
            OutputFormat::Human => format!("{}  {}", self.colorize("⚠ ERROR", "33"), error),
        }
    }
}
