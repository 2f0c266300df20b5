//! Line protocol spoken by the validation helper on stdout/stderr.
//!
//! `[`-prefixed lines are diagnostics, `result=<TOKEN>` is the terminal
//! status, everything else is noise.

const RESULT_PREFIX: &str = "result=";

/// One classified line of helper output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolLine {
    Diagnostic(String),
    ResultMarker(String),
    Noise(String),
}

impl ProtocolLine {
    pub fn parse(raw: &str) -> Self {
        let line = strip_line_ending(raw);

        if line.starts_with('[') {
            ProtocolLine::Diagnostic(line.to_string())
        } else if let Some(status) = line.strip_prefix(RESULT_PREFIX) {
            ProtocolLine::ResultMarker(status.to_string())
        } else {
            ProtocolLine::Noise(line.to_string())
        }
    }

    /// Decode a raw output chunk; the helper writes UTF-8 but we never fail on bad bytes
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(raw))
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
