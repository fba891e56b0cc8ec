//! Comparison report

use std::fmt;

use serde::Serialize;

/// Outcome of comparing two instances. `success` holds exactly when no
/// selected category produced a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub success: bool,
    pub messages: Vec<String>,
}

impl ComparisonReport {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            success: messages.is_empty(),
            messages,
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}
