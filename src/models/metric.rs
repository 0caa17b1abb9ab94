//! Scored metric model
//!
//! The atomic unit the layout engine arranges: a label, an optional 0-100
//! score, and an optional target description.

use serde::{Deserialize, Serialize};

/// A labeled score as placed on the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredMetric {
    pub label: String,
    pub score: Option<i32>,
    /// e.g. "Target: >70%"
    pub target: Option<String>,
    /// Shown instead of the bare score when present, e.g. "7.4 h"
    pub display: Option<String>,
}

impl ScoredMetric {
    pub fn new(label: &str, score: Option<i32>) -> Self {
        Self {
            label: label.to_string(),
            score,
            target: None,
            display: None,
        }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_display(mut self, display: String) -> Self {
        self.display = Some(display);
        self
    }

    /// Text shown as the metric's value; a dash when nothing is known
    pub fn value_text(&self) -> String {
        match (&self.display, self.score) {
            (Some(display), _) => display.clone(),
            (None, Some(score)) => score.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text_prefers_display() {
        let metric = ScoredMetric::new("TIR", Some(72)).with_display("72%".into());
        assert_eq!(metric.value_text(), "72%");
        assert_eq!(ScoredMetric::new("Sleep", Some(64)).value_text(), "64");
        assert_eq!(ScoredMetric::new("Sleep", None).value_text(), "-");
    }
}
