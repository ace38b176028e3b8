//! Per-product outcomes of a collection run.

use std::path::PathBuf;

use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Collected {
        /// Footprint points written (0 when coordinates are dropped)
        points: usize,
        record_path: PathBuf,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutcome {
    pub product: String,
    pub outcome: Outcome,
}

impl ProductOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Collected { .. })
    }
}

/// Outcomes in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    pub outcomes: Vec<ProductOutcome>,
    /// Set once the portal catalog has been written
    pub portal_file: Option<PathBuf>,
}

impl CollectionReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ProductOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProductOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    /// One line per failure plus a summary line.
    pub fn log_summary(&self) {
        for outcome in self.failed() {
            if let Outcome::Failed { error } = &outcome.outcome {
                warn!(product = %outcome.product, error = %error, "Product failed");
            }
        }

        info!(
            total = self.outcomes.len(),
            succeeded = self.succeeded().count(),
            failed = self.failed().count(),
            portal = ?self.portal_file,
            "Collection finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitions_outcomes() {
        let report = CollectionReport {
            outcomes: vec![
                ProductOutcome {
                    product: "A".to_string(),
                    outcome: Outcome::Collected {
                        points: 104,
                        record_path: PathBuf::from("out/A/A.json"),
                    },
                },
                ProductOutcome {
                    product: "B".to_string(),
                    outcome: Outcome::Failed {
                        error: "unreachable".to_string(),
                    },
                },
            ],
            portal_file: None,
        };

        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().next().map(|o| o.product.as_str()), Some("B"));
        assert!(report.has_failures());
    }

    #[test]
    fn test_empty_report_has_no_failures() {
        assert!(!CollectionReport::default().has_failures());
    }
}
