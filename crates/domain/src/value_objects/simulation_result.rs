use crate::value_objects::percentage::signed_percent_label;
use serde::{Deserialize, Serialize};

/// Outcome of one scenario's Monte Carlo path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario_name: String,
    pub final_price: f64,
    /// Running maximum over the whole path, start price included.
    pub max_price: f64,
    /// Running minimum over the whole path, start price included.
    pub min_price: f64,
    /// Effective volatility used for the scenario, in percent.
    pub volatility_percent: f64,
    pub roi_percent: f64,
}

impl SimulationResult {
    /// True when the path ended at or above its start.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.roi_percent >= 0.0
    }

    /// ROI formatted like `+4.1%`.
    pub fn roi_label(&self) -> String {
        signed_percent_label(self.roi_percent)
    }

    /// Distance between the running extrema.
    #[must_use]
    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }
}

/// Ordered results of a full run, plus cross-scenario summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub results: Vec<SimulationResult>,
}

impl SimulationReport {
    pub fn new(results: Vec<SimulationResult>) -> Self {
        Self { results }
    }

    /// Scenario with the highest ROI.
    pub fn best(&self) -> Option<&SimulationResult> {
        self.results
            .iter()
            .max_by(|a, b| a.roi_percent.total_cmp(&b.roi_percent))
    }

    /// Scenario with the lowest ROI.
    pub fn worst(&self) -> Option<&SimulationResult> {
        self.results
            .iter()
            .min_by(|a, b| a.roi_percent.total_cmp(&b.roi_percent))
    }

    /// Mean ROI across scenarios, zero for an empty report.
    #[must_use]
    pub fn mean_roi(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.results.iter().map(|r| r.roi_percent).sum::<f64>() / self.results.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, roi: f64) -> SimulationResult {
        SimulationResult {
            scenario_name: name.to_string(),
            final_price: 2000.0 * (1.0 + roi / 100.0),
            max_price: 2200.0,
            min_price: 1900.0,
            volatility_percent: 15.0,
            roi_percent: roi,
        }
    }

    #[test]
    fn test_roi_label_and_gain() {
        let up = result("Bull Market", 4.12);
        assert!(up.is_gain());
        assert_eq!(up.roi_label(), "+4.1%");

        let down = result("Bear Market", -2.0);
        assert!(!down.is_gain());
        assert_eq!(down.roi_label(), "-2.0%");
        assert_eq!(down.price_range(), 300.0);
    }

    #[test]
    fn test_report_best_worst_mean() {
        let report = SimulationReport::new(vec![
            result("Bull Market", 5.0),
            result("Bear Market", -3.0),
            result("Market Crash", -10.0),
        ]);

        assert_eq!(report.best().unwrap().scenario_name, "Bull Market");
        assert_eq!(report.worst().unwrap().scenario_name, "Market Crash");
        assert!((report.mean_roi() - (-8.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report() {
        let report = SimulationReport::new(Vec::new());
        assert!(report.best().is_none());
        assert_eq!(report.mean_roi(), 0.0);
    }
}
