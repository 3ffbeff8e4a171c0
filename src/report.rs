use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::TimeUnit;

/// Elapsed times in seconds, in iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    values: Vec<f64>,
}

impl Samples {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            values: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, secs: f64) {
        self.values.push(secs);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean, or `None` for an empty series.
    pub fn summarize(&self) -> Option<Summary> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(Summary {
            runs: self.values.len(),
            mean_secs: sum / self.values.len() as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub runs: usize,
    pub mean_secs: f64,
}

/// Outcome of a complete, successful benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub samples: Samples,
    pub summary: Summary,
}

/// `Run <i>/<N>: <value> <unit>`
pub fn format_run_line(iteration: usize, runs: usize, secs: f64, unit: TimeUnit) -> String {
    format!(
        "Run {}/{}: {:.2} {}",
        iteration,
        runs,
        unit.from_seconds(secs),
        unit.label()
    )
}

/// `Average over <N> runs: <value> <unit>`
pub fn format_summary_line(summary: &Summary, unit: TimeUnit) -> String {
    format!(
        "Average over {} runs: {:.2} {}",
        summary.runs,
        unit.from_seconds(summary.mean_secs),
        unit.label()
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: usize,
    unit: &'static str,
    samples: Vec<f64>,
    samples_seconds: &'a [f64],
    average: f64,
    average_seconds: f64,
    started_at: String,
}

pub fn format_json(report: &Report, unit: TimeUnit, started_at: DateTime<Utc>) -> String {
    let json = JsonReport {
        runs: report.summary.runs,
        unit: unit.label(),
        samples: report
            .samples
            .as_slice()
            .iter()
            .map(|&s| unit.from_seconds(s))
            .collect(),
        samples_seconds: report.samples.as_slice(),
        average: unit.from_seconds(report.summary.mean_secs),
        average_seconds: report.summary.mean_secs,
        started_at: started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    };

    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> Samples {
        let mut s = Samples::with_capacity(values.len());
        for &v in values {
            s.push(v);
        }
        s
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-18T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(Samples::default().summarize().is_none());
    }

    #[test]
    fn mean_of_one_sample_is_itself() {
        let summary = samples(&[0.25]).summarize().unwrap();
        assert_eq!(summary.runs, 1);
        assert_eq!(summary.mean_secs, 0.25);
    }

    #[test]
    fn mean_is_sum_over_count() {
        let values = [0.1, 0.2, 0.35, 0.05];
        let summary = samples(&values).summarize().unwrap();
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert_eq!(summary.runs, 4);
        assert!((summary.mean_secs - expected).abs() < 1e-12);
    }

    #[test]
    fn run_line_seconds() {
        assert_eq!(format_run_line(1, 3, 1.0, TimeUnit::Seconds), "Run 1/3: 1.00 s");
    }

    #[test]
    fn run_line_rounds_to_two_places() {
        assert_eq!(
            format_run_line(2, 10, 0.126, TimeUnit::Seconds),
            "Run 2/10: 0.13 s"
        );
    }

    #[test]
    fn run_line_microseconds() {
        assert_eq!(
            format_run_line(1, 3, 1.0, TimeUnit::Microseconds),
            "Run 1/3: 1000000.00 µs"
        );
        assert_eq!(
            format_run_line(4, 4, 0.000_25, TimeUnit::Microseconds),
            "Run 4/4: 250.00 µs"
        );
    }

    #[test]
    fn microsecond_display_is_seconds_times_a_million() {
        for secs in [0.0, 0.5, 1.25, 3.0, 42.0] {
            let shown_s: f64 = format_run_line(1, 1, secs, TimeUnit::Seconds)
                .trim_start_matches("Run 1/1: ")
                .trim_end_matches(" s")
                .parse()
                .unwrap();
            let shown_us: f64 = format_run_line(1, 1, secs, TimeUnit::Microseconds)
                .trim_start_matches("Run 1/1: ")
                .trim_end_matches(" µs")
                .parse()
                .unwrap();
            assert!((shown_us - shown_s * 1e6).abs() < 1e-6, "secs = {}", secs);
        }
    }

    #[test]
    fn summary_line_format() {
        let summary = Summary {
            runs: 3,
            mean_secs: 2.0,
        };
        assert_eq!(
            format_summary_line(&summary, TimeUnit::Seconds),
            "Average over 3 runs: 2.00 s"
        );
        assert_eq!(
            format_summary_line(&summary, TimeUnit::Microseconds),
            "Average over 3 runs: 2000000.00 µs"
        );
    }

    #[test]
    fn json_report_schema() {
        let s = samples(&[1.0, 2.0, 3.0]);
        let report = Report {
            summary: s.summarize().unwrap(),
            samples: s,
        };
        let out = format_json(&report, TimeUnit::Microseconds, fixed_now());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["runs"], 3);
        assert_eq!(parsed["unit"], "µs");
        assert_eq!(parsed["samples"][0], 1_000_000.0);
        assert_eq!(parsed["samples_seconds"][2], 3.0);
        assert_eq!(parsed["average"], 2_000_000.0);
        assert_eq!(parsed["average_seconds"], 2.0);
        assert_eq!(parsed["started_at"], "2026-02-18T00:00:00Z");
    }
}
