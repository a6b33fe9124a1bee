//! The outcome of one run, and its human-readable rendering.

use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::config::RaceConfig;
use crate::trace::{TraceEvent, TraceKind};

/// What a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RaceReport {
    pub final_value: i64,
    /// The deterministic value the role pairing implies.
    pub expected: i64,
    pub iterations: u64,
    /// Index of the worker that entered the critical section first.
    pub first_in_section: Option<usize>,
    pub events: Vec<TraceEvent>,
    pub elapsed: Duration,
}

impl RaceReport {
    pub(crate) fn new(
        config: &RaceConfig,
        final_value: i64,
        events: Vec<TraceEvent>,
        elapsed: Duration,
    ) -> Self {
        let first_in_section = events
            .iter()
            .filter(|e| e.kind == TraceKind::EnteredCriticalSection)
            .min_by_key(|e| e.at)
            .map(|e| e.worker);
        RaceReport {
            final_value,
            expected: config.expected_final(),
            iterations: config.iterations,
            first_in_section,
            events,
            elapsed,
        }
    }

    pub fn is_expected(&self) -> bool {
        self.final_value == self.expected
    }

    /// Human-readable summary. The final value gets its own line so it can
    /// be extracted unambiguously.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Run summary".bold()));
        out.push_str(&format!("{}\n", "=".repeat(50)));
        out.push_str(&format!("Iterations per worker: {}\n", self.iterations));
        if let Some(worker) = self.first_in_section {
            out.push_str(&format!(
                "First into the critical section: worker {worker}\n"
            ));
        }
        out.push_str(&format!("Elapsed: {:?}\n", self.elapsed));
        out.push_str(&format!("Final counter value: {}\n", self.final_value));
        let verdict = if self.is_expected() {
            format!("matches the expected value {}", self.expected)
                .green()
                .to_string()
        } else {
            format!("expected {}, synchronization is broken", self.expected)
                .red()
                .to_string()
        };
        out.push_str(&format!("{verdict}\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RolePair;
    use std::time::Duration;

    fn event(worker: usize, kind: TraceKind, millis: u64) -> TraceEvent {
        TraceEvent {
            worker,
            kind,
            at: Duration::from_millis(millis),
        }
    }

    fn sample_report(final_value: i64) -> RaceReport {
        let config = RaceConfig::new(5, RolePair::IncrementDecrement).unwrap();
        let events = vec![
            event(1, TraceKind::EnteredCriticalSection, 2),
            event(1, TraceKind::ReleasedLock, 4),
            event(0, TraceKind::EnteredCriticalSection, 5),
            event(0, TraceKind::ReleasedLock, 7),
        ];
        RaceReport::new(&config, final_value, events, Duration::from_millis(8))
    }

    #[test]
    fn test_first_in_section_is_earliest_entry() {
        let report = sample_report(2);
        assert_eq!(report.first_in_section, Some(1));
    }

    #[test]
    fn test_render_exposes_final_value_line() {
        let report = sample_report(2);
        assert!(report.render().contains("Final counter value: 2"));
    }

    #[test]
    fn test_render_flags_unexpected_value() {
        let report = sample_report(17);
        assert!(!report.is_expected());
        assert!(report.render().contains("expected 2"));
    }

    #[test]
    fn test_report_serializes() {
        let report = sample_report(2);
        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["final_value"], 2);
        assert_eq!(json["expected"], 2);
    }

    #[test]
    fn test_untraced_run_has_no_order() {
        let config = RaceConfig::new(5, RolePair::IncrementDecrement).unwrap();
        let report = RaceReport::new(&config, 2, Vec::new(), Duration::ZERO);
        assert_eq!(report.first_in_section, None);
    }
}
