//! Tally of what a page mount produced.
//!
//! A mount that fails leaves its widget inert and counts as zero; the
//! remaining mounts still run.

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountReport {
    entries: Vec<(&'static str, usize)>,
    failed: Vec<&'static str>,
}

impl MountReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of mounting `effect` and return how many
    /// instances are live. `Ok(0)` means nothing on the page matched.
    pub fn record<E: Display>(&mut self, effect: &'static str, outcome: Result<usize, E>) -> usize {
        let count = match outcome {
            Ok(count) => count,
            Err(e) => {
                log::warn!("{effect} left inert: {e}");
                self.failed.push(effect);
                0
            }
        };
        self.entries.push((effect, count));
        count
    }

    pub fn count(&self, effect: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| *name == effect)
            .map(|(_, count)| *count)
    }

    /// Effects with at least one live instance.
    pub fn mounted(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.entries.iter().copied().filter(|(_, count)| *count > 0)
    }

    /// Effects with nothing to attach to (missing elements, not errors).
    pub fn skipped(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|(name, count)| *count == 0 && !self.failed.contains(name))
            .map(|(name, _)| *name)
    }

    pub fn failed(&self) -> &[&'static str] {
        &self.failed
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomError;

    #[test]
    fn failure_does_not_stop_later_mounts() {
        let mut report = MountReport::new();
        let failed = report.record(
            "particles",
            Err::<usize, _>(DomError::WrongElementType {
                selector: "#particles-canvas".into(),
                expected: "HtmlCanvasElement",
            }),
        );
        let spectrum = report.record("spectrum", Ok::<_, DomError>(1));
        let tilt = report.record("tilt cards", Ok::<_, DomError>(3));

        assert_eq!(failed, 0, "a failed mount should count as zero");
        assert_eq!(spectrum, 1);
        assert_eq!(tilt, 3);
        assert_eq!(report.failed(), ["particles"]);
        assert_eq!(report.total(), 4);
        assert_eq!(report.mounted().collect::<Vec<_>>(), vec![("spectrum", 1), ("tilt cards", 3)]);
    }

    #[test]
    fn missing_canvas_is_skipped_not_failed() {
        let mut report = MountReport::new();
        report.record("orb", Ok::<_, DomError>(0));
        report.record(
            "spectrum",
            Err::<usize, _>(DomError::NoContext { selector: "spectrum-analyzer".into() }),
        );
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["orb"]);
        assert_eq!(report.failed(), ["spectrum"]);
        assert_eq!(report.count("orb"), Some(0));
        assert_eq!(report.count("hero waves"), None);
        assert_eq!(report.mounted().count(), 0);
    }
}
