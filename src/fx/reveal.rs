//! Sections appear once when they enter the viewport.

/// Circumference of the stat ring (`2πr` for r = 45, rounded).
pub const STAT_CIRCUMFERENCE: f64 = 283.0;

/// `stroke-dashoffset` that fills a stat ring to `progress` percent.
pub fn stat_dash_offset(progress: f64) -> f64 {
    STAT_CIRCUMFERENCE - STAT_CIRCUMFERENCE * progress / 100.0
}

/// Inline transform for a section still waiting to be revealed.
pub fn hidden_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Tracks which observed sections have been revealed. Each section is
/// revealed at most once; leaving the viewport never hides it again.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(sections: usize) -> Self {
        RevealTracker {
            revealed: vec![false; sections],
        }
    }

    /// Feed an intersection change. Returns `true` only on the transition
    /// that reveals `index`.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if intersecting && !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    /// Reveal every section at once (reduced motion). Returns the indices
    /// that were still hidden.
    pub fn reveal_all(&mut self) -> Vec<usize> {
        let pending = (0..self.revealed.len()).filter(|&i| !self.revealed[i]).collect();
        self.revealed.iter_mut().for_each(|r| *r = true);
        pending
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}
