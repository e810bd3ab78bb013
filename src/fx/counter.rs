//! Count-up animation for stat numbers.

/// Counts from zero to `target` in a fixed number of equal steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CountUp {
    pub fn new(target: u64, steps: u32) -> Self {
        CountUp {
            target,
            increment: target as f64 / steps.max(1) as f64,
            current: 0.0,
            done: false,
        }
    }

    /// Advance one step and return the value to display, or `None` once the
    /// target has already been shown.
    pub fn tick(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as u64)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Interval between steps so the whole count takes `duration_ms`.
pub fn step_interval_ms(duration_ms: u32, steps: u32) -> i32 {
    (duration_ms / steps.max(1)) as i32
}

/// Parse a `data-count` attribute the lenient way: leading digits only
/// (`"1,200"` → 1). `None` when there are no leading digits.
pub fn parse_count(attr: &str) -> Option<u64> {
    let digits: String = attr
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_exactly_on_target() {
        let mut count = CountUp::new(150, 60);
        let values: Vec<u64> = std::iter::from_fn(|| count.tick()).collect();
        assert_eq!(values.len(), 60);
        assert_eq!(*values.last().unwrap(), 150);
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "Count must not decrease");
        assert!(count.is_done());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut count = CountUp::new(0, 60);
        assert_eq!(count.tick(), Some(0));
        assert_eq!(count.tick(), None);
    }

    #[test]
    fn small_target_floors() {
        let mut count = CountUp::new(3, 60);
        assert_eq!(count.tick(), Some(0));
    }

    #[test]
    fn interval_for_default_timing() {
        assert_eq!(step_interval_ms(2000, 60), 33);
        assert_eq!(step_interval_ms(2000, 0), 2000);
    }

    #[test]
    fn parses_leading_digits() {
        assert_eq!(parse_count("250"), Some(250));
        assert_eq!(parse_count(" 1,200"), Some(1));
        assert_eq!(parse_count("98%"), Some(98));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
    }
}
