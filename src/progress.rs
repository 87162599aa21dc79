//! Terminal progress reporting for the epoch loop

use std::io::Write;
use std::time::Instant;

/// Format a duration in seconds as a short human-readable string.
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{secs:.0}s")
    } else if secs < 3600.0 {
        let mins = (secs / 60.0).floor();
        let s = (secs % 60.0).floor();
        format!("{mins}m {s:02.0}s")
    } else {
        let hours = (secs / 3600.0).floor();
        let mins = ((secs % 3600.0) / 60.0).floor();
        format!("{hours}h {mins:02.0}m")
    }
}

/// Progress bar over a known-length sequence of epochs.
///
/// Purely observational: it renders to stderr and never influences results.
/// ETA uses an exponential moving average of the per-step duration.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    width: usize,
    step_estimate: f64,
    last_step_time: Option<Instant>,
}

impl ProgressBar {
    /// Create a bar for `total` steps rendered `width` characters wide.
    pub fn new(total: usize, width: usize) -> Self {
        Self { total, current: 0, width, step_estimate: 0.0, last_step_time: None }
    }

    /// Advance to `current` steps completed.
    pub fn update(&mut self, current: usize) {
        let now = Instant::now();
        if let Some(last) = self.last_step_time {
            let steps = current.saturating_sub(self.current);
            if steps > 0 {
                let per_step = now.duration_since(last).as_secs_f64() / steps as f64;
                self.step_estimate = if self.step_estimate == 0.0 {
                    per_step
                } else {
                    0.9 * self.step_estimate + 0.1 * per_step
                };
            }
        }
        self.current = current;
        self.last_step_time = Some(now);
    }

    /// Completed fraction in percent.
    #[must_use]
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.current as f32 / self.total as f32) * 100.0
    }

    /// Render the bar to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let percent = self.percent();
        let filled = ((percent / 100.0) * self.width as f32).round() as usize;
        let empty = self.width.saturating_sub(filled);

        let bar: String = std::iter::repeat('█')
            .take(filled)
            .chain(std::iter::repeat('░').take(empty))
            .collect();

        let remaining = self.total.saturating_sub(self.current);
        let eta = format_duration(self.step_estimate * remaining as f64);

        format!("[{bar}] {}/{} ({percent:>5.1}%) ETA {eta}", self.current, self.total)
    }

    /// Render in place on stderr, with a trailing newline once complete.
    pub fn draw(&self, label: &str) {
        eprint!("\r{label} {}", self.render());
        if self.current >= self.total {
            eprintln!();
        }
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(30.0), "30s");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(90.0), "1m 30s");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(5400.0), "1h 30m");
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(ProgressBar::new(0, 10).percent(), 100.0);
    }

    #[test]
    fn test_percent_midway() {
        let mut bar = ProgressBar::new(100, 10);
        bar.update(50);
        assert_eq!(bar.percent(), 50.0);
    }

    #[test]
    fn test_render_shape() {
        let mut bar = ProgressBar::new(10, 10);
        bar.update(5);
        let rendered = bar.render();
        assert!(rendered.contains('['));
        assert!(rendered.contains("5/10"));
        assert!(rendered.contains("ETA"));
    }
}
