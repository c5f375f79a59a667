//! Console status reporting.
//!
//! Colored stderr lines for skips, posts, and failures, so a CI log shows
//! what happened to every file. Silenced with `--quiet`; the review result
//! itself lives on the pull request, not in this output.

use colored::Colorize;

/// Outcome counters for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Files in the pull request, before filtering.
    pub files_total: usize,
    /// Files that went through the inline-review pipeline.
    pub files_reviewed: usize,
    /// Files excluded by the filter or skipped mid-review.
    pub files_skipped: usize,
    /// Inline comments actually created on the pull request.
    pub comments_posted: usize,
    /// Whether an architectural summary comment was created.
    pub summary_posted: bool,
}

/// Prints colored progress lines to stderr.
pub struct Reporter {
    enabled: bool,
}

impl Reporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Announce the file currently being reviewed, with its category.
    pub fn reviewing(&self, index: usize, total: usize, filename: &str, category: &str) {
        if self.enabled {
            eprintln!(
                "{} [{index}/{total}] {filename} ({category})",
                "reviewing".cyan().bold(),
            );
        }
    }

    /// A file was skipped, with the reason.
    pub fn skipped(&self, filename: &str, reason: &str) {
        if self.enabled {
            eprintln!("{} {filename} ({reason})", "skip".yellow());
        }
    }

    /// An inline comment was created.
    pub fn posted(&self, filename: &str, line: u32) {
        if self.enabled {
            eprintln!("{} {filename}:{line}", "comment".green());
        }
    }

    /// A non-fatal problem; the run continues.
    pub fn warn(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {message}", "warning".yellow().bold());
        }
    }

    /// Final per-run outcome line.
    pub fn finish(&self, report: &RunReport) {
        if !self.enabled {
            return;
        }
        let summary = if report.summary_posted {
            "summary posted".green().to_string()
        } else {
            "summary not posted".red().to_string()
        };
        eprintln!(
            "{} {} file{} reviewed, {} skipped, {} comment{} posted, {summary}",
            "done".green().bold(),
            report.files_reviewed,
            if report.files_reviewed == 1 { "" } else { "s" },
            report.files_skipped,
            report.comments_posted,
            if report.comments_posted == 1 { "" } else { "s" },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_reporter_is_silent() {
        // Exercise every path with output suppressed; this mostly guards
        // against panics in the formatting code.
        let r = Reporter::new(false);
        r.reviewing(1, 2, "a.swift", "swift-ui");
        r.skipped("b.png", "matches exclude pattern");
        r.posted("a.swift", 12);
        r.warn("something transient");
        r.finish(&RunReport::default());
    }

    #[test]
    fn run_report_defaults_to_zero() {
        let report = RunReport::default();
        assert_eq!(report.files_total, 0);
        assert_eq!(report.comments_posted, 0);
        assert!(!report.summary_posted);
    }
}
