//! Progress output for user-facing status updates.
//!
//! In verbose mode, output is suppressed since tracing handles everything.
//! In normal mode, output is shown with colors to give feedback during
//! long-running batches.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        let colors_enabled = should_use_colors();
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled,
        }
    }

    /// Create a progress reporter that respects verbose mode
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_verbosity(verbose: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report scanning started
    pub fn scan_start(&mut self, target: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Scanning {}...", target.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Scanning {}...", target.display());
        }
    }

    /// Report scanning complete
    pub fn scan_complete(&mut self, count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Found {} files", count).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Found {} files", count);
        }
    }

    /// Report a rename batch starting
    pub fn rename_start(&mut self, total: usize, dry_run: bool) {
        if self.silent || total == 0 {
            return;
        }
        let _ = writeln!(self.writer);
        let heading = if dry_run {
            format!("Previewing {} renames", total)
        } else {
            format!("Renaming {} files", total)
        };
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", heading.bold());
        } else {
            let _ = writeln!(self.writer, "{}", heading);
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report a rename batch complete
    pub fn rename_complete(&mut self, count: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            if self.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "{}",
                    format!("Dry run complete. {} files would be renamed.", count).dimmed()
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    "Dry run complete. {} files would be renamed.",
                    count
                );
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files renamed", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Rename complete. {} files renamed.", count);
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report history file written
    pub fn history_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("History saved to: {}", path.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "History saved to: {}", path.display());
        }
    }

    /// Report listing written
    pub fn listing_written(&mut self, path: &Path, count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} filenames written to {}", count, path.display()).green()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "{} filenames written to {}",
                count,
                path.display()
            );
        }
    }

    /// Report starting a revert operation
    pub fn revert_start(&mut self, total: usize, from_timestamp: &str) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Reverting {} renames from history ({})", total, from_timestamp).bold()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Reverting {} renames from history ({})",
                total, from_timestamp
            );
        }
    }

    /// Report progress on a single revert
    pub fn revert_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report revert complete
    pub fn revert_complete(&mut self, count: usize, skipped: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            if self.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "{}",
                    format!("Dry run complete. {} files would be restored.", count).dimmed()
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    "Dry run complete. {} files would be restored.",
                    count
                );
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files restored", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Revert complete. {} files restored.", count);
        }

        if skipped > 0 {
            self.warn(&format!("{} entries could not be reverted", skipped));
        }
    }

    /// Report an OCR batch starting
    pub fn ocr_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Processing {} PDF receipts", total).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Processing {} PDF receipts", total);
        }
    }

    /// Report progress on a single receipt
    pub fn ocr_progress(&mut self, current: usize, total: usize, name: &str, skipped: bool) {
        if self.silent {
            return;
        }
        let suffix = if skipped { " (cached)" } else { "" };
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {}{}",
                counter.cyan(),
                name,
                suffix.dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {}{}", current, total, name, suffix);
        }
    }

    /// Report an OCR batch complete
    pub fn ocr_complete(&mut self, processed: usize, skipped: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        let summary = format!(
            "{} receipts processed, {} already cached",
            processed, skipped
        );
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), summary.green());
        } else {
            let _ = writeln!(self.writer, "{}", summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_progress() -> (Progress, std::sync::Arc<std::sync::Mutex<Vec<u8>>>) {
        let buffer = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let writer = TestWriter(buffer.clone());
        let progress = Progress::with_writer(Box::new(writer));
        (progress, buffer)
    }

    struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rename_progress() {
        let (mut progress, buffer) = create_test_progress();

        progress.rename_progress(1, 3, "bank 5.pdf", "Bank $5.00.pdf");
        progress.rename_progress(2, 3, "deli 8.pdf", "Deli $8.00.pdf");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("[1/3]"));
        assert!(output.contains("[2/3]"));
        assert!(output.contains("Bank $5.00.pdf"));
    }

    #[test]
    fn test_warn_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.warn("destination already exists");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Warning: destination already exists"));
    }

    #[test]
    fn test_silent_suppresses_output() {
        let mut progress = Progress::silent();

        // No panic, no output
        progress.scan_start(Path::new("/tmp"));
        progress.rename_progress(1, 1, "a", "b");
        progress.ocr_complete(1, 2);
    }

    #[test]
    fn test_ocr_progress_marks_cached() {
        let (mut progress, buffer) = create_test_progress();

        progress.ocr_progress(1, 2, "Bank of Cleveland $526.00.pdf", true);
        progress.ocr_progress(2, 2, "Deli $8.00.pdf", false);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("(cached)"));
        assert!(output.contains("Deli $8.00.pdf"));
    }

    #[test]
    fn test_revert_complete_reports_skips() {
        let (mut progress, buffer) = create_test_progress();

        progress.revert_complete(3, 1, false);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("3 files restored"));
        assert!(output.contains("1 entries could not be reverted"));
    }
}
