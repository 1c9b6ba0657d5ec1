//! Console summary tape and failure detail listing

use crate::case::{Outcome, TestCase};
use crate::registry::RootRegistry;
use crate::VERSION;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::{self, Write};

/// Summary char for "passed" test cases
const CHR_PASSED: char = '.';

/// Summary char for "failed" test cases
const CHR_FAILED: char = 'F';

/// Summary char for not-evaluated test cases
const CHR_INVALID: char = '?';

/// Console renderer for a finished run.
///
/// Renders a one-character-per-case summary tape, a numbered detail
/// listing for every case that failed or never evaluated an assertion,
/// and the overall verdict with aggregate counts.
pub struct ConsoleReport {
    no_color: bool,
}

impl Default for ConsoleReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReport {
    /// Create a renderer with styling enabled.
    pub fn new() -> Self {
        Self { no_color: false }
    }

    /// Disable ANSI styling.
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Render the full report to stdout.
    pub fn print(&self, registry: &RootRegistry, at: DateTime<Utc>) -> io::Result<()> {
        let mut out = io::stdout();
        self.render_to(registry, at, &mut out)?;
        out.flush()
    }

    /// Render the full report into `out`.
    pub fn render_to<W: Write>(
        &self,
        registry: &RootRegistry,
        at: DateTime<Utc>,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "=================== Unit Test Report ===================")?;
        writeln!(out, "Framework version:  {VERSION}")?;
        writeln!(out, "Project:            {}", registry.name())?;
        writeln!(out)?;

        self.render_summary(registry, out)?;
        self.render_details(registry, out)?;

        writeln!(out)?;
        writeln!(out, "Done.\t {}", super::timestamp_string(at))?;
        writeln!(out, "========================================================")?;
        Ok(())
    }

    /// Legend plus the result tape, one char per case in traversal order.
    fn render_summary<W: Write>(&self, registry: &RootRegistry, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Summary ({CHR_FAILED}=fail, {CHR_PASSED}=pass, {CHR_INVALID}=invalid):"
        )?;

        let mut tape = String::new();
        registry.for_each_case(|case| tape.push_str(&self.tape_char(case)));
        writeln!(out, "\t{tape}")?;
        Ok(())
    }

    fn tape_char(&self, case: &TestCase) -> String {
        match case.outcome() {
            Outcome::Pass => self.paint(CHR_PASSED, |s| s.green().to_string()),
            Outcome::Fail => self.paint(CHR_FAILED, |s| s.red().bold().to_string()),
            Outcome::Undefined => self.paint(CHR_INVALID, |s| s.yellow().to_string()),
        }
    }

    /// Numbered listing of every non-passing case, then the verdict.
    fn render_details<W: Write>(&self, registry: &RootRegistry, out: &mut W) -> io::Result<()> {
        let stats = registry.stats();

        if stats.all_passed() {
            writeln!(out)?;
            writeln!(out, "Result:")?;
            write!(out, "\t{}", self.verdict("PASS", |s| s.green().bold()))?;
        } else {
            writeln!(out)?;
            writeln!(
                out,
                "Details ({} fails, {} invalid):",
                stats.failed,
                stats.invalid()
            )?;

            let mut number = 0u32;
            let mut lines: Vec<String> = Vec::new();
            registry.for_each_case(|case| match case.outcome() {
                Outcome::Fail => {
                    number += 1;
                    lines.push(format!(
                        "\t{number}) {} -- {}: {}",
                        case.name(),
                        case.message_origin(),
                        case.message()
                    ));
                }
                Outcome::Undefined => {
                    number += 1;
                    lines.push(format!(
                        "\t{number}) {} -- {}: not evaluated",
                        case.name(),
                        case.location()
                    ));
                }
                Outcome::Pass => {}
            });
            for line in lines {
                writeln!(out, "{line}")?;
            }

            writeln!(out)?;
            writeln!(out, "Result:")?;
            write!(out, "\t{}", self.verdict("FAIL", |s| s.red().bold()))?;
        }

        writeln!(
            out,
            " ({} runs, {} passes, {} fails)",
            stats.total, stats.passed, stats.failed
        )?;
        Ok(())
    }

    fn paint(&self, c: char, style: impl Fn(&str) -> String) -> String {
        let text = c.to_string();
        if self.no_color {
            text
        } else {
            style(&text)
        }
    }

    fn verdict(&self, word: &str, style: impl Fn(&str) -> colored::ColoredString) -> String {
        if self.no_color {
            word.to_string()
        } else {
            style(word).to_string()
        }
    }
}
