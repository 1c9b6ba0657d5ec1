//! Static HTML report document
//!
//! Self-contained (no external stylesheet or script): headings scoped
//! module > group > table-of-cases, one continuously numbered row per
//! case, and location links of the form `file#Lline`.

use crate::case::{Outcome, TestCase};
use crate::registry::{RootEntry, RootRegistry, TestGroup, TestModule};
use crate::VERSION;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

/// Renderer for the HTML report document.
#[derive(Default, Clone, Copy)]
pub struct HtmlReport;

impl HtmlReport {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the complete document.
    pub fn render(&self, registry: &RootRegistry, at: DateTime<Utc>) -> String {
        let mut doc = String::new();

        doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Unit Test Report</title>\n</head>\n<body>\n");
        let _ = write!(
            doc,
            "<h1>Unit Test Report &ndash; {}</h1>\n<hr/>\n",
            escape(registry.name())
        );
        let _ = write!(
            doc,
            "<p><b>Framework Version:</b> gauntlet {VERSION}<br/>\n\
             <b>Test run completed at:</b> {}</p>\n",
            super::timestamp_string(at)
        );

        let mut number = 0u32;
        for entry in registry.entries() {
            match entry {
                RootEntry::Case(case) => {
                    self.push_table_open(&mut doc);
                    self.push_case_row(&mut doc, &mut number, case);
                    self.push_table_close(&mut doc);
                }
                RootEntry::Group(group) => self.push_group(&mut doc, &mut number, group),
                RootEntry::Module(module) => self.push_module(&mut doc, &mut number, module),
            }
        }

        let stats = registry.stats();
        let _ = write!(
            doc,
            "<hr/>\n<p>{} runs, {} passes, {} fails</p>\n</body>\n</html>\n",
            stats.total, stats.passed, stats.failed
        );
        doc
    }

    /// Write the document to `path`.
    ///
    /// A sink that cannot be created is tolerated silently: the report
    /// must never mask test results.
    pub fn write_to_file(&self, registry: &RootRegistry, at: DateTime<Utc>, path: &Path) {
        let Ok(mut file) = File::create(path) else {
            return;
        };
        let _ = file.write_all(self.render(registry, at).as_bytes());
    }

    fn push_module(&self, doc: &mut String, number: &mut u32, module: &TestModule) {
        let _ = write!(doc, "<h2>{}</h2>\n", escape(module.name()));
        for group in module.groups() {
            self.push_group(doc, number, group);
        }
    }

    fn push_group(&self, doc: &mut String, number: &mut u32, group: &TestGroup) {
        let _ = write!(doc, "<h3>{}</h3>\n", escape(group.name()));
        self.push_table_open(doc);
        for case in group.cases() {
            self.push_case_row(doc, number, case);
        }
        self.push_table_close(doc);
    }

    fn push_table_open(&self, doc: &mut String) {
        doc.push_str(
            "<table border=\"1\">\n<tr><th>Nr.</th><th>Name</th><th>File</th>\
             <th>Result</th><th>Message</th></tr>\n",
        );
    }

    fn push_table_close(&self, doc: &mut String) {
        doc.push_str("</table>\n");
    }

    fn push_case_row(&self, doc: &mut String, number: &mut u32, case: &TestCase) {
        *number += 1;

        let (color, label, failed) = match case.outcome() {
            Outcome::Pass => ("lime", "pass", false),
            Outcome::Fail => ("red", "fail", true),
            Outcome::Undefined => ("silver", "invalid", false),
        };

        let location = if failed {
            case.message_origin()
        } else {
            case.location()
        };
        let link = format!("{}#L{}", escape(location.file), location.line);
        let message = if failed { escape(&case.message()) } else { String::new() };

        let _ = write!(
            doc,
            "<tr><td>{}</td><td>{}</td><td><a href=\"{link}\">{link}</a></td>\
             <td style=\"background-color: {color}\">{label}</td><td>{message}</td></tr>\n",
            number,
            escape(case.name())
        );
    }
}

/// Minimal HTML escaping for text and attribute positions.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
