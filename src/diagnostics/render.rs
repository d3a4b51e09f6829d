//! Human-readable rendering of diagnostics

use super::Diagnostic;

/// Knobs for [`Diagnostic::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print the offending source line with a caret under the problem
    pub show_snippet: bool,
    /// Cap on the number of expected entries listed; 0 hides the list
    pub max_expected: usize,
    pub suggest_keywords: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_snippet: true,
            max_expected: 8,
            suggest_keywords: true,
        }
    }
}

impl Diagnostic {
    /// Render a multi-line report against the source the diagnostic came from.
    ///
    /// ```text
    /// error: unexpected identifier `shoe`
    ///  --> line 1, column 1
    ///   |
    /// 1 | shoe devices
    ///   | ^^^^
    ///   = expected: SHOW, FIND, COUNT, STREAM
    ///   = help: did you mean `SHOW`?
    /// ```
    pub fn render(&self, source: &str, options: &RenderOptions) -> String {
        let line_label = self.position.line.to_string();
        let gutter = " ".repeat(line_label.len());

        let mut out = format!("error: {}\n", self.message);
        out.push_str(&format!(
            "{}--> line {}, column {}\n",
            gutter, self.position.line, self.position.column
        ));

        if options.show_snippet {
            let line = extract_line(source, self.position.line);
            let width = self
                .found
                .as_deref()
                .map(|found| found.chars().count())
                .unwrap_or(1)
                .max(1);
            out.push_str(&format!("{} |\n", gutter));
            out.push_str(&format!("{} | {}\n", line_label, line));
            out.push_str(&format!(
                "{} | {}{}\n",
                gutter,
                " ".repeat(self.position.column.saturating_sub(1)),
                "^".repeat(width)
            ));
        }

        let expected = self.expected_descriptions();
        if options.max_expected > 0 && !expected.is_empty() {
            let shown = expected.len().min(options.max_expected);
            let mut list = expected[..shown].join(", ");
            if expected.len() > shown {
                list.push_str(&format!(" and {} more", expected.len() - shown));
            }
            out.push_str(&format!("{} = expected: {}\n", gutter, list));
        }

        if options.suggest_keywords {
            if let Some(suggestion) = &self.suggestion {
                out.push_str(&format!("{} = help: {}\n", gutter, suggestion));
            }
        }

        out
    }
}

/// Extract a single 1-based line from the source, empty if out of range.
fn extract_line(source: &str, line: usize) -> &str {
    source.lines().nth(line.saturating_sub(1)).unwrap_or("")
}
