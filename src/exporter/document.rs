//! In-memory document assembly.
//!
//! A `DocumentBuilder` accumulates the ordered lines of one generated file
//! together with the current indentation depth. It is threaded explicitly
//! through every generator call - there is no ambient emission state - and
//! is discarded after `render()` has been diffed against disk.
//!
//! Conventions are fixed: `\n` line endings, two-space indentation steps.

/// One indentation step.
const INDENT: &str = "  ";

/// Ordered lines plus indentation depth for one generated file.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    lines: Vec<String>,
    indent: usize,
}

impl DocumentBuilder {
    /// Create an empty document.
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Append a line at the current indentation level.
    pub fn line(&mut self, content: impl AsRef<str>) {
        let content = content.as_ref();
        if content.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", INDENT.repeat(self.indent), content));
        }
    }

    /// Append a line verbatim, ignoring the current indentation.
    ///
    /// Make recipe bodies must start with a literal tab even when emitted
    /// inside an indented conditional block.
    pub fn raw_line(&mut self, content: impl Into<String>) {
        self.lines.push(content.into());
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Increase the indentation level. Pair with `outdent`.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indentation level.
    pub fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Current indentation level.
    pub fn level(&self) -> usize {
        self.indent
    }

    /// Number of accumulated lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize the document. Every line, including the last, ends in a
    /// newline; an empty document renders as the empty string.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_renders_empty() {
        let doc = DocumentBuilder::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.render(), "");
    }

    #[test]
    fn test_lines_end_with_newline() {
        let mut doc = DocumentBuilder::new();
        doc.line("all:");
        doc.raw_line("\t@:");
        assert_eq!(doc.render(), "all:\n\t@:\n");
    }

    #[test]
    fn test_indentation_is_applied_and_restored() {
        let mut doc = DocumentBuilder::new();
        doc.line("ifndef config");
        doc.indent();
        doc.line("config=debug");
        doc.outdent();
        doc.line("endif");

        assert_eq!(doc.level(), 0);
        assert_eq!(doc.render(), "ifndef config\n  config=debug\nendif\n");
    }

    #[test]
    fn test_raw_line_bypasses_indentation() {
        let mut doc = DocumentBuilder::new();
        doc.indent();
        doc.line("define CMDS");
        doc.raw_line("\t@echo hi");
        doc.line("endef");

        assert_eq!(doc.render(), "  define CMDS\n\t@echo hi\n  endef\n");
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let mut doc = DocumentBuilder::new();
        doc.indent();
        doc.blank();
        doc.line("");
        assert_eq!(doc.render(), "\n\n");
    }

    #[test]
    fn test_outdent_saturates_at_zero() {
        let mut doc = DocumentBuilder::new();
        doc.outdent();
        doc.line("x");
        assert_eq!(doc.render(), "x\n");
    }
}
