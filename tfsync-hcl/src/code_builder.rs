//! Code builder utility for writing properly indented HCL.

use crate::{CodeFragment, Indent, Renderable};

/// Mutable builder that writes lines with the current indentation.
///
/// # Example
///
/// ```
/// use tfsync_hcl::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::hcl();
/// builder.apply_fragment(CodeFragment::block(
///     "terraform {",
///     vec![CodeFragment::line("required_version = \">= 0.13\"")],
/// ));
///
/// assert_eq!(builder.build(), "terraform {\n  required_version = \">= 0.13\"\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn hcl() -> Self {
        Self::new(Indent::HCL)
    }

    /// Add a line with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add one `# text` line per line of `text`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self.push_line("#");
        }
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.push_line("#");
            } else {
                self.push_line(&format!("# {}", line));
            }
        }
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
        }
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::hcl()
    }
}
