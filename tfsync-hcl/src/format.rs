//! Canonical formatting of HCL text.
//!
//! Indentation follows bracket nesting (one level per line that leaves
//! brackets open, however many it opens), trailing whitespace is dropped and
//! runs of single-line attributes get their `=` aligned. Formatting
//! formatted text returns it unchanged.
//!
//! Heredoc bodies (up to and including the closing marker) and the lines
//! following a `/*` up to its `*/` are copied verbatim.

use crate::Indent;

/// Format HCL source text.
///
/// ```
/// use tfsync_hcl::format;
///
/// let src = "module \"web\" {\nsource = \"org/web\"\n    services = var.services\n}\n";
/// assert_eq!(
///     format(src),
///     "module \"web\" {\n  source   = \"org/web\"\n  services = var.services\n}\n"
/// );
/// ```
pub fn format(src: &str) -> String {
    let indent = Indent::HCL.as_str();
    let lines = layout(src);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        let Some(assign) = line.assign else {
            out.push(line.render(indent));
            i += 1;
            continue;
        };

        // Collect the run of alignable attributes at the same depth
        let mut end = i + 1;
        while end < lines.len() && lines[end].assign.is_some() && lines[end].depth == line.depth {
            end += 1;
        }
        let width = lines[i..end]
            .iter()
            .filter_map(|l| l.assign.map(|at| l.text[..at].trim_end().chars().count()))
            .max()
            .unwrap_or_else(|| line.text[..assign].trim_end().chars().count());

        for l in &lines[i..end] {
            out.push(l.render_aligned(indent, width));
        }
        i = end;
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    if out.is_empty() {
        return String::new();
    }
    let mut formatted = out.join("\n");
    formatted.push('\n');
    formatted
}

struct Line<'a> {
    text: &'a str,
    depth: usize,
    /// Byte offset of the `=` when the line is a self-contained attribute
    assign: Option<usize>,
    /// Heredoc or block comment content, emitted as written
    verbatim: bool,
}

impl<'a> Line<'a> {
    fn verbatim(raw: &'a str, depth: usize) -> Self {
        Self {
            text: raw,
            depth,
            assign: None,
            verbatim: true,
        }
    }

    fn render(&self, indent: &str) -> String {
        if self.verbatim {
            return self.text.to_string();
        }
        if self.text.is_empty() {
            return String::new();
        }
        format!("{}{}", indent.repeat(self.depth), self.text)
    }

    fn render_aligned(&self, indent: &str, width: usize) -> String {
        let Some(at) = self.assign else {
            return self.render(indent);
        };
        let name = self.text[..at].trim_end();
        let value = self.text[at + 1..].trim_start();
        let padding = width.saturating_sub(name.chars().count());
        let line = format!(
            "{}{}{} = {}",
            indent.repeat(self.depth),
            name,
            " ".repeat(padding),
            value
        );
        line.trim_end().to_string()
    }
}

/// Multi-line construct whose lines are not HCL tokens.
enum Verbatim {
    Heredoc(String),
    Comment,
}

/// Compute depth and alignment candidates for every line.
fn layout(src: &str) -> Vec<Line<'_>> {
    // Each frame counts the brackets a single line left open
    let mut frames: Vec<usize> = Vec::new();
    let mut lines = Vec::new();
    let mut verbatim: Option<Verbatim> = None;

    for raw in src.lines() {
        let text = raw.trim();
        match &verbatim {
            Some(Verbatim::Heredoc(marker)) => {
                if text == marker.as_str() {
                    verbatim = None;
                }
                lines.push(Line::verbatim(raw, frames.len()));
                continue;
            }
            Some(Verbatim::Comment) => {
                if text.contains("*/") {
                    verbatim = None;
                }
                lines.push(Line::verbatim(raw, frames.len()));
                continue;
            }
            None => {}
        }

        if text.is_empty() {
            lines.push(Line {
                text,
                depth: frames.len(),
                assign: None,
                verbatim: false,
            });
            continue;
        }

        let scan = scan(text);
        for _ in 0..scan.leading_closers {
            close_one(&mut frames);
        }
        let depth = frames.len();

        let mut opened = 0usize;
        let mut closed_outer = false;
        for open in &scan.brackets {
            if *open {
                opened += 1;
            } else if opened > 0 {
                opened -= 1;
            } else {
                close_one(&mut frames);
                closed_outer = true;
            }
        }
        if opened > 0 {
            frames.push(opened);
        }

        let self_contained = scan.leading_closers == 0
            && opened == 0
            && !closed_outer
            && scan.heredoc.is_none()
            && !scan.opens_comment;
        lines.push(Line {
            text,
            depth,
            assign: scan.assign.filter(|_| self_contained),
            verbatim: false,
        });

        if let Some(marker) = scan.heredoc {
            verbatim = Some(Verbatim::Heredoc(marker));
        } else if scan.opens_comment {
            verbatim = Some(Verbatim::Comment);
        }
    }

    lines
}

fn close_one(frames: &mut Vec<usize>) {
    if let Some(top) = frames.last_mut() {
        *top -= 1;
        if *top == 0 {
            frames.pop();
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Scan {
    /// Closing brackets before any other token
    leading_closers: usize,
    /// Remaining brackets in order, `true` for an opening one
    brackets: Vec<bool>,
    /// Byte offset of the first top-level assignment `=`
    assign: Option<usize>,
    /// Closing marker of a heredoc the line ends with
    heredoc: Option<String>,
    /// A `/*` left open at the end of the line
    opens_comment: bool,
}

/// Scan one trimmed line, skipping string literals and comments.
fn scan(text: &str) -> Scan {
    let bytes = text.as_bytes();
    let mut scan = Scan::default();
    let mut in_string = false;
    let mut escaped = false;
    let mut seen_token = false;
    let mut nesting = 0usize;
    let mut skip_until = 0usize;

    for (i, c) in text.char_indices() {
        if i < skip_until {
            continue;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                seen_token = true;
            }
            '#' => break,
            '/' if bytes.get(i + 1) == Some(&b'/') => break,
            '/' if bytes.get(i + 1) == Some(&b'*') => match text[i + 2..].find("*/") {
                Some(end) => skip_until = i + 2 + end + 2,
                None => {
                    scan.opens_comment = true;
                    break;
                }
            },
            '<' if bytes.get(i + 1) == Some(&b'<') => {
                seen_token = true;
                let marker = &text[i + 2..];
                let marker = marker.strip_prefix('-').unwrap_or(marker);
                if is_heredoc_marker(marker) {
                    scan.heredoc = Some(marker.to_string());
                    break;
                }
                skip_until = i + 2;
            }
            '{' | '[' | '(' => {
                scan.brackets.push(true);
                nesting += 1;
                seen_token = true;
            }
            '}' | ']' | ')' => {
                if seen_token {
                    scan.brackets.push(false);
                    nesting = nesting.saturating_sub(1);
                } else {
                    scan.leading_closers += 1;
                }
            }
            '=' => {
                seen_token = true;
                if scan.assign.is_none() && nesting == 0 && is_assignment(bytes, i) {
                    scan.assign = Some(i);
                }
            }
            c if c.is_whitespace() => {}
            _ => seen_token = true,
        }
    }

    scan
}

fn is_heredoc_marker(marker: &str) -> bool {
    let mut chars = marker.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A lone `=`, not part of `==`, `!=`, `<=`, `>=` or `=>`.
fn is_assignment(bytes: &[u8], at: usize) -> bool {
    let prev = at.checked_sub(1).and_then(|p| bytes.get(p));
    let next = bytes.get(at + 1);
    !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && !matches!(next, Some(b'=' | b'>'))
}
