//! Validation of names in task configuration

use miette::SourceSpan;

use crate::{Error, Result};

/// Module arguments set by the root module itself. Operator variables with
/// these names would overwrite them.
pub(crate) const RESERVED_VARIABLES: &[&str] = &[
    "source",
    "version",
    "services",
    "catalog_services",
    "count",
    "for_each",
    "providers",
    "depends_on",
];

/// Source information carried through validation.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "task.toml");
/// ctx.validate_name("web", "task")?;
/// ctx.push("providers").validate_name("consul", "provider")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
    /// Path segments for nested validation (e.g., ["providers", "consul"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages, e.g. "variable in 'variables'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src, name)
    }

    /// Validate that a name can be used as an HCL identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(Error::invalid_identifier(
                name,
                self.context_for(kind),
                reason,
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Validate a module variable name.
    pub fn validate_variable(&self, name: &str) -> Result<()> {
        self.validate_name(name, "variable")?;
        if RESERVED_VARIABLES.contains(&name) {
            return Err(Error::reserved_variable(
                name,
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    pub fn error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Error::validation(message, self.src, self.filename, span)
    }
}

/// Find the span of a table key in the TOML source.
/// Searches for patterns like `.name]`, `.name.` or `name =`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        (format!(".{}]", name), 1), // [providers.name]
        (format!(".{}.", name), 1), // [providers.name.auth]
        (format!("\n{} =", name), 1), // name = value
        (format!("\n{}=", name), 1),
    ];

    for (pattern, skip) in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    // Fallback: just find the name anywhere (less precise)
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Spans of every `"value"` string literal in the source.
pub(crate) fn find_string_spans(src: &str, value: &str) -> Vec<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    src.match_indices(quoted.as_str())
        .map(|(pos, _)| SourceSpan::from((pos + 1, value.len())))
        .collect()
}

/// Validate that a name is a valid HCL identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')) {
        return Some("name must contain only letters, numbers, underscores, and dashes");
    }

    None
}
