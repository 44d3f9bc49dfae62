use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Boxed to keep `Result` small on the happy path
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the task configuration with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse task configuration")]
    #[diagnostic(code(tfsync::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(tfsync::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(tfsync::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, underscores, and dashes, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("variable '{name}' shadows a module argument")]
    #[diagnostic(
        code(tfsync::reserved_variable),
        help("the module block already sets '{name}', rename the variable")
    )]
    ReservedVariable {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved name used here")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("duplicate service '{name}'")]
    #[diagnostic(
        code(tfsync::duplicate_service),
        help("each service can only be listed once per task")
    )]
    DuplicateService {
        #[source_code]
        src: NamedSource<String>,
        #[label("first listed here")]
        first_span: Option<SourceSpan>,
        #[label("listed again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_identifier(
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            src: NamedSource::new(filename, src.to_string()),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn reserved_variable(
        name: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::ReservedVariable {
            src: NamedSource::new(filename, src.to_string()),
            span,
            name: name.into(),
        })
    }

    pub fn duplicate_service(
        name: impl Into<String>,
        src: &str,
        filename: &str,
        spans: (Option<SourceSpan>, Option<SourceSpan>),
    ) -> Box<Self> {
        Box::new(Error::DuplicateService {
            src: NamedSource::new(filename, src.to_string()),
            first_span: spans.0,
            second_span: spans.1,
            name: name.into(),
        })
    }
}
