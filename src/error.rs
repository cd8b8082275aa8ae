use thiserror::Error;

/// Classifies hostname syntax failures for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Empty label (leading, trailing or doubled dot, or empty input)
    EmptyLabel,
    /// Label longer than 63 octets
    LabelTooLong,
    /// Whole hostname longer than the configured maximum
    DomainTooLong,
    /// Character outside the hostname charset
    InvalidCharacter,
    /// Label starts or ends with a hyphen
    HyphenPlacement,
    /// ACE label failed to decode or did not round-trip
    Punycode,
    /// Unicode label rejected by the IDNA tables
    Idna,
}

/// Classifies URL host extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlErrorKind {
    /// Neither `scheme://` nor a leading `//`
    MissingScheme,
    /// Nothing left after stripping userinfo, port and path
    EmptyHost,
}

/// Domain extraction error types
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Suffix list not loaded")]
    NotLoaded,

    #[error("Invalid domain syntax: {message}")]
    InvalidSyntax {
        kind: SyntaxErrorKind,
        message: String,
    },

    #[error("Malformed URL: {message}")]
    MalformedUrl { kind: UrlErrorKind, message: String },

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractError {
    pub(crate) fn syntax(kind: SyntaxErrorKind, message: impl Into<String>) -> Self {
        ExtractError::InvalidSyntax {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn url(kind: UrlErrorKind, message: impl Into<String>) -> Self {
        ExtractError::MalformedUrl {
            kind,
            message: message.into(),
        }
    }

    /// Syntax failure kind, if this is a syntax error.
    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            ExtractError::InvalidSyntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// URL failure kind, if this is a URL error.
    pub fn url_kind(&self) -> Option<UrlErrorKind> {
        match self {
            ExtractError::MalformedUrl { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
