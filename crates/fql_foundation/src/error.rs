//! Error types for FQL rule compilation.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error here is a compilation error: evaluation of a compiled query
//! never fails.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the FQL crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for FQL operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context that is already present is merged: fields set on the
    /// existing context win, so the innermost location is kept.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(inner) => inner.merge(context),
            None => context,
        });
        self
    }

    /// Creates an invalid rule error.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRule {
            message: message.into(),
            raw: raw.into(),
        })
    }

    /// Creates an invalid count error.
    #[must_use]
    pub fn invalid_count(count: impl Into<String>, reason: CountProblem) -> Self {
        Self::new(ErrorKind::InvalidCount {
            count: count.into(),
            reason,
        })
    }

    /// Creates a disallowed wildcard error.
    #[must_use]
    pub fn disallowed_wildcard(raw: impl Into<String>) -> Self {
        Self::new(ErrorKind::DisallowedWildcard { raw: raw.into() })
    }

    /// Creates a misplaced anchor error.
    #[must_use]
    pub fn misplaced_anchor(anchor: impl Into<String>, index: usize) -> Self {
        Self::new(ErrorKind::MisplacedAnchor {
            anchor: anchor.into(),
            index,
        })
    }

    /// Returns true if this is a compilation error of the rule itself
    /// rather than malformed JSON text.
    #[must_use]
    pub fn is_rule_error(&self) -> bool {
        !matches!(self.kind, ErrorKind::Json(_))
    }
}

/// Categorized error kinds for rule compilation.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule declaration is structurally invalid.
    #[error("invalid rule: {message}: {raw}")]
    InvalidRule {
        /// Description of what is wrong.
        message: String,
        /// The offending raw declaration, rendered as JSON.
        raw: String,
    },

    /// A feature was declared as the bare `*` wildcard.
    #[error("invalid rule: the wildcard \"*\" is not supported, use \".*\" instead: {raw}")]
    DisallowedWildcard {
        /// The offending raw declaration, rendered as JSON.
        raw: String,
    },

    /// A count string could not be parsed.
    #[error("invalid count {count:?}: {reason}")]
    InvalidCount {
        /// The count string as written.
        count: String,
        /// Why it was rejected.
        reason: CountProblem,
    },

    /// An anchor meta token appeared outside its legal slot (strict mode only).
    #[error("anchor {anchor:?} is not allowed at pos index {index}")]
    MisplacedAnchor {
        /// The anchor feature (`^` or `$`).
        anchor: String,
        /// Index in the `pos` list where it appeared.
        index: usize,
    },

    /// Rule text was not valid JSON.
    #[error("malformed rule JSON: {0}")]
    Json(String),
}

/// Reasons a count string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountProblem {
    /// More than one comma between the braces.
    TooManyCommas,
    /// A non-empty component was not a non-negative integer.
    OnlyIntegers,
    /// The string is not wrapped in `{` and `}`.
    MissingBraces,
    /// Nothing between the braces.
    Empty,
    /// The lower bound exceeds the upper bound.
    Inverted,
}

impl fmt::Display for CountProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyCommas => write!(f, "too many commas"),
            Self::OnlyIntegers => write!(f, "only integers are allowed"),
            Self::MissingBraces => write!(f, "missing braces"),
            Self::Empty => write!(f, "empty count"),
            Self::Inverted => write!(f, "lower bound greater than upper bound"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Index of the rule set in the query.
    pub set: Option<usize>,
    /// Index of the alternative in the rule set.
    pub alternative: Option<usize>,
    /// Section of the alternative (`pos` or `Npos`).
    pub section: Option<&'static str>,
    /// Index of the entry within the section.
    pub entry: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule set index.
    #[must_use]
    pub fn with_set(mut self, set: usize) -> Self {
        self.set = Some(set);
        self
    }

    /// Sets the alternative index.
    #[must_use]
    pub fn with_alternative(mut self, alternative: usize) -> Self {
        self.alternative = Some(alternative);
        self
    }

    /// Sets the section and entry index.
    #[must_use]
    pub fn with_entry(mut self, section: &'static str, entry: usize) -> Self {
        self.section = Some(section);
        self.entry = Some(entry);
        self
    }

    fn merge(self, outer: Self) -> Self {
        Self {
            set: self.set.or(outer.set),
            alternative: self.alternative.or(outer.alternative),
            section: self.section.or(outer.section),
            entry: self.entry.or(outer.entry),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(set) = self.set {
            parts.push(format!("set {set}"));
        }
        if let Some(alt) = self.alternative {
            parts.push(format!("alternative {alt}"));
        }
        match (self.section, self.entry) {
            (Some(section), Some(entry)) => parts.push(format!("{section} entry {entry}")),
            (Some(section), None) => parts.push(section.to_string()),
            _ => {}
        }
        write!(f, "in {}", parts.join(", "))
    }
}
