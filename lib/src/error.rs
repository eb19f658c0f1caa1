use std::fmt;

// -------------------------------------------------------------------------- //
// Decode Errors

/// The reason a decode failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("malformed compact integer")]
    MalformedInteger,

    #[error("input truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("unknown variant discriminant {discriminant:#04x}")]
    UnknownVariant { discriminant: u8 },

    #[error("invalid numeric text {0:?}")]
    InvalidNumericText(String),

    #[error("sequence length {len} exceeds limit {max}")]
    LengthLimit { len: usize, max: usize },

    #[error("{0} trailing bytes after complete value")]
    TrailingBytes(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid json: {0}")]
    Json(String),
}

/// One step of the path from the outermost value to the failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// A decode error together with the field path at which it occurred.
///
/// Segments are collected while the error unwinds, so they are stored
/// innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    path: Vec<PathSegment>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            path: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Prefix the path with an enclosing field.
    pub fn at(mut self, field: &'static str) -> Self {
        self.path.push(PathSegment::Field(field));
        self
    }

    /// Prefix the path with an enclosing sequence index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push(PathSegment::Index(index));
        self
    }

    /// Path segments, outermost first.
    pub fn path(&self) -> impl Iterator<Item = &PathSegment> {
        self.path.iter().rev()
    }

    /// Dotted rendering of the path, e.g. `digest.logs[2].Seal`.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in self.path() {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
            }
        }
        out
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::Truncated { .. })
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} at {}", self.kind, self.path_string())
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// -------------------------------------------------------------------------- //
// Field Annotation

pub(crate) trait ResultExt<T> {
    fn at(self, field: &'static str) -> Result<T>;
    fn at_index(self, index: usize) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn at(self, field: &'static str) -> Result<T> {
        self.map_err(|e| e.at(field))
    }

    fn at_index(self, index: usize) -> Result<T> {
        self.map_err(|e| e.at_index(index))
    }
}
