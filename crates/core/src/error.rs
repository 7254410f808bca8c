use crate::types::ParamType;

/// Coarse error category, used by callers that only care about the class of
/// failure rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source line or token does not have the expected shape.
    Format,
    /// Token text cannot be converted to the requested scalar type.
    Type,
    /// Numeric text is well-formed but out of range for the target width.
    Overflow,
    /// A name was defined twice with different types.
    SchemaConflict,
    /// A defined parameter has neither a source value nor a default.
    MissingValue,
    /// A read was attempted for a name that was never defined.
    UndefinedParameter,
    /// A defined parameter was read as a different type than it was declared with.
    TypeRequest,
    /// The parameter source could not be read.
    Io,
}

/// All errors produced while loading, defining, or reading parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// A non-blank line that is neither a comment, a section header, nor a
    /// `name=value` assignment.
    #[error("line {line}: expected `name=value`, found `{text}`")]
    MalformedLine { line: usize, text: String },

    /// A vector value with an empty element (leading, trailing or doubled comma).
    #[error("empty token at position {index} in `{text}`")]
    EmptyToken { text: String, index: usize },

    /// A pair value without its key/value separator.
    #[error("missing `{separator}` separator in `{text}`")]
    MissingSeparator { text: String, separator: char },

    /// `target` is the name of the type the text was converted to.
    #[error("cannot convert `{text}` to {target}")]
    Type { text: String, target: String },

    #[error("value `{text}` is out of range for {target}")]
    Overflow { text: String, target: String },

    #[error("parameter '{name}' is already defined as {existing}, cannot redefine as {requested}")]
    SchemaConflict {
        name: String,
        existing: ParamType,
        requested: ParamType,
    },

    #[error("parameter '{name}' has no value and no default")]
    MissingValue { name: String },

    #[error("parameter '{name}' was never defined")]
    UndefinedParameter { name: String },

    #[error("parameter '{name}' is defined as {declared} but was read as {requested}")]
    TypeRequest {
        name: String,
        declared: ParamType,
        requested: ParamType,
    },

    #[error("cannot read parameter source {path}: {message}")]
    Io { path: String, message: String },

    /// A coercion failure attributed to the parameter being read.
    #[error("parameter '{name}': {source}")]
    Invalid {
        name: String,
        #[source]
        source: Box<ParamError>,
    },
}

impl ParamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParamError::MalformedLine { .. }
            | ParamError::EmptyToken { .. }
            | ParamError::MissingSeparator { .. } => ErrorKind::Format,
            ParamError::Type { .. } => ErrorKind::Type,
            ParamError::Overflow { .. } => ErrorKind::Overflow,
            ParamError::SchemaConflict { .. } => ErrorKind::SchemaConflict,
            ParamError::MissingValue { .. } => ErrorKind::MissingValue,
            ParamError::UndefinedParameter { .. } => ErrorKind::UndefinedParameter,
            ParamError::TypeRequest { .. } => ErrorKind::TypeRequest,
            ParamError::Io { .. } => ErrorKind::Io,
            ParamError::Invalid { source, .. } => source.kind(),
        }
    }

    /// True for errors that indicate a bug in the calling code rather than
    /// bad input data. These should abort setup instead of being retried or
    /// reported to the end user as a configuration problem.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UndefinedParameter | ErrorKind::TypeRequest
        )
    }

    /// Attach the parameter name to a coercion error.
    pub(crate) fn for_parameter(self, name: &str) -> ParamError {
        match self {
            ParamError::Invalid { .. } => self,
            other => ParamError::Invalid {
                name: name.to_owned(),
                source: Box::new(other),
            },
        }
    }
}
