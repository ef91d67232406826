use thiserror::Error;

/// Result type alias using DataShapeError
pub type Result<T> = std::result::Result<T, DataShapeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every fallible operation in the crate surfaces exactly one of these kinds.
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A schema spec the type synthesizer cannot classify or register
    Shape,
    /// A value or default whose runtime type cannot be parsed
    Type,
    /// An enumeration value with no matching member, or an unmergeable pair
    Value,
    /// Untyped input that is not map-like where a map was expected
    DataShape,
    /// Unexpected keys rejected by strict decoding
    StrictViolation,
    /// Path resolution failures (missing member, bad index)
    Path,
    /// Valid input the builder does not support yet
    NotImplemented,
    Serialization,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Shape => "ERR_SHAPE",
            ErrorKind::Type => "ERR_TYPE",
            ErrorKind::Value => "ERR_VALUE",
            ErrorKind::DataShape => "ERR_DATA_SHAPE",
            ErrorKind::StrictViolation => "ERR_STRICT_VIOLATION",
            ErrorKind::Path => "ERR_PATH",
            ErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification fields used by the logging facility and the
/// CLI, plus the member/path context of the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    member: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            member: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the type being processed
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add the offending member / field / key
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Add the dotted path where the failure happened
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(member) = &self.member {
            write!(f, " (member: {})", member)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for shape synthesis, decoding, defaulting, path access and merging
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataShapeError {
    // ===== Shape Errors =====
    /// A schema node carried a discriminator the synthesizer does not know
    #[error("Unrecognised spec type: {type_tag}")]
    UnknownSpecType { type_tag: String },

    /// Two children of one group share a variable name
    #[error("Duplicate member '{variable}' in group {group}")]
    DuplicateMember { group: String, variable: String },

    /// Two different generated types map to the same registry name
    #[error("Type name collision in registry: {type_name}")]
    RegistryCollision { type_name: String },

    /// A nested group has no entry in the registry handed to the builder
    #[error("No registered sub-type named {type_name}")]
    UnregisteredSubtype { type_name: String },

    /// A schema document is structurally invalid
    #[error("Invalid schema document: {reason}")]
    InvalidSchemaDocument { reason: String },

    // ===== Type Errors =====
    /// A default provider produced a value the member shape cannot hold
    #[error("Invalid default for field {field}: {reason}")]
    InvalidDefault { field: String, reason: String },

    /// Record construction without values for required members
    #[error("{type_name} is missing required members: {}", .members.join(", "))]
    MissingMembers {
        type_name: String,
        members: Vec<String>,
    },

    /// Strict decoding found a value of the wrong runtime type
    #[error("{member} must be {expected} but found {found}")]
    TypeMismatch {
        member: String,
        expected: String,
        found: String,
    },

    /// A union declared a non-primitive arm
    #[error("Union member {member} has unsupported arm {arm}")]
    UnsupportedUnionArm { member: String, arm: String },

    // ===== Value Errors =====
    /// An enumeration value matched no declared member
    #[error("{value} is not a member of enum {enum_name}")]
    UnknownEnumValue { enum_name: String, value: String },

    /// Merge met two values it does not know how to combine
    #[error("Cannot merge {left} with {right} at '{path}'")]
    Unmergeable {
        path: String,
        left: String,
        right: String,
    },

    /// Two records compared member by member did not match
    #[error("{type_name} records differ in: {}", .members.join(", "))]
    RecordsDiffer {
        type_name: String,
        members: Vec<String>,
    },

    /// A path write targeted something that is not a container
    #[error("Cannot assign '{segment}' on {found} at '{path}'")]
    NotAContainer {
        path: String,
        segment: String,
        found: String,
    },

    // ===== Data Shape Errors =====
    /// Untyped input was not map-like where a record was expected
    #[error("Data is invalid for {type_name}: expected a map, found {found}")]
    NotAMap { type_name: String, found: String },

    // ===== Strict Violations =====
    /// Strict decoding met a key the target does not declare
    #[error("{key} must be in {type_name} fields")]
    UnexpectedKey { key: String, type_name: String },

    // ===== Path Errors =====
    /// Could not step through `segment` of `path`
    #[error("Cannot resolve '{segment}' of '{path}' on {found}")]
    PathNotFound {
        path: String,
        segment: String,
        found: String,
    },

    /// A sequence segment that is not a non-negative integer
    #[error("Invalid sequence index '{segment}' in '{path}'")]
    InvalidIndex { path: String, segment: String },

    /// Sequence index past the end
    #[error("Index {index} out of range (len {len}) in '{path}'")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// A record has no member with this name
    #[error("{type_name} has no member '{member}'")]
    UnknownMember { type_name: String, member: String },

    /// Wildcards are only meaningful for reads
    #[error("Wildcard segments are not supported when writing '{path}'")]
    WildcardNotAllowed { path: String },

    // ===== Not Implemented =====
    /// Caller-supplied values for lists of groups
    #[error("Not implemented: input lists for field {field}")]
    InputListsNotSupported { field: String },

    // ===== Serialization =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DataShapeError {
    /// Classify this error into the canonical taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataShapeError::UnknownSpecType { .. }
            | DataShapeError::DuplicateMember { .. }
            | DataShapeError::RegistryCollision { .. }
            | DataShapeError::UnregisteredSubtype { .. }
            | DataShapeError::InvalidSchemaDocument { .. } => ErrorKind::Shape,

            DataShapeError::InvalidDefault { .. }
            | DataShapeError::MissingMembers { .. }
            | DataShapeError::TypeMismatch { .. }
            | DataShapeError::UnsupportedUnionArm { .. } => ErrorKind::Type,

            DataShapeError::UnknownEnumValue { .. }
            | DataShapeError::Unmergeable { .. }
            | DataShapeError::RecordsDiffer { .. }
            | DataShapeError::NotAContainer { .. } => ErrorKind::Value,

            DataShapeError::NotAMap { .. } => ErrorKind::DataShape,

            DataShapeError::UnexpectedKey { .. } => ErrorKind::StrictViolation,

            DataShapeError::PathNotFound { .. }
            | DataShapeError::InvalidIndex { .. }
            | DataShapeError::IndexOutOfRange { .. }
            | DataShapeError::UnknownMember { .. }
            | DataShapeError::WildcardNotAllowed { .. } => ErrorKind::Path,

            DataShapeError::InputListsNotSupported { .. } => ErrorKind::NotImplemented,

            DataShapeError::Serialization { .. } => ErrorKind::Serialization,
        }
    }
}

/// Conversion from DataShapeError to ExError
///
/// Lifts the variant's identifying fields into the structured context so the
/// logging facility can record them without matching on variants.
impl From<DataShapeError> for ExError {
    fn from(err: DataShapeError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            DataShapeError::DuplicateMember { group, variable } => {
                base.with_type_name(group).with_member(variable)
            }
            DataShapeError::RegistryCollision { type_name }
            | DataShapeError::UnregisteredSubtype { type_name }
            | DataShapeError::MissingMembers { type_name, .. }
            | DataShapeError::RecordsDiffer { type_name, .. }
            | DataShapeError::NotAMap { type_name, .. } => base.with_type_name(type_name),
            DataShapeError::InvalidDefault { field, .. }
            | DataShapeError::InputListsNotSupported { field } => base.with_member(field),
            DataShapeError::TypeMismatch { member, .. }
            | DataShapeError::UnsupportedUnionArm { member, .. } => base.with_member(member),
            DataShapeError::UnknownEnumValue { enum_name, .. } => base.with_type_name(enum_name),
            DataShapeError::UnexpectedKey { key, type_name } => {
                base.with_type_name(type_name).with_member(key)
            }
            DataShapeError::UnknownMember { type_name, member } => {
                base.with_type_name(type_name).with_member(member)
            }
            DataShapeError::Unmergeable { path, .. }
            | DataShapeError::NotAContainer { path, .. }
            | DataShapeError::PathNotFound { path, .. }
            | DataShapeError::InvalidIndex { path, .. }
            | DataShapeError::IndexOutOfRange { path, .. }
            | DataShapeError::WildcardNotAllowed { path } => base.with_path(path),
            DataShapeError::UnknownSpecType { .. }
            | DataShapeError::InvalidSchemaDocument { .. }
            | DataShapeError::Serialization { .. } => base,
        }
    }
}

/// Conversion from serde_json::Error to DataShapeError
impl From<serde_json::Error> for DataShapeError {
    fn from(err: serde_json::Error) -> Self {
        DataShapeError::Serialization {
            message: err.to_string(),
        }
    }
}
