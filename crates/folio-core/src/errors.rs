use folio_core_types::{RequestId, SessionId};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The diff engine, summarizer and font resolver are total and never produce
/// these. Everything around them that validates input or performs I/O does.
/// Each kind maps to a stable code used by the CLI and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidDocument,
    MissingField,
    NotFound,
    UnknownSection,

    // Auth
    Unauthorised,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnknownSection => "ERR_UNKNOWN_SECTION",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// document context (section key, field path) for messages.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    section: Option<String>,
    field_path: Option<String>,
    request_id: Option<RequestId>,
    session_id: Option<SessionId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            section: None,
            field_path: None,
            request_id: None,
            session_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add section context
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Add field path context
    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add session ID context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the section context, if any
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Get the field path context, if any
    pub fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the session ID context, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(section) = &self.section {
            write!(f, " (section: {})", section)?;
        }
        if let Some(path) = &self.field_path {
            write!(f, " (field: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by content document operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolioError {
    /// Imported document root is not a record
    #[error("Invalid file contents.")]
    NotARecord,

    /// Imported document lacks a required top-level section
    #[error("Missing top-level key: {key}")]
    MissingSection { key: String },

    /// A field that must hold a list holds something else
    #[error("{path} must be an array")]
    NotAList { path: String },

    /// Section key is not one of the document's top-level sections
    #[error("Unknown section: {key}")]
    UnknownSection { key: String },

    /// No record with the given id exists in the list
    #[error("No record with id {id} at {path}")]
    RecordNotFound { path: String, id: String },

    /// Shared admin password did not match
    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,

    /// Commit sync requires both a branch and a message
    #[error("Both a branch name and commit message are required to sync with Git.")]
    IncompleteCommitRequest,

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<FolioError> for ExError {
    fn from(err: FolioError) -> Self {
        let message = err.to_string();
        match err {
            FolioError::NotARecord => ExError::new(ExErrorKind::InvalidDocument)
                .with_op("validate_import")
                .with_message(message),

            FolioError::MissingSection { key } => ExError::new(ExErrorKind::MissingField)
                .with_op("validate_import")
                .with_section(key)
                .with_message(message),

            FolioError::NotAList { path } => ExError::new(ExErrorKind::InvalidDocument)
                .with_op("validate_import")
                .with_field_path(path)
                .with_message(message),

            FolioError::UnknownSection { key } => ExError::new(ExErrorKind::UnknownSection)
                .with_section(key)
                .with_message(message),

            FolioError::RecordNotFound { path, .. } => ExError::new(ExErrorKind::NotFound)
                .with_field_path(path)
                .with_message(message),

            FolioError::IncorrectPassword => ExError::new(ExErrorKind::Unauthorised)
                .with_op("login")
                .with_message(message),

            FolioError::IncompleteCommitRequest => ExError::new(ExErrorKind::InvalidInput)
                .with_op("commit_sync")
                .with_message(message),

            FolioError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to FolioError
impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::from(err).into()
    }
}
