use thiserror::Error;

/// Errors raised by the tree operations engine.
///
/// Not-found lookups are not errors: `remove` and `find` return `Option` and `update`
/// returns `Ok(false)`. These variants cover the cases a caller has to react to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Slot '{locator}' was not found in the field tree")]
    SlotNotFound { locator: String },

    #[error("Field '{0}' was not found in the field tree")]
    FieldNotFound(String),

    #[error("Patch key '{0}' cannot be changed after a field is created")]
    ProtectedKey(String),

    #[error("Patch for field '{field_id}' is invalid: {message}")]
    InvalidPatch { field_id: String, message: String },

    #[error("Patch key '{key}' has an invalid value: {message}")]
    InvalidPatchValue { key: String, message: String },

    #[error("Field '{field_id}' of type {field_type} does not support {capability}")]
    Unsupported {
        field_id: String,
        field_type: String,
        capability: &'static str,
    },
}

/// Errors that can occur while tokenizing or parsing a calculated-field formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Formula is empty")]
    Empty,

    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("Field reference starting at position {0} is not terminated by '}}'")]
    UnterminatedReference(usize),

    #[error("Field reference at position {0} is empty")]
    EmptyReference(usize),

    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of formula, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Formula nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Errors raised by snapshot persistence backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot '{path}' is not a valid workspace: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the form library when an identity acts on saved forms.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("User '{user_id}' lacks the '{permission}' permission")]
    PermissionDenied { user_id: String, permission: String },

    #[error("Form '{form_id}' belongs to another organization")]
    WrongOrganization { form_id: String },

    #[error("Form '{0}' was not found")]
    FormNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
