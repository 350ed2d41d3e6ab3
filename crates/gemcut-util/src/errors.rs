use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all gemcut operations.
#[derive(Debug, Error, Diagnostic)]
pub enum GemcutError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Gemcut.toml) or gem table.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Gemcut.toml for syntax errors and undeclared gems"))]
    Manifest { message: String },

    /// An explicit bundle list names a gem that is not in the table.
    #[error("{context}: unknown gem '{name}' in {label} list")]
    #[diagnostic(help("Declare the gem or remove it from the list"))]
    UnknownBundleGem {
        name: String,
        label: String,
        context: String,
    },

    /// The resolved pass and drop sets intersect.
    #[error("{context}: {message}: {}", .names.join(", "))]
    #[diagnostic(help("A gem cannot be bundled and dropped in the same build"))]
    Conflict {
        message: String,
        names: Vec<String>,
        context: String,
    },

    /// A gem could not be selected at runtime.
    #[error("cannot load such file - {name}")]
    Load { name: String },

    /// The selection session no longer accepts requests.
    #[error("currently feature is sealed")]
    Sealed,

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type GemcutResult<T> = miette::Result<T>;
