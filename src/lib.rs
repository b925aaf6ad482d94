//! # gitnotes
//!
//! Append git notes to objects you can name without knowing their hash.
//!
//! A target can be given directly by (possibly abbreviated) object id, by a
//! substring of a commit message, or as a file or folder path inside a
//! commit. The target is resolved to a canonical object id first, then the
//! note under the chosen notes ref is appended to.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gitnotes::{GitRepository, NotesRef, NotesService};
//!
//! let notes = NotesService::new(GitRepository::new("."), NotesRef::default());
//! notes.text("reviewed", None).append_at_file("LICENSE", "Initial commit")?;
//! notes.manual(Some(NotesRef::new("test/append"))).at("af23339")?.append("ok")?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod git;
pub mod models;
pub mod observability;
pub mod services;

pub use config::GitNotesConfig;
pub use git::{GitRepository, ObjectStore};
pub use models::{CommitLocator, EntryKind, Locator, NotesRef, ObjectId, TreeEntry};
pub use services::{
    BoundNotes, HashNotes, ManualNotes, NotesHandle, NotesInit, NotesService, Resolver, TextNotes,
};

/// Error type for gitnotes operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `NotFound` | A hash, commit message or path does not name an object of the requested kind |
/// | `AppendFailed` | Git rejected writing the note (invalid notes ref, write failure) |
/// | `InvalidInput` | Bad argument combinations or configuration values |
/// | `OperationFailed` | Opening the repository, walking history, reading config |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A locator did not resolve to an object.
    ///
    /// Raised when:
    /// - The hash is malformed, unknown or ambiguous
    /// - No commit reachable from `HEAD` has a matching message
    /// - The path is missing in the commit, or names a folder where a file
    ///   was requested (and vice versa)
    #[error("not found: {locator} ({reason})")]
    NotFound {
        /// The locator as given by the caller.
        locator: String,
        /// Why it did not resolve.
        reason: String,
    },

    /// Git refused to append the note.
    #[error("failed to append note to {target} under '{notes_ref}': {cause}")]
    AppendFailed {
        /// The resolved object id.
        target: String,
        /// The notes ref written to.
        notes_ref: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds a [`Error::NotFound`].
    pub fn not_found(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotFound {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error means the target could not be located.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for gitnotes operations.
pub type Result<T> = std::result::Result<T, Error>;
