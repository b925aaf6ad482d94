//! Git object identifiers and tree entries.

use std::fmt;

/// Canonical (full-length) identifier of a git object.
///
/// Only produced by resolution, so holding one means the object existed
/// when it was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Shortest abbreviation git accepts.
    pub const MIN_ABBREV_LEN: usize = 4;
    /// Length of a full SHA-1 object id.
    pub const FULL_LEN: usize = 40;

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional 7-character abbreviation.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }

    /// Returns true if `candidate` is syntactically a full or abbreviated id.
    #[must_use]
    pub fn is_hex_like(candidate: &str) -> bool {
        (Self::MIN_ABBREV_LEN..=Self::FULL_LEN).contains(&candidate.len())
            && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl From<git2::Oid> for ObjectId {
    fn from(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of object stored at a tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// File contents.
    Blob,
    /// Directory.
    Tree,
    /// Submodule commit or anything else.
    Other,
}

impl EntryKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "file",
            Self::Tree => "folder",
            Self::Other => "other",
        }
    }
}

impl From<Option<git2::ObjectType>> for EntryKind {
    fn from(kind: Option<git2::ObjectType>) -> Self {
        match kind {
            Some(git2::ObjectType::Blob) => Self::Blob,
            Some(git2::ObjectType::Tree) => Self::Tree,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An entry found at a path inside a commit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Id of the blob or tree at the path.
    pub id: ObjectId,
    /// What kind of object it is.
    pub kind: EntryKind,
}
