//! Locators: the ways a note target can be named.

use super::ObjectId;
use std::fmt;

/// Names the commit a file or folder is looked up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitLocator {
    /// Full or abbreviated commit id.
    Hash(String),
    /// Substring of the commit message.
    Message(String),
    /// Hex-looking string: tried as a commit id first, then as a message
    /// substring (words like "decade" or "added" are valid hex).
    HashOrMessage(String),
}

impl CommitLocator {
    /// Classifies a free-form string: 4 to 40 hex digits may be either a
    /// hash or a message, anything else is a message substring.
    #[must_use]
    pub fn infer(s: impl Into<String>) -> Self {
        let s = s.into();
        if ObjectId::is_hex_like(&s) {
            Self::HashOrMessage(s)
        } else {
            Self::Message(s)
        }
    }
}

impl From<&str> for CommitLocator {
    fn from(s: &str) -> Self {
        Self::infer(s)
    }
}

impl From<String> for CommitLocator {
    fn from(s: String) -> Self {
        Self::infer(s)
    }
}

impl fmt::Display for CommitLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(id) | Self::HashOrMessage(id) => write!(f, "{id}"),
            Self::Message(message) => write!(f, "commit \"{message}\""),
        }
    }
}

/// A note target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Full or abbreviated object id.
    Hash(String),
    /// Newest commit whose message contains the substring.
    CommitMessage(String),
    /// Blob at a path in a commit.
    FileAt {
        /// Slash-separated path from the repository root.
        path: String,
        /// Commit holding the file.
        commit: CommitLocator,
    },
    /// Tree at a path in a commit.
    FolderAt {
        /// Slash-separated path from the repository root.
        path: String,
        /// Commit holding the folder.
        commit: CommitLocator,
    },
}

impl Locator {
    /// Creates a file locator.
    pub fn file(path: impl Into<String>, commit: impl Into<CommitLocator>) -> Self {
        Self::FileAt {
            path: path.into(),
            commit: commit.into(),
        }
    }

    /// Creates a folder locator.
    pub fn folder(path: impl Into<String>, commit: impl Into<CommitLocator>) -> Self {
        Self::FolderAt {
            path: path.into(),
            commit: commit.into(),
        }
    }
}

/// A bare commit locator names the commit itself. `HashOrMessage` becomes a
/// strict `Hash`; use [`CommitLocator::Message`] to search messages.
impl From<CommitLocator> for Locator {
    fn from(commit: CommitLocator) -> Self {
        match commit {
            CommitLocator::Hash(id) | CommitLocator::HashOrMessage(id) => Self::Hash(id),
            CommitLocator::Message(message) => Self::CommitMessage(message),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(id) => write!(f, "{id}"),
            Self::CommitMessage(message) => write!(f, "commit \"{message}\""),
            Self::FileAt { path, commit } => write!(f, "file '{path}' at {commit}"),
            Self::FolderAt { path, commit } => write!(f, "folder '{path}' at {commit}"),
        }
    }
}
