//! Notes refs (namespaces).

use std::fmt;

/// A notes ref, the bucket notes are stored under.
///
/// Short names are expanded the way `git notes --ref` does it:
/// `refs/...` is kept, `notes/x` becomes `refs/notes/x` and a bare `x`
/// becomes `refs/notes/x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotesRef(String);

impl NotesRef {
    /// Git's default notes ref.
    pub const DEFAULT: &'static str = "refs/notes/commits";

    /// Creates a notes ref, expanding short names.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.starts_with("refs/") {
            Self(name.to_string())
        } else if name.starts_with("notes/") {
            Self(format!("refs/{name}"))
        } else {
            Self(format!("refs/notes/{name}"))
        }
    }

    /// Returns the full ref name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if git accepts this as a reference name.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        git2::Reference::is_valid_name(&self.0)
    }
}

impl Default for NotesRef {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for NotesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NotesRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NotesRef {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
