//! libgit2-backed object store.
//!
//! The repository is reopened for every call, so a `GitRepository` holds
//! nothing but a path and is cheap to clone.

use super::ObjectStore;
use crate::models::{EntryKind, NotesRef, ObjectId, TreeEntry};
use crate::{Error, Result};
use git2::{ErrorCode, Oid, Repository, Signature, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Git repository on disk.
#[derive(Debug, Clone)]
pub struct GitRepository {
    /// Path to the repository (work tree or git dir).
    repo_path: PathBuf,
}

impl GitRepository {
    /// Signature used when the repository has no `user.name`/`user.email`.
    const FALLBACK_NAME: &'static str = "gitnotes";
    const FALLBACK_EMAIL: &'static str = "gitnotes@local";

    /// Creates a store for the repository at `repo_path`.
    #[must_use]
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the repository path.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Opens the git repository containing `repo_path`, searching parent
    /// directories like `git` does.
    fn open_repo(&self) -> Result<Repository> {
        Repository::discover(&self.repo_path).map_err(|e| Error::OperationFailed {
            operation: "open_repository".to_string(),
            cause: e.to_string(),
        })
    }

    /// Gets the default signature for notes commits.
    fn get_signature(repo: &Repository) -> Result<Signature<'static>> {
        repo.signature().or_else(|_| {
            Signature::now(Self::FALLBACK_NAME, Self::FALLBACK_EMAIL).map_err(|e| {
                Error::OperationFailed {
                    operation: "create_signature".to_string(),
                    cause: e.to_string(),
                }
            })
        })
    }

    fn parse_oid(id: &ObjectId) -> Result<Oid> {
        Oid::from_str(id.as_str())
            .map_err(|e| Error::InvalidInput(format!("Invalid object ID '{id}': {e}")))
    }

    fn failed(operation: &str, e: &git2::Error) -> Error {
        Error::OperationFailed {
            operation: operation.to_string(),
            cause: e.to_string(),
        }
    }
}

/// Joins new note content onto an existing note the way `git notes append`
/// does: a blank line between paragraphs and a trailing newline. Empty
/// content leaves an existing note untouched.
fn compose_note(existing: Option<&str>, content: &str) -> String {
    let mut note = match existing {
        Some(prev) if !prev.trim().is_empty() && content.is_empty() => return prev.to_string(),
        Some(prev) if !prev.trim().is_empty() => {
            let mut note = prev.trim_end_matches('\n').to_string();
            note.push_str("\n\n");
            note
        },
        _ => String::new(),
    };
    note.push_str(content);
    if !note.ends_with('\n') {
        note.push('\n');
    }
    note
}

/// Strips a leading `./` and trailing slashes from a tree path.
fn normalize_path(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path).trim_end_matches('/')
}

/// Whether `path` can name an entry inside a tree: relative, with no empty,
/// `.` or `..` components.
fn is_tree_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .split('/')
            .all(|component| !matches!(component, "" | "." | ".."))
}

impl ObjectStore for GitRepository {
    fn lookup_object(&self, id: &str) -> Result<Option<ObjectId>> {
        if !ObjectId::is_hex_like(id) {
            return Ok(None);
        }
        let repo = self.open_repo()?;
        match repo.find_object_by_prefix(id, None) {
            Ok(object) => Ok(Some(object.id().into())),
            Err(e)
                if matches!(
                    e.code(),
                    ErrorCode::NotFound | ErrorCode::Ambiguous | ErrorCode::InvalidSpec
                ) =>
            {
                debug!(id, code = ?e.code(), "object lookup missed");
                Ok(None)
            },
            Err(e) => Err(Self::failed("lookup_object", &e)),
        }
    }

    fn search_commits(
        &self,
        predicate: &dyn Fn(&str) -> bool,
        limit: usize,
    ) -> Result<Vec<ObjectId>> {
        let repo = self.open_repo()?;
        let mut walk = repo.revwalk().map_err(|e| Self::failed("revwalk", &e))?;
        walk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)
            .map_err(|e| Self::failed("revwalk_sort", &e))?;

        match walk.push_head() {
            Ok(()) => {},
            // Nothing committed yet.
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(Vec::new());
            },
            Err(e) => return Err(Self::failed("revwalk_push_head", &e)),
        }

        let mut matches = Vec::new();
        for oid in walk {
            if matches.len() >= limit {
                break;
            }
            let oid = oid.map_err(|e| Self::failed("revwalk_next", &e))?;
            let commit = repo
                .find_commit(oid)
                .map_err(|e| Self::failed("find_commit", &e))?;
            let message = String::from_utf8_lossy(commit.message_bytes());
            if predicate(&message) {
                matches.push(oid.into());
            }
        }

        Ok(matches)
    }

    fn read_tree_entry(&self, commit: &ObjectId, path: &str) -> Result<Option<TreeEntry>> {
        let repo = self.open_repo()?;
        let oid = Self::parse_oid(commit)?;
        let commit_obj = repo
            .find_object(oid, None)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| Error::not_found(commit.as_str(), e.message().to_string()))?;
        let tree = commit_obj
            .tree()
            .map_err(|e| Self::failed("read_commit_tree", &e))?;

        let path = normalize_path(path);
        if !is_tree_path(path) {
            debug!(path, "not a tree path");
            return Ok(None);
        }

        match tree.get_path(Path::new(path)) {
            Ok(entry) => Ok(Some(TreeEntry {
                id: entry.id().into(),
                kind: EntryKind::from(entry.kind()),
            })),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Self::failed("read_tree_entry", &e)),
        }
    }

    fn append_note(&self, id: &ObjectId, notes_ref: &NotesRef, content: &str) -> Result<()> {
        let append_failed = |cause: String| Error::AppendFailed {
            target: id.to_string(),
            notes_ref: notes_ref.to_string(),
            cause,
        };

        if !notes_ref.is_valid() {
            return Err(append_failed("invalid notes ref name".to_string()));
        }

        let repo = self.open_repo()?;
        let sig = Self::get_signature(&repo)?;
        let oid = Self::parse_oid(id)?;

        let existing = match repo.find_note(Some(notes_ref.as_str()), oid) {
            Ok(note) => note.message().map(String::from),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(append_failed(e.to_string())),
        };
        let note = compose_note(existing.as_deref(), content);
        if existing.as_deref() == Some(note.as_str()) {
            debug!(target_id = %id, notes_ref = %notes_ref, "note unchanged");
            return Ok(());
        }

        repo.note(&sig, &sig, Some(notes_ref.as_str()), oid, &note, true)
            .map_err(|e| append_failed(e.to_string()))?;

        debug!(
            target_id = %id,
            notes_ref = %notes_ref,
            appended = existing.is_some(),
            "wrote note"
        );
        Ok(())
    }

    fn read_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<Option<String>> {
        let repo = self.open_repo()?;
        let oid = Self::parse_oid(id)?;

        match repo.find_note(Some(notes_ref.as_str()), oid) {
            Ok(note) => Ok(note.message().map(String::from)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Self::failed("read_note", &e)),
        }
    }

    fn remove_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<bool> {
        let repo = self.open_repo()?;
        let sig = Self::get_signature(&repo)?;
        let oid = Self::parse_oid(id)?;

        match repo.note_delete(oid, Some(notes_ref.as_str()), &sig, &sig) {
            Ok(()) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(Self::failed("remove_note", &e)),
        }
    }
}
