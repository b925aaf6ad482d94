//! Git operations.
//!
//! The [`ObjectStore`] trait is everything the resolver and the notes
//! service need from version control. [`GitRepository`] implements it on
//! top of libgit2.

mod repository;

pub use repository::GitRepository;

use crate::Result;
use crate::models::{NotesRef, ObjectId, TreeEntry};

/// Primitive queries and writes against a git object store.
///
/// Lookups return `Ok(None)` for "no such thing"; `Err` is reserved for the
/// store itself failing.
pub trait ObjectStore {
    /// Expands a full or abbreviated id to the canonical id of an existing
    /// object.
    fn lookup_object(&self, id: &str) -> Result<Option<ObjectId>>;

    /// Returns up to `limit` commits reachable from `HEAD` whose message
    /// satisfies `predicate`, newest first.
    fn search_commits(&self, predicate: &dyn Fn(&str) -> bool, limit: usize)
    -> Result<Vec<ObjectId>>;

    /// Returns the entry at `path` in the tree of `commit`, if any.
    ///
    /// Fails with `NotFound` if `commit` does not name a commit.
    fn read_tree_entry(&self, commit: &ObjectId, path: &str) -> Result<Option<TreeEntry>>;

    /// Appends `content` to the note on `id` under `notes_ref`, creating the
    /// note if there is none.
    fn append_note(&self, id: &ObjectId, notes_ref: &NotesRef, content: &str) -> Result<()>;

    /// Reads the note on `id` under `notes_ref`.
    fn read_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<Option<String>>;

    /// Removes the note on `id` under `notes_ref`. Returns false if there was
    /// none.
    fn remove_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<bool>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn lookup_object(&self, id: &str) -> Result<Option<ObjectId>> {
        (**self).lookup_object(id)
    }

    fn search_commits(
        &self,
        predicate: &dyn Fn(&str) -> bool,
        limit: usize,
    ) -> Result<Vec<ObjectId>> {
        (**self).search_commits(predicate, limit)
    }

    fn read_tree_entry(&self, commit: &ObjectId, path: &str) -> Result<Option<TreeEntry>> {
        (**self).read_tree_entry(commit, path)
    }

    fn append_note(&self, id: &ObjectId, notes_ref: &NotesRef, content: &str) -> Result<()> {
        (**self).append_note(id, notes_ref, content)
    }

    fn read_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<Option<String>> {
        (**self).read_note(id, notes_ref)
    }

    fn remove_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<bool> {
        (**self).remove_note(id, notes_ref)
    }
}
