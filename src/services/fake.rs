//! In-memory object store for service tests.

use crate::git::ObjectStore;
use crate::models::{EntryKind, NotesRef, ObjectId, TreeEntry};
use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

pub const INITIAL: &str = "af233391c665c79184a0d14cfe384b13a852e431";
pub const SECOND: &str = "b0279ab0c0ffee00000000000000000000000001";
pub const LICENSE_BLOB: &str = "cf1ab25000000000000000000000000000000002";
pub const GITHUB_TREE: &str = "d00d000000000000000000000000000000000003";
/// Root commit whose message is itself valid hex ("decade").
pub const OLDEST: &str = "0e1d000000000000000000000000000000000004";

pub fn oid(s: &str) -> ObjectId {
    git2::Oid::from_str(s).unwrap().into()
}

/// Three commits, newest first: "add another folder" (`.github/`,
/// `LICENSE`), "Initial commit" (`LICENSE`) and "decade of fixes"
/// (`LICENSE`).
pub struct FakeStore {
    commits: Vec<(&'static str, &'static str)>,
    trees: HashMap<(&'static str, &'static str), TreeEntry>,
    pub notes: RefCell<BTreeMap<(String, String), String>>,
    pub appends: RefCell<Vec<(ObjectId, NotesRef, String)>>,
}

impl FakeStore {
    pub fn new() -> Self {
        let blob = TreeEntry {
            id: oid(LICENSE_BLOB),
            kind: EntryKind::Blob,
        };
        let tree = TreeEntry {
            id: oid(GITHUB_TREE),
            kind: EntryKind::Tree,
        };
        let mut trees = HashMap::new();
        trees.insert((OLDEST, "LICENSE"), blob.clone());
        trees.insert((INITIAL, "LICENSE"), blob.clone());
        trees.insert((SECOND, "LICENSE"), blob);
        trees.insert((SECOND, ".github"), tree);

        Self {
            commits: vec![
                (SECOND, "add another folder\n"),
                (INITIAL, "Initial commit\n"),
                (OLDEST, "decade of fixes\n"),
            ],
            trees,
            notes: RefCell::new(BTreeMap::new()),
            appends: RefCell::new(Vec::new()),
        }
    }

    fn all_ids() -> [&'static str; 5] {
        [INITIAL, SECOND, LICENSE_BLOB, GITHUB_TREE, OLDEST]
    }
}

impl ObjectStore for FakeStore {
    fn lookup_object(&self, id: &str) -> Result<Option<ObjectId>> {
        if !ObjectId::is_hex_like(id) {
            return Ok(None);
        }
        let id = id.to_ascii_lowercase();
        let hits: Vec<_> = Self::all_ids()
            .into_iter()
            .filter(|full| full.starts_with(&id))
            .collect();
        Ok(match hits.as_slice() {
            [only] => Some(oid(only)),
            _ => None,
        })
    }

    fn search_commits(
        &self,
        predicate: &dyn Fn(&str) -> bool,
        limit: usize,
    ) -> Result<Vec<ObjectId>> {
        Ok(self
            .commits
            .iter()
            .filter(|(_, message)| predicate(message))
            .take(limit)
            .map(|(id, _)| oid(id))
            .collect())
    }

    fn read_tree_entry(&self, commit: &ObjectId, path: &str) -> Result<Option<TreeEntry>> {
        if !self.commits.iter().any(|(id, _)| *id == commit.as_str()) {
            return Err(Error::not_found(commit.as_str(), "not a commit"));
        }
        Ok(self
            .trees
            .iter()
            .find(|((c, p), _)| *c == commit.as_str() && *p == path)
            .map(|(_, entry)| entry.clone()))
    }

    fn append_note(&self, id: &ObjectId, notes_ref: &NotesRef, content: &str) -> Result<()> {
        if !notes_ref.is_valid() {
            return Err(Error::AppendFailed {
                target: id.to_string(),
                notes_ref: notes_ref.to_string(),
                cause: "invalid notes ref name".to_string(),
            });
        }
        self.appends
            .borrow_mut()
            .push((id.clone(), notes_ref.clone(), content.to_string()));
        self.notes
            .borrow_mut()
            .entry((id.to_string(), notes_ref.to_string()))
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<Option<String>> {
        Ok(self
            .notes
            .borrow()
            .get(&(id.to_string(), notes_ref.to_string()))
            .cloned())
    }

    fn remove_note(&self, id: &ObjectId, notes_ref: &NotesRef) -> Result<bool> {
        Ok(self
            .notes
            .borrow_mut()
            .remove(&(id.to_string(), notes_ref.to_string()))
            .is_some())
    }
}
