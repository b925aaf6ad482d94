//! Locator resolution.
//!
//! Maps hashes, commit messages and paths inside commits to canonical
//! object ids. Read-only.

use crate::git::ObjectStore;
use crate::models::{CommitLocator, EntryKind, Locator, ObjectId};
use crate::{Error, Result};
use tracing::{debug, instrument};

/// Resolves [`Locator`]s against an [`ObjectStore`].
pub struct Resolver<S> {
    store: S,
}

impl<S: ObjectStore> Resolver<S> {
    /// Creates a resolver over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Resolves any locator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the locator names no object of the
    /// requested kind.
    pub fn resolve(&self, locator: &Locator) -> Result<ObjectId> {
        match locator {
            Locator::Hash(id) => self.resolve_hash(id),
            Locator::CommitMessage(message) => self.resolve_commit(message),
            Locator::FileAt { path, commit } => self.resolve_file(path, commit),
            Locator::FolderAt { path, commit } => self.resolve_folder(path, commit),
        }
    }

    /// Expands a full or abbreviated id to the canonical id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the id is malformed, unknown, or an
    /// ambiguous abbreviation.
    #[instrument(skip(self), fields(operation = "resolve.hash"))]
    pub fn resolve_hash(&self, id: &str) -> Result<ObjectId> {
        let resolved = self
            .store
            .lookup_object(id)?
            .ok_or_else(|| Error::not_found(id, "no such object"))?;
        debug!(resolved = %resolved, "resolved hash");
        Ok(resolved)
    }

    /// Finds the newest commit reachable from `HEAD` whose message contains
    /// `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no commit message matches, or if
    /// `message` is empty.
    #[instrument(skip(self), fields(operation = "resolve.commit"))]
    pub fn resolve_commit(&self, message: &str) -> Result<ObjectId> {
        let locator = || format!("commit \"{message}\"");
        if message.is_empty() {
            return Err(Error::not_found(locator(), "empty commit message"));
        }

        let resolved = self
            .store
            .search_commits(&|candidate: &str| candidate.contains(message), 1)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(locator(), "no commit message matches"))?;
        debug!(resolved = %resolved, "resolved commit message");
        Ok(resolved)
    }

    /// Resolves the commit part of a file or folder locator.
    ///
    /// A [`CommitLocator::HashOrMessage`] is looked up as an object id first
    /// and searched as a message substring when that finds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the hash or message does not resolve.
    pub fn resolve_commit_locator(&self, commit: &CommitLocator) -> Result<ObjectId> {
        match commit {
            CommitLocator::Hash(id) => self.resolve_hash(id),
            CommitLocator::Message(message) => self.resolve_commit(message),
            CommitLocator::HashOrMessage(text) => match self.resolve_hash(text) {
                Err(e) if e.is_not_found() => {
                    debug!(text = %text, "no object with that id, searching messages");
                    self.resolve_commit(text)
                },
                other => other,
            },
        }
    }

    /// Returns the blob at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the commit does not resolve, or the
    /// path is missing or not a file.
    #[instrument(skip(self), fields(operation = "resolve.file"))]
    pub fn resolve_file(&self, path: &str, commit: &CommitLocator) -> Result<ObjectId> {
        self.resolve_entry(path, commit, EntryKind::Blob)
    }

    /// Returns the tree at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the commit does not resolve, or the
    /// path is missing or not a folder.
    #[instrument(skip(self), fields(operation = "resolve.folder"))]
    pub fn resolve_folder(&self, path: &str, commit: &CommitLocator) -> Result<ObjectId> {
        self.resolve_entry(path, commit, EntryKind::Tree)
    }

    fn resolve_entry(
        &self,
        path: &str,
        commit: &CommitLocator,
        wanted: EntryKind,
    ) -> Result<ObjectId> {
        let commit_id = self.resolve_commit_locator(commit)?;
        let locator = || format!("{wanted} '{path}' at {commit}");

        match self.store.read_tree_entry(&commit_id, path)? {
            Some(entry) if entry.kind == wanted => {
                debug!(resolved = %entry.id, commit = %commit_id, "resolved {wanted}");
                Ok(entry.id)
            },
            Some(entry) => Err(Error::not_found(
                locator(),
                format!("path is a {}, not a {wanted}", entry.kind),
            )),
            None => Err(Error::not_found(
                locator(),
                format!("no such path in {}", commit_id.short()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::{
        FakeStore, GITHUB_TREE, INITIAL, LICENSE_BLOB, OLDEST, SECOND, oid,
    };
    use test_case::test_case;

    fn resolver() -> Resolver<FakeStore> {
        Resolver::new(FakeStore::new())
    }

    #[test]
    fn test_resolve_hash_full_and_abbreviated() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_hash(INITIAL).unwrap(), oid(INITIAL));
        assert_eq!(resolver.resolve_hash("af23339").unwrap(), oid(INITIAL));
        assert_eq!(resolver.resolve_hash("AF23339").unwrap(), oid(INITIAL));
    }

    #[test_case("fffffff" ; "unknown")]
    #[test_case("Initial commit" ; "commit message")]
    #[test_case("LICENSE" ; "file name")]
    #[test_case(".github" ; "folder name")]
    #[test_case("" ; "empty")]
    fn test_resolve_hash_not_found(id: &str) {
        let err = resolver().resolve_hash(id).unwrap_err();
        assert!(err.is_not_found(), "{err}");
    }

    #[test]
    fn test_resolve_commit_newest_first() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_commit("Initial commit").unwrap(), oid(INITIAL));
        assert_eq!(resolver.resolve_commit("another folder").unwrap(), oid(SECOND));
        // Both messages contain "o"; the newest wins.
        assert_eq!(resolver.resolve_commit("o").unwrap(), oid(SECOND));
    }

    #[test_case("( ͡° ͜ʖ ͡°)" ; "no match")]
    #[test_case("" ; "empty")]
    fn test_resolve_commit_not_found(message: &str) {
        let err = resolver().resolve_commit(message).unwrap_err();
        assert!(err.is_not_found(), "{err}");
    }

    #[test_case("af23339" ; "by hash")]
    #[test_case("Initial commit" ; "by message")]
    fn test_resolve_file(commit: &str) {
        let id = resolver()
            .resolve_file("LICENSE", &CommitLocator::infer(commit))
            .unwrap();
        assert_eq!(id, oid(LICENSE_BLOB));
    }

    #[test_case("b0279ab" ; "by hash")]
    #[test_case("another folder" ; "by message")]
    fn test_resolve_folder(commit: &str) {
        let id = resolver()
            .resolve_folder(".github", &CommitLocator::infer(commit))
            .unwrap();
        assert_eq!(id, oid(GITHUB_TREE));
    }

    #[test]
    fn test_type_mismatch_is_not_found() {
        let resolver = resolver();
        let commit = CommitLocator::infer("b0279ab");

        let err = resolver.resolve_file(".github", &commit).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("is a folder, not a file"), "{err}");

        let err = resolver.resolve_folder("LICENSE", &commit).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("is a file, not a folder"), "{err}");
    }

    #[test]
    fn test_missing_path_and_commit() {
        let resolver = resolver();

        let err = resolver
            .resolve_file("( ͡° ͜ʖ ͡°)", &CommitLocator::infer("af23339"))
            .unwrap_err();
        assert!(err.is_not_found());

        // Folder only exists in the second commit.
        let err = resolver
            .resolve_folder(".github", &CommitLocator::infer("Initial commit"))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = resolver
            .resolve_file("LICENSE", &CommitLocator::infer("fffffff"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_hex_looking_message_falls_back_to_search() {
        let resolver = resolver();
        let commit = CommitLocator::infer("decade");
        assert_eq!(resolver.resolve_commit_locator(&commit).unwrap(), oid(OLDEST));
        assert_eq!(
            resolver.resolve_file("LICENSE", &commit).unwrap(),
            oid(LICENSE_BLOB)
        );

        // An explicit hash never falls back.
        let err = resolver
            .resolve_commit_locator(&CommitLocator::Hash("decade".to_string()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_hash_of_non_commit_as_commit() {
        let err = resolver()
            .resolve_file("LICENSE", &CommitLocator::Hash("cf1ab25".to_string()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_dispatch() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&Locator::Hash("af23339".into())).unwrap(),
            oid(INITIAL)
        );
        assert_eq!(
            resolver
                .resolve(&Locator::CommitMessage("another folder".into()))
                .unwrap(),
            oid(SECOND)
        );
        assert_eq!(
            resolver
                .resolve(&Locator::file("LICENSE", "Initial commit"))
                .unwrap(),
            oid(LICENSE_BLOB)
        );
        assert_eq!(
            resolver.resolve(&Locator::folder(".github", "b0279ab")).unwrap(),
            oid(GITHUB_TREE)
        );
    }
}
