//! Shared fixture repository for integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use git2::{Oid, Repository, Signature, Time};
use gitnotes::{GitRepository, NotesRef, NotesService};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const REF: &str = "test/append";

pub const SOME_NOTES: &str = "headline of the notes
# 😋 Lorem Ipsum
* Lorem ipsum dolor sit amet, consectetuer adipiscing elit.
* Aliquam tincidunt mauris eu risus.
* Vestibulum auctor dapibus neque.
";

/// Two-commit repository:
///
/// 1. "Initial commit" adds `LICENSE`
/// 2. "add another folder" adds `.github/workflows/ci.yml`
pub struct Fixture {
    pub dir: TempDir,
    pub initial: Oid,
    pub second: Oid,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let initial = commit_files(
            &repo,
            &[("LICENSE", "MIT License\n")],
            "Initial commit",
            1_700_000_000,
        );
        let second = commit_files(
            &repo,
            &[(".github/workflows/ci.yml", "on: push\n")],
            "add another folder",
            1_700_000_100,
        );

        Self {
            dir,
            initial,
            second,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo(&self) -> Repository {
        Repository::open(self.path()).unwrap()
    }

    pub fn store(&self) -> GitRepository {
        GitRepository::new(self.path())
    }

    pub fn service(&self) -> NotesService<GitRepository> {
        NotesService::new(self.store(), NotesRef::default())
    }

    pub fn initial_short(&self) -> String {
        self.initial.to_string()[..7].to_string()
    }

    pub fn second_short(&self) -> String {
        self.second.to_string()[..7].to_string()
    }

    /// Id of the `LICENSE` blob.
    pub fn license_blob(&self) -> Oid {
        let repo = self.repo();
        let tree = repo.find_commit(self.initial).unwrap().tree().unwrap();
        tree.get_path(Path::new("LICENSE")).unwrap().id()
    }

    /// Id of the `.github` tree.
    pub fn github_tree(&self) -> Oid {
        let repo = self.repo();
        let tree = repo.find_commit(self.second).unwrap().tree().unwrap();
        tree.get_path(Path::new(".github")).unwrap().id()
    }

    /// Reads a note straight from git.
    pub fn note(&self, target: Oid, notes_ref: &str) -> Option<String> {
        let repo = self.repo();
        let notes_ref = NotesRef::new(notes_ref);
        repo.find_note(Some(notes_ref.as_str()), target)
            .ok()
            .and_then(|note| note.message().map(String::from))
    }

    /// Commits `files` on top of `HEAD`, one minute after the second commit.
    pub fn add_commit(&self, files: &[(&str, &str)], message: &str) -> Oid {
        commit_files(&self.repo(), files, message, 1_700_000_160)
    }

    /// Returns true if the notes ref has been created.
    pub fn ref_exists(&self, notes_ref: &str) -> bool {
        self.repo()
            .find_reference(NotesRef::new(notes_ref).as_str())
            .is_ok()
    }
}

fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str, seconds: i64) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();
    for (path, contents) in files {
        let full = workdir.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(&full, contents).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::new("test", "test@test.com", &Time::new(seconds, 0)).unwrap();
    let parent = repo
        .head()
        .ok()
        .and_then(|head| head.target())
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
