//! Data models for gitnotes.
//!
//! Object identifiers, notes refs and the locators that name targets.

mod locator;
mod notes_ref;
mod object;

pub use locator::{CommitLocator, Locator};
pub use notes_ref::NotesRef;
pub use object::{EntryKind, ObjectId, TreeEntry};
