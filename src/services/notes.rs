//! Notes service.
//!
//! Every way of appending a note ends in the same two steps: resolve the
//! locator to an object id, then append to the note on that id under a
//! notes ref. The handles below only differ in which of the inputs (target,
//! content) they capture up front.

use super::Resolver;
use crate::config::GitNotesConfig;
use crate::git::{GitRepository, ObjectStore};
use crate::Result;
use crate::models::{CommitLocator, Locator, NotesRef, ObjectId};
use tracing::{info, instrument};

/// Selects how a [`NotesHandle`] is built.
///
/// A `notes_ref` of `None` means the service's default ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesInit {
    /// Target bound now by id, content given at append time.
    Hash {
        /// Full or abbreviated object id.
        id: String,
        /// Notes ref override.
        notes_ref: Option<NotesRef>,
    },
    /// Content bound now, target given at append time.
    Text {
        /// Note content to append.
        content: String,
        /// Notes ref override.
        notes_ref: Option<NotesRef>,
    },
    /// Nothing bound; target then content.
    Manual {
        /// Notes ref override.
        notes_ref: Option<NotesRef>,
    },
}

/// A handle built from a [`NotesInit`].
pub enum NotesHandle<'a, S: ObjectStore> {
    /// From [`NotesInit::Hash`].
    Hash(HashNotes<'a, S>),
    /// From [`NotesInit::Text`].
    Text(TextNotes<'a, S>),
    /// From [`NotesInit::Manual`].
    Manual(ManualNotes<'a, S>),
}

impl<'a, S: ObjectStore> NotesHandle<'a, S> {
    /// Returns the hash handle, if that is what was built.
    #[must_use]
    pub fn into_hash(self) -> Option<HashNotes<'a, S>> {
        match self {
            Self::Hash(notes) => Some(notes),
            _ => None,
        }
    }

    /// Returns the text handle, if that is what was built.
    #[must_use]
    pub fn into_text(self) -> Option<TextNotes<'a, S>> {
        match self {
            Self::Text(notes) => Some(notes),
            _ => None,
        }
    }

    /// Returns the manual handle, if that is what was built.
    #[must_use]
    pub fn into_manual(self) -> Option<ManualNotes<'a, S>> {
        match self {
            Self::Manual(notes) => Some(notes),
            _ => None,
        }
    }

    /// Returns the notes ref the handle writes to.
    #[must_use]
    pub const fn notes_ref(&self) -> &NotesRef {
        match self {
            Self::Hash(notes) => &notes.notes_ref,
            Self::Text(notes) => &notes.notes_ref,
            Self::Manual(notes) => &notes.notes_ref,
        }
    }
}

/// Appends notes to objects named by [`Locator`]s.
pub struct NotesService<S> {
    resolver: Resolver<S>,
    default_ref: NotesRef,
}

impl NotesService<GitRepository> {
    /// Creates a service for the configured repository and default ref.
    #[must_use]
    pub fn from_config(config: &GitNotesConfig) -> Self {
        Self::new(
            GitRepository::new(&config.repo_path),
            config.notes_ref.clone(),
        )
    }
}

impl<S: ObjectStore> NotesService<S> {
    /// Creates a service over `store`, writing to `default_ref` unless a
    /// handle overrides it.
    #[must_use]
    pub const fn new(store: S, default_ref: NotesRef) -> Self {
        Self {
            resolver: Resolver::new(store),
            default_ref,
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Returns the default notes ref.
    #[must_use]
    pub const fn default_ref(&self) -> &NotesRef {
        &self.default_ref
    }

    fn ref_or_default(&self, notes_ref: Option<NotesRef>) -> NotesRef {
        notes_ref.unwrap_or_else(|| self.default_ref.clone())
    }

    /// Builds the handle selected by `init`.
    #[must_use]
    pub fn open(&self, init: NotesInit) -> NotesHandle<'_, S> {
        match init {
            NotesInit::Hash { id, notes_ref } => NotesHandle::Hash(self.hash(id, notes_ref)),
            NotesInit::Text { content, notes_ref } => {
                NotesHandle::Text(self.text(content, notes_ref))
            },
            NotesInit::Manual { notes_ref } => NotesHandle::Manual(self.manual(notes_ref)),
        }
    }

    /// Binds a target id; the content comes with [`HashNotes::append`].
    #[must_use]
    pub fn hash(&self, id: impl Into<String>, notes_ref: Option<NotesRef>) -> HashNotes<'_, S> {
        HashNotes {
            service: self,
            id: id.into(),
            notes_ref: self.ref_or_default(notes_ref),
        }
    }

    /// Binds the content; the target comes with one of the `append_at*`
    /// methods.
    #[must_use]
    pub fn text(
        &self,
        content: impl Into<String>,
        notes_ref: Option<NotesRef>,
    ) -> TextNotes<'_, S> {
        TextNotes {
            service: self,
            content: content.into(),
            notes_ref: self.ref_or_default(notes_ref),
        }
    }

    /// Binds nothing; locate a target with one of the `at*` methods first.
    #[must_use]
    pub fn manual(&self, notes_ref: Option<NotesRef>) -> ManualNotes<'_, S> {
        ManualNotes {
            service: self,
            notes_ref: self.ref_or_default(notes_ref),
        }
    }

    /// Resolves `locator` to an object id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the locator does not resolve.
    pub fn resolve(&self, locator: &Locator) -> Result<ObjectId> {
        self.resolver.resolve(locator)
    }

    /// Appends `content` to the note on an already resolved `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppendFailed` if git rejects the write.
    #[instrument(
        skip(self, id, notes_ref, content),
        fields(operation = "notes.append", target_id = %id, notes_ref = %notes_ref)
    )]
    pub fn append_to(&self, id: &ObjectId, notes_ref: &NotesRef, content: &str) -> Result<()> {
        self.resolver.store().append_note(id, notes_ref, content)?;
        info!(bytes = content.len(), "appended note");
        Ok(())
    }

    /// Reads the note on the object `locator` resolves to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the locator does not resolve.
    pub fn read(&self, locator: &Locator, notes_ref: Option<NotesRef>) -> Result<Option<String>> {
        let id = self.resolve(locator)?;
        self.resolver
            .store()
            .read_note(&id, &self.ref_or_default(notes_ref))
    }

    /// Removes the note on the object `locator` resolves to. Returns false
    /// if there was no note.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the locator does not resolve.
    #[instrument(skip(self), fields(operation = "notes.remove"))]
    pub fn remove(&self, locator: &Locator, notes_ref: Option<NotesRef>) -> Result<bool> {
        let id = self.resolve(locator)?;
        let removed = self
            .resolver
            .store()
            .remove_note(&id, &self.ref_or_default(notes_ref))?;
        info!(target_id = %id, removed, "removed note");
        Ok(removed)
    }
}

/// Handle with the target id bound at construction.
pub struct HashNotes<'a, S: ObjectStore> {
    service: &'a NotesService<S>,
    id: String,
    notes_ref: NotesRef,
}

impl<S: ObjectStore> HashNotes<'_, S> {
    /// Returns the id as given.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the notes ref.
    #[must_use]
    pub const fn notes_ref(&self) -> &NotesRef {
        &self.notes_ref
    }

    /// Resolves the bound id and appends `content`.
    ///
    /// The id is only looked up here, so a commit message or path passed as
    /// the id fails now with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id does not resolve, `AppendFailed` if the
    /// write is rejected.
    pub fn append(&self, content: &str) -> Result<ObjectId> {
        let id = self.service.resolver.resolve_hash(&self.id)?;
        self.service.append_to(&id, &self.notes_ref, content)?;
        Ok(id)
    }
}

/// Handle with the note content bound at construction.
pub struct TextNotes<'a, S: ObjectStore> {
    service: &'a NotesService<S>,
    content: String,
    notes_ref: NotesRef,
}

impl<S: ObjectStore> TextNotes<'_, S> {
    /// Returns the bound content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the notes ref.
    #[must_use]
    pub const fn notes_ref(&self) -> &NotesRef {
        &self.notes_ref
    }

    /// Resolves `locator` and appends the bound content to it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the locator does not resolve, `AppendFailed` if
    /// the write is rejected.
    pub fn append_to(&self, locator: &Locator) -> Result<ObjectId> {
        let id = self.service.resolve(locator)?;
        self.service.append_to(&id, &self.notes_ref, &self.content)?;
        Ok(id)
    }

    /// Appends to the object with the given id.
    ///
    /// # Errors
    ///
    /// See [`TextNotes::append_to`].
    pub fn append_at(&self, id: impl Into<String>) -> Result<ObjectId> {
        self.append_to(&Locator::Hash(id.into()))
    }

    /// Appends to the newest commit whose message contains `message`.
    ///
    /// # Errors
    ///
    /// See [`TextNotes::append_to`].
    pub fn append_at_commit(&self, message: impl Into<String>) -> Result<ObjectId> {
        self.append_to(&Locator::CommitMessage(message.into()))
    }

    /// Appends to the file at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// See [`TextNotes::append_to`].
    pub fn append_at_file(
        &self,
        path: impl Into<String>,
        commit: impl Into<CommitLocator>,
    ) -> Result<ObjectId> {
        self.append_to(&Locator::file(path, commit))
    }

    /// Appends to the folder at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// See [`TextNotes::append_to`].
    pub fn append_at_folder(
        &self,
        path: impl Into<String>,
        commit: impl Into<CommitLocator>,
    ) -> Result<ObjectId> {
        self.append_to(&Locator::folder(path, commit))
    }
}

/// Handle with nothing bound but the notes ref.
pub struct ManualNotes<'a, S: ObjectStore> {
    service: &'a NotesService<S>,
    notes_ref: NotesRef,
}

impl<'a, S: ObjectStore> ManualNotes<'a, S> {
    /// Returns the notes ref.
    #[must_use]
    pub const fn notes_ref(&self) -> &NotesRef {
        &self.notes_ref
    }

    /// Resolves `locator` into a handle ready for [`BoundNotes::append`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the locator does not resolve.
    pub fn locate(&self, locator: &Locator) -> Result<BoundNotes<'a, S>> {
        let id = self.service.resolve(locator)?;
        Ok(BoundNotes {
            service: self.service,
            id,
            notes_ref: self.notes_ref.clone(),
        })
    }

    /// Targets the object with the given id.
    ///
    /// # Errors
    ///
    /// See [`ManualNotes::locate`].
    pub fn at(&self, id: impl Into<String>) -> Result<BoundNotes<'a, S>> {
        self.locate(&Locator::Hash(id.into()))
    }

    /// Targets the newest commit whose message contains `message`.
    ///
    /// # Errors
    ///
    /// See [`ManualNotes::locate`].
    pub fn at_commit(&self, message: impl Into<String>) -> Result<BoundNotes<'a, S>> {
        self.locate(&Locator::CommitMessage(message.into()))
    }

    /// Targets the file at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// See [`ManualNotes::locate`].
    pub fn at_file(
        &self,
        path: impl Into<String>,
        commit: impl Into<CommitLocator>,
    ) -> Result<BoundNotes<'a, S>> {
        self.locate(&Locator::file(path, commit))
    }

    /// Targets the folder at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// See [`ManualNotes::locate`].
    pub fn at_folder(
        &self,
        path: impl Into<String>,
        commit: impl Into<CommitLocator>,
    ) -> Result<BoundNotes<'a, S>> {
        self.locate(&Locator::folder(path, commit))
    }
}

/// Handle bound to a resolved object.
pub struct BoundNotes<'a, S: ObjectStore> {
    service: &'a NotesService<S>,
    id: ObjectId,
    notes_ref: NotesRef,
}

impl<S: ObjectStore> std::fmt::Debug for BoundNotes<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundNotes")
            .field("id", &self.id)
            .field("notes_ref", &self.notes_ref)
            .finish_non_exhaustive()
    }
}

impl<S: ObjectStore> BoundNotes<'_, S> {
    /// Returns the resolved id.
    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Returns the notes ref.
    #[must_use]
    pub const fn notes_ref(&self) -> &NotesRef {
        &self.notes_ref
    }

    /// Appends `content` to the note on the resolved object.
    ///
    /// # Errors
    ///
    /// Returns `AppendFailed` if the write is rejected.
    pub fn append(&self, content: &str) -> Result<()> {
        self.service.append_to(&self.id, &self.notes_ref, content)
    }

    /// Reads the current note on the resolved object.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn read(&self) -> Result<Option<String>> {
        self.service
            .resolver
            .store()
            .read_note(&self.id, &self.notes_ref)
    }
}
