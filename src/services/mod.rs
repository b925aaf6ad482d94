//! Business logic services.
//!
//! [`Resolver`] turns locators into object ids; [`NotesService`] appends
//! notes to whatever they resolve to.

mod notes;
mod resolver;

#[cfg(test)]
mod fake;

pub use notes::{
    BoundNotes, HashNotes, ManualNotes, NotesHandle, NotesInit, NotesService, TextNotes,
};
pub use resolver::Resolver;
