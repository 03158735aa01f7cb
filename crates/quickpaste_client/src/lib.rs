//! Client side of the QuickPaste create-paste workflow.
//!
//! [`PasteSession`] is one page instance: it mounts the language catalog, owns
//! the form, drives submissions through a background worker, and exposes a
//! [`ShellView`] for whatever shell renders it.

/// HTTP access to the paste backend.
pub mod api;
/// Background worker and its command/event protocol.
pub mod backend;
/// Language catalog loading state.
pub mod catalog;
/// Transport-level errors.
pub mod error;
/// Page session gluing catalog, form, and submission together.
pub mod session;
/// Submission state machine.
pub mod submission;
/// Presentation-neutral view model.
pub mod view;

pub use api::{HttpPasteApi, PasteApi};
pub use backend::{spawn_backend, BackendHandle, ClientCmd, ClientEvent};
pub use catalog::{CatalogState, LanguageCatalog};
pub use error::ApiError;
pub use session::PasteSession;
pub use submission::{SubmissionController, SubmissionOutcome, SubmissionState};
pub use view::{Banner, FormView, ShellView};

#[cfg(test)]
pub(crate) mod test_support;
