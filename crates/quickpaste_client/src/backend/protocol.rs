//! Protocol types for the session backend worker.

use quickpaste_core::{LanguageEntry, PasteCreateRequest};

/// Commands issued by the session for the worker to execute.
#[derive(Debug)]
pub enum ClientCmd {
    /// Fetch the language catalog.
    LoadCatalog,
    /// Send a create-paste request.
    CreatePaste { request: PasteCreateRequest },
}

/// Events produced by the worker and polled by the session.
#[derive(Debug)]
pub enum ClientEvent {
    CatalogLoaded { entries: Vec<LanguageEntry> },
    /// The catalog fetch failed or its body did not parse.
    CatalogFailed { message: String },
    PasteCreated { paste_id: String },
    /// Non-success status or transport failure from the create call.
    SubmitFailed { message: String },
}
