//! Wire models exchanged with the paste backend.

/// Language catalog entries.
pub mod language;
/// Paste creation payloads and navigation targets.
pub mod paste;

pub use language::LanguageEntry;
pub use paste::{paste_path, PasteCreateRequest};
