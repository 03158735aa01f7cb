//! Core domain library for QuickPaste (config, wire models, form state, expiry presets).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Process-global environment helpers.
pub mod env;
/// Application error taxonomy.
pub mod error;
/// Expiry presets and the rendered expiry menu.
pub mod expiry;
/// Editable paste form state and validation.
pub mod form;
/// Wire models for the paste backend.
pub mod models;
/// Text normalization helpers.
pub mod text;

pub use config::Config;
pub use constants::*;
pub use error::AppError;
pub use expiry::{ExpiryMenu, ExpiryPreset, ExpirySelection};
pub use form::{FormField, FormSnapshot, PasteFormModel};
pub use models::{LanguageEntry, PasteCreateRequest};
