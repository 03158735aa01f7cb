//! What a shell should render for the current page state.

use crate::catalog::CatalogState;
use crate::submission::SubmissionState;
use quickpaste_core::expiry::{ExpiryMenu, ExpiryOption};
use quickpaste_core::{
    FormField, LanguageEntry, PasteFormModel, BODY_REQUIRED_MESSAGE, SUBMIT_ERROR_MESSAGE,
};

/// Inline error banners shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    BodyRequired,
    SubmitError,
}

impl Banner {
    pub fn message(self) -> &'static str {
        match self {
            Self::BodyRequired => BODY_REQUIRED_MESSAGE,
            Self::SubmitError => SUBMIT_ERROR_MESSAGE,
        }
    }
}

/// Interactive form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<'a> {
    pub banners: Vec<Banner>,
    pub languages: &'a [LanguageEntry],
    pub selected_language: &'a str,
    pub expiry_options: &'a [ExpiryOption],
    pub selected_expiry: &'a str,
    /// `false` while a submission is in flight.
    pub submit_enabled: bool,
    pub title_over_limit: bool,
}

/// Exactly one of these is rendered per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView<'a> {
    /// Catalog fetch pending: progress indicator only, no form.
    Loading,
    /// Catalog unavailable: full failure page, no form.
    ErrorPage,
    Form(FormView<'a>),
    /// Paste created; the shell should navigate to this path.
    Redirecting(String),
}

fn banners_for(submission: &SubmissionState) -> Vec<Banner> {
    match submission {
        SubmissionState::ValidationFailed => vec![Banner::BodyRequired],
        SubmissionState::SubmitFailed => vec![Banner::SubmitError],
        _ => Vec::new(),
    }
}

/// Derive the view for one render.
pub fn render_view<'a>(
    catalog: &'a CatalogState,
    form: &'a PasteFormModel,
    expiry_menu: Option<&'a ExpiryMenu>,
    submission: &SubmissionState,
) -> ShellView<'a> {
    let entries = match catalog {
        CatalogState::Loading => return ShellView::Loading,
        CatalogState::Error(_) => return ShellView::ErrorPage,
        CatalogState::Ready(entries) => entries,
    };
    if let SubmissionState::Success { paste_id } = submission {
        return ShellView::Redirecting(quickpaste_core::models::paste_path(paste_id));
    }
    ShellView::Form(FormView {
        banners: banners_for(submission),
        languages: entries,
        selected_language: form.field(FormField::Language),
        expiry_options: expiry_menu.map(ExpiryMenu::options).unwrap_or(&[]),
        selected_expiry: form.field(FormField::Expiry),
        submit_enabled: !matches!(
            submission,
            SubmissionState::Submitting | SubmissionState::Validating
        ),
        title_over_limit: form.title_exceeds_limit(),
    })
}
