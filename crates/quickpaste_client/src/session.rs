//! One create-paste page instance.
//!
//! The session owns the catalog, the form, the expiry menu, and the submission
//! controller. Network work goes through the [`BackendHandle`]; callers drive
//! the session by polling events between user interactions.

use crate::backend::{BackendHandle, ClientCmd, ClientEvent};
use crate::catalog::{CatalogState, LanguageCatalog};
use crate::submission::{SubmissionController, SubmissionState};
use crate::view::{render_view, ShellView};
use crossbeam_channel::{RecvTimeoutError, TryRecvError};
use quickpaste_core::{AppError, ExpiryMenu, ExpiryPreset, FormField, PasteFormModel};
use std::time::Duration;
use tracing::{debug, warn};

pub struct PasteSession {
    backend: BackendHandle,
    catalog: LanguageCatalog,
    form: PasteFormModel,
    expiry_menu: Option<ExpiryMenu>,
    controller: SubmissionController,
    backend_closed: bool,
}

impl PasteSession {
    /// Mount the page and start the single catalog fetch.
    ///
    /// # Errors
    /// Returns [`AppError::BackendUnavailable`] when the worker is gone.
    pub fn mount(backend: BackendHandle) -> Result<Self, AppError> {
        backend
            .cmd_tx
            .send(ClientCmd::LoadCatalog)
            .map_err(|_| AppError::BackendUnavailable)?;
        debug!("paste session mounted; catalog loading");
        Ok(Self {
            backend,
            catalog: LanguageCatalog::new(),
            form: PasteFormModel::new(),
            expiry_menu: None,
            controller: SubmissionController::new(),
            backend_closed: false,
        })
    }

    pub fn catalog(&self) -> &CatalogState {
        self.catalog.state()
    }

    pub fn form(&self) -> &PasteFormModel {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionState {
        self.controller.state()
    }

    /// The expiry menu as last rendered, once the form is shown.
    pub fn expiry_menu(&self) -> Option<&ExpiryMenu> {
        self.expiry_menu.as_ref()
    }

    pub fn redirect_target(&self) -> Option<String> {
        self.controller.redirect_target()
    }

    pub fn view(&self) -> ShellView<'_> {
        render_view(
            self.catalog.state(),
            &self.form,
            self.expiry_menu.as_ref(),
            self.controller.state(),
        )
    }

    fn require_ready(&self) -> Result<(), AppError> {
        match self.catalog.state() {
            CatalogState::Ready(_) => Ok(()),
            CatalogState::Loading => Err(AppError::CatalogNotReady),
            CatalogState::Error(message) => Err(AppError::CatalogUnavailable(message.clone())),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), AppError> {
        self.require_ready()?;
        self.form.set_field(FormField::Title, title);
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> Result<(), AppError> {
        self.require_ready()?;
        self.form.set_field(FormField::Body, body);
        self.controller.revalidate(&self.form);
        Ok(())
    }

    /// Select a language from the ready catalog.
    ///
    /// # Errors
    /// Returns [`AppError::UnknownLanguage`] when `language_code` is not in the
    /// current catalog.
    pub fn select_language(&mut self, language_code: &str) -> Result<(), AppError> {
        self.require_ready()?;
        if !self.catalog.contains(language_code) {
            return Err(AppError::UnknownLanguage(language_code.to_string()));
        }
        self.form.set_field(FormField::Language, language_code);
        Ok(())
    }

    /// Select an expiry preset using the value rendered in the current menu.
    pub fn select_expiry(&mut self, preset: ExpiryPreset) -> Result<(), AppError> {
        self.require_ready()?;
        let menu = self.expiry_menu.get_or_insert_with(ExpiryMenu::render);
        self.form.set_expiry(menu.selection_for(preset));
        Ok(())
    }

    /// Submit the form.
    ///
    /// Validation failures and in-flight rejections are returned immediately;
    /// the create call's result arrives later through [`PasteSession::poll`].
    pub fn submit(&mut self) -> Result<(), AppError> {
        self.require_ready()?;
        let request = self.controller.begin(&self.form)?;
        if self.backend_closed
            || self
                .backend
                .cmd_tx
                .send(ClientCmd::CreatePaste { request })
                .is_err()
        {
            self.backend_closed = true;
            self.finish_submission(Err(AppError::BackendUnavailable));
            return Err(AppError::BackendUnavailable);
        }
        Ok(())
    }

    /// Apply every event that has already arrived.
    ///
    /// # Returns
    /// The number of events applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.backend.evt_rx.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.handle_disconnect();
                    break;
                }
            }
        }
        applied
    }

    /// Block for at most `timeout` waiting for one event.
    ///
    /// # Returns
    /// `true` when an event was applied or the worker disconnected.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.backend.evt_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.handle_disconnect();
                true
            }
        }
    }

    /// Whether the session is waiting on the worker.
    pub fn is_pending(&self) -> bool {
        matches!(self.catalog.state(), CatalogState::Loading) || self.controller.is_submitting()
    }

    fn apply(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::CatalogLoaded { entries } => {
                self.catalog.resolve(Ok(entries));
                self.expiry_menu = Some(ExpiryMenu::render());
            }
            ClientEvent::CatalogFailed { message } => {
                self.catalog.resolve(Err(message));
                self.expiry_menu = None;
            }
            ClientEvent::PasteCreated { paste_id } => self.finish_submission(Ok(paste_id)),
            ClientEvent::SubmitFailed { message } => {
                self.finish_submission(Err(AppError::Submission(message)))
            }
        }
    }

    fn finish_submission(&mut self, result: Result<String, AppError>) {
        self.controller.finish(result, &mut self.form);
        if self.controller.state() == &SubmissionState::SubmitFailed {
            // The reset form is shown again with a freshly rendered menu.
            self.expiry_menu = Some(ExpiryMenu::render());
        }
    }

    fn handle_disconnect(&mut self) {
        if self.backend_closed {
            return;
        }
        warn!("backend worker disconnected");
        self.backend_closed = true;
        if matches!(self.catalog.state(), CatalogState::Loading) {
            self.catalog
                .resolve(Err(AppError::BackendUnavailable.to_string()));
        }
        if self.controller.is_submitting() {
            self.finish_submission(Err(AppError::BackendUnavailable));
        }
    }
}
