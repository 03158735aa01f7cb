//! Background worker thread that runs API calls on its own runtime.

use crate::api::PasteApi;
use crate::backend::{ClientCmd, ClientEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use quickpaste_core::config::env_flag_enabled;
use quickpaste_core::AppError;
use std::thread;
use std::time::Instant;
use tracing::{error, info, warn};

/// Handle for sending commands to, and receiving events from, the worker.
///
/// Dropping the handle closes the command channel; the worker finishes the
/// command it is running (requests are never aborted) and then exits.
pub struct BackendHandle {
    pub cmd_tx: Sender<ClientCmd>,
    pub evt_rx: Receiver<ClientEvent>,
}

fn log_request_timing(enabled: bool, op: &str, started: Instant, ok: bool) {
    if !enabled {
        return;
    }
    info!(
        target: "quickpaste_client::backend_timing",
        op = op,
        ok = ok,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "backend request timing"
    );
}

fn run_command<A: PasteApi>(
    rt: &tokio::runtime::Runtime,
    api: &A,
    cmd: ClientCmd,
    timing: bool,
) -> ClientEvent {
    let started = Instant::now();
    match cmd {
        ClientCmd::LoadCatalog => {
            let result = rt.block_on(api.fetch_languages());
            log_request_timing(timing, "langs", started, result.is_ok());
            match result {
                Ok(entries) => ClientEvent::CatalogLoaded { entries },
                Err(err) => {
                    warn!("catalog fetch failed: {}", err);
                    ClientEvent::CatalogFailed {
                        message: err.to_string(),
                    }
                }
            }
        }
        ClientCmd::CreatePaste { request } => {
            let result = rt.block_on(api.create_paste(&request));
            log_request_timing(timing, "p-create", started, result.is_ok());
            match result {
                Ok(paste_id) => ClientEvent::PasteCreated { paste_id },
                Err(err) => {
                    warn!("paste creation failed: {}", err);
                    ClientEvent::SubmitFailed {
                        message: err.to_string(),
                    }
                }
            }
        }
    }
}

/// Spawn the worker thread that performs all network access for a session.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Errors
/// Returns [`AppError::BackendUnavailable`] if the runtime or thread cannot be
/// created.
pub fn spawn_backend<A>(api: A) -> Result<BackendHandle, AppError>
where
    A: PasteApi + Send + 'static,
{
    let (cmd_tx, cmd_rx) = unbounded::<ClientCmd>();
    let (evt_tx, evt_rx) = unbounded::<ClientEvent>();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| {
            error!("failed to start backend runtime: {}", err);
            AppError::BackendUnavailable
        })?;

    thread::Builder::new()
        .name("quickpaste-backend".to_string())
        .spawn(move || {
            let timing = env_flag_enabled("QUICKPASTE_LOG_TIMING");
            for cmd in cmd_rx.iter() {
                let event = run_command(&rt, &api, cmd, timing);
                if evt_tx.send(event).is_err() {
                    break;
                }
            }
        })
        .map_err(|err| {
            error!("failed to spawn backend worker: {}", err);
            AppError::BackendUnavailable
        })?;

    Ok(BackendHandle { cmd_tx, evt_rx })
}
