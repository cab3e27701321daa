//! Background worker thread for remote and local-storage I/O.

use super::protocol::{SaveReply, SyncCmd, SyncErrorSource, SyncEvent};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use promptbar_core::{
    config::env_flag_enabled,
    sync::{load_fallback_pool, persist_snapshot, SaveReport},
    AppError, LocalStorage, Prompt, RemoteStore,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Handle for sending commands to, and receiving events from, the sync worker.
///
/// Dropping the handle closes the command channel; the worker finishes the
/// commands already queued and exits.
pub struct SyncHandle {
    pub cmd_tx: Sender<SyncCmd>,
    pub evt_rx: Receiver<SyncEvent>,
    next_ticket: AtomicU64,
}

/// Completion signal for one save.
///
/// Dropping the ticket does not cancel the save.
#[derive(Debug)]
pub struct SaveTicket {
    id: u64,
    done_rx: Receiver<Result<SaveReport, AppError>>,
}

impl SaveTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the worker finishes this save.
    ///
    /// # Errors
    /// Returns the save's failure, or [`AppError::Internal`] when the worker
    /// exited without answering.
    pub fn wait(self) -> Result<SaveReport, AppError> {
        self.done_rx.recv().unwrap_or(Err(AppError::Internal))
    }

    /// Wait up to `timeout` for the save to finish.
    ///
    /// # Returns
    /// `None` when the save is still running after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<SaveReport, AppError>> {
        match self.done_rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => None,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Some(Err(AppError::Internal)),
        }
    }
}

impl SyncHandle {
    /// Ask the worker for the fallback pool; the answer arrives as
    /// [`SyncEvent::FallbackPoolLoaded`] or [`SyncEvent::Error`].
    pub fn request_fallback_pool(&self, limit: usize) {
        if self
            .cmd_tx
            .send(SyncCmd::FetchFallbackPool { limit })
            .is_err()
        {
            error!("sync worker is gone; fallback pool request dropped");
        }
    }

    /// Queue a snapshot save and return its completion ticket.
    pub fn save_prompts(&self, prompts: Vec<Prompt>) -> SaveTicket {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, done_rx) = bounded(1);
        let cmd = SyncCmd::SavePrompts {
            ticket,
            prompts,
            reply: reply_tx,
        };
        if let Err(crossbeam_channel::SendError(SyncCmd::SavePrompts { reply, .. })) =
            self.cmd_tx.send(cmd)
        {
            error!("sync worker is gone; save {} dropped", ticket);
            let _ = reply.send(Err(AppError::Internal));
        }
        SaveTicket {
            id: ticket,
            done_rx,
        }
    }
}

/// Worker-owned dependencies.
struct WorkerState {
    remote: Box<dyn RemoteStore>,
    storage: Option<LocalStorage>,
    record_id: String,
    evt_tx: Sender<SyncEvent>,
    perf_log_enabled: bool,
}

fn send_error(evt_tx: &Sender<SyncEvent>, source: SyncErrorSource, message: String) {
    let _ = evt_tx.send(SyncEvent::Error { source, message });
}

fn log_perf(enabled: bool, op: &str, started: Instant, items: usize) {
    if !enabled {
        return;
    }
    info!(
        target: "promptbar_panel::sync_perf",
        op = op,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        items = items,
        "sync worker perf"
    );
}

fn handle_fetch_fallback_pool(state: &WorkerState, limit: usize) {
    let started = Instant::now();
    match load_fallback_pool(state.remote.as_ref(), limit) {
        Ok(prompts) => {
            log_perf(state.perf_log_enabled, "fetch", started, prompts.len());
            let _ = state.evt_tx.send(SyncEvent::FallbackPoolLoaded { prompts });
        }
        Err(err) => {
            error!("fallback pool fetch failed: {}", err);
            send_error(
                &state.evt_tx,
                SyncErrorSource::FetchFallbackPool,
                format!("Fetch prompts failed: {}", err),
            );
        }
    }
}

fn handle_save_prompts(
    state: &WorkerState,
    ticket: u64,
    prompts: Vec<Prompt>,
    reply: SaveReply,
) {
    let started = Instant::now();
    let result = persist_snapshot(
        &prompts,
        state.remote.as_ref(),
        state.storage.as_ref(),
        &state.record_id,
    );
    match &result {
        Ok(report) => {
            log_perf(state.perf_log_enabled, "save", started, report.saved);
            let _ = state.evt_tx.send(SyncEvent::PromptsSaved {
                ticket,
                report: report.clone(),
            });
        }
        Err(err) => {
            error!("save {} failed: {}", ticket, err);
            send_error(
                &state.evt_tx,
                SyncErrorSource::SavePrompts { ticket },
                format!("Save prompts failed: {}", err),
            );
        }
    }
    let _ = reply.send(result);
}

/// Spawn the sync worker thread that performs blocking remote and storage I/O.
///
/// Commands are handled strictly in submission order, so overlapping saves
/// land on the remote in the order they were issued.
///
/// # Arguments
/// - `remote`: Remote store used for fetches and bulk writes.
/// - `storage`: Local mirror; `None` skips mirroring.
/// - `record_id`: Bulk record overwritten by saves.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_sync_backend(
    remote: Box<dyn RemoteStore>,
    storage: Option<LocalStorage>,
    record_id: String,
) -> SyncHandle {
    let (cmd_tx, cmd_rx) = unbounded::<SyncCmd>();
    let (evt_tx, evt_rx) = unbounded();

    let state = WorkerState {
        remote,
        storage,
        record_id,
        evt_tx,
        perf_log_enabled: env_flag_enabled("PROMPTBAR_SYNC_PERF_LOG"),
    };

    thread::Builder::new()
        .name("promptbar-sync-backend".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                match cmd {
                    SyncCmd::FetchFallbackPool { limit } => {
                        handle_fetch_fallback_pool(&state, limit)
                    }
                    SyncCmd::SavePrompts {
                        ticket,
                        prompts,
                        reply,
                    } => handle_save_prompts(&state, ticket, prompts, reply),
                }
            }
        })
        .expect("spawn sync backend thread");

    SyncHandle {
        cmd_tx,
        evt_rx,
        next_ticket: AtomicU64::new(1),
    }
}
