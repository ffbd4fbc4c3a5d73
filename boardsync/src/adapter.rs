//! Sync adapter — bridges session actions to the remote stroke log.
//!
//! DESIGN
//! ======
//! Remote calls go through a bounded queue drained by one background task,
//! so the drawing path never waits on the network and a commit followed by
//! an undo reaches the log in that order. Enqueueing uses `try_send`; when
//! the queue is full the call is dropped with a warning.
//!
//! The adapter tracks the active board. After a board switch, actions that
//! still name the old board are refused at enqueue time, so no new calls
//! reference it. Calls queued before the switch still run in order.
//!
//! The worker only needs `tokio::sync` channels, so it runs on whichever
//! executor the target has: a tokio task natively, `spawn_local` in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures are logged and swallowed. Local state is authoritative
//! for rendering and is never rolled back; nothing is retried. A failed or
//! unauthorized load shows an empty board.

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};
use whiteboard::session::{Action, WhiteboardSession};
use whiteboard::stroke::{BoardKey, Stroke};

use crate::stroke_log::StrokeLog;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Adapter settings, loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    /// Base URL of the stroke log service.
    pub base_url: String,
    /// Bounded capacity of the outgoing call queue.
    pub queue_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), queue_capacity: DEFAULT_QUEUE_CAPACITY }
    }
}

impl SyncConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SKETCHBOARD_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            queue_capacity: env_parse("SYNC_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY).max(1),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// One queued remote call.
#[derive(Debug)]
enum Job {
    Append(Stroke),
    DeleteMostRecent(BoardKey),
    DeleteAll(BoardKey),
    Flush(oneshot::Sender<()>),
}

impl Job {
    fn from_action(action: &Action) -> Option<Self> {
        match action {
            Action::Append(stroke) => Some(Self::Append(stroke.clone())),
            Action::DeleteMostRecent(board) => Some(Self::DeleteMostRecent(board.clone())),
            Action::DeleteAll(board) => Some(Self::DeleteAll(board.clone())),
            Action::OpenTextEditor { .. } | Action::CloseTextEditor | Action::RenderNeeded => None,
        }
    }

    fn board(&self) -> Option<&BoardKey> {
        match self {
            Self::Append(stroke) => Some(&stroke.board),
            Self::DeleteMostRecent(board) | Self::DeleteAll(board) => Some(board),
            Self::Flush(_) => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Append(_) => "append",
            Self::DeleteMostRecent(_) => "delete_most_recent",
            Self::DeleteAll(_) => "delete_all",
            Self::Flush(_) => "flush",
        }
    }
}

/// Handle to the background sync worker.
pub struct SyncAdapter {
    log: Arc<dyn StrokeLog>,
    tx: mpsc::Sender<Job>,
    active: watch::Sender<BoardKey>,
    stopped: oneshot::Receiver<()>,
}

impl SyncAdapter {
    /// Spawn the worker for `log`, starting on `board`.
    ///
    /// Natively this must be called from within a tokio runtime; in the
    /// browser the worker runs on the page's microtask queue.
    #[must_use]
    pub fn spawn(log: Arc<dyn StrokeLog>, board: BoardKey, config: &SyncConfig) -> Self {
        let capacity = config.queue_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        let (active, _) = watch::channel(board);
        let (stopped_tx, stopped) = oneshot::channel();
        info!(queue_capacity = capacity, "sync worker configured");
        spawn_worker(run_worker(Arc::clone(&log), rx, stopped_tx));
        Self { log, tx, active, stopped }
    }

    /// The board remote calls are currently accepted for.
    #[must_use]
    pub fn active_board(&self) -> BoardKey {
        self.active.borrow().clone()
    }

    /// Queue the remote calls among `actions`. Never blocks.
    ///
    /// Calls naming a board other than the active one are dropped.
    pub fn dispatch(&self, actions: &[Action]) {
        for job in actions.iter().filter_map(Job::from_action) {
            if let Some(board) = job.board() {
                if *board != *self.active.borrow() {
                    warn!(job = job.name(), board_id = %board.board_id, tenant_id = %board.tenant_id, "call for inactive board; dropping");
                    continue;
                }
            }
            self.enqueue(job);
        }
    }

    fn enqueue(&self, job: Job) {
        match self.tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                warn!(job = job.name(), "sync queue full; dropping remote call");
            }
            Err(TrySendError::Closed(job)) => {
                warn!(job = job.name(), "sync queue closed; dropping remote call");
            }
        }
    }

    /// Point the adapter at a new board. Calls already queued are unaffected.
    pub fn retarget(&self, board: BoardKey) {
        self.active.send_replace(board);
    }

    /// Wait until every call queued so far has been handled.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Job::Flush(done_tx)).await.is_err() {
            warn!("sync worker stopped; nothing to flush");
            return;
        }
        if done_rx.await.is_err() {
            warn!("sync worker dropped flush request");
        }
    }

    /// Fetch the ordered log for `board`.
    ///
    /// Failures, unauthorized tenants included, read as an empty board.
    pub async fn load(&self, board: &BoardKey) -> Vec<Stroke> {
        match self.log.list(board).await {
            Ok(strokes) => {
                debug!(board_id = %board.board_id, tenant_id = %board.tenant_id, count = strokes.len(), "loaded board");
                strokes
            }
            Err(e) if e.is_unauthorized() => {
                warn!(board_id = %board.board_id, tenant_id = %board.tenant_id, error = %e, "not authorized for board; showing empty board");
                Vec::new()
            }
            Err(e) => {
                warn!(board_id = %board.board_id, tenant_id = %board.tenant_id, error = %e, "board load failed; showing empty board");
                Vec::new()
            }
        }
    }

    /// Switch `session` to `board` and replace its history with the remote log.
    ///
    /// Everything queued before the switch, for either board, is flushed
    /// before the fetch, so the previous board keeps its last strokes and the
    /// fetch sees this client's own pending calls.
    pub async fn open(&self, session: &mut WhiteboardSession, board: BoardKey) -> Vec<Action> {
        self.retarget(board.clone());
        let mut actions = session.open_board(board.clone());
        self.flush().await;
        let strokes = self.load(&board).await;
        actions.extend(session.load_strokes(strokes));
        actions
    }

    /// Close the queue and wait for the worker to drain it.
    pub async fn shutdown(self) {
        let Self { tx, stopped, .. } = self;
        drop(tx);
        if stopped.await.is_err() {
            warn!("sync worker ended abnormally");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_worker<F>(worker: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    drop(tokio::spawn(worker));
}

#[cfg(target_arch = "wasm32")]
fn spawn_worker<F>(worker: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(worker);
}

async fn run_worker(log: Arc<dyn StrokeLog>, mut rx: mpsc::Receiver<Job>, stopped: oneshot::Sender<()>) {
    while let Some(job) = rx.recv().await {
        run_job(log.as_ref(), job).await;
    }
    debug!("sync worker stopped");
    if stopped.send(()).is_err() {
        debug!("adapter dropped before worker stopped");
    }
}

async fn run_job(log: &dyn StrokeLog, job: Job) {
    let name = job.name();
    let result = match &job {
        Job::Append(stroke) => log.append(stroke).await,
        Job::DeleteMostRecent(board) => log.delete_most_recent(board).await,
        Job::DeleteAll(board) => log.delete_all(board).await,
        Job::Flush(_) => Ok(()),
    };
    if let Err(e) = result {
        if let Some(board) = job.board() {
            warn!(job = name, board_id = %board.board_id, tenant_id = %board.tenant_id, error = %e, "remote call failed");
        }
    }
    if let Job::Flush(done) = job {
        if done.send(()).is_err() {
            debug!("flush requester went away");
        }
    }
}
