//! The recompute session.
//!
//! Wraps the assembler behind a debounced, cancellable background
//! contract: every parameter drag updates the pending (ghost) snapshot
//! immediately and restarts the debounce window; when the window
//! expires the snapshot is committed and one assemble runs off the
//! caller's thread. Commits carry a monotonically increasing generation
//! and a completed result is published only while its generation is
//! still the newest; superseded results are dropped on arrival
//! (last-write-wins, cooperative cancellation).
//!
//! The published `PatternDocument` slot has exactly one writer (the
//! worker); consumers watch it and clone the `Arc` before exporting, so
//! an export never observes a document mid-replacement.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use patternkit_core::{
    BrandStyle, DesignParameters, DraftError, PatternDocument, PipelineError,
};
use patternkit_drafting::assemble;

use crate::ghost::GhostDelta;

/// Reference debounce window between the last drag event and a commit.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Initial garment description.
    pub garment: String,
    /// Initial brand.
    pub brand: BrandStyle,
    /// Initial committed parameters.
    pub params: DesignParameters,
    /// Debounce window; tests shorten this.
    pub debounce: Duration,
    /// Artificial delay added to every assemble, for exercising
    /// supersession under a realistic compute cost. Zero in production.
    pub compute_delay: Duration,
}

impl SessionConfig {
    /// Config for the given garment and brand, neutral parameters.
    pub fn new(garment: impl Into<String>, brand: BrandStyle) -> Self {
        Self {
            garment: garment.into(),
            brand,
            params: DesignParameters::neutral(),
            debounce: DEFAULT_DEBOUNCE,
            compute_delay: Duration::ZERO,
        }
    }
}

/// Worker lifecycle, for logging and introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Pending,
    Computing,
}

enum Command {
    Params(DesignParameters),
    Garment(String),
    Brand(BrandStyle),
    Shutdown,
}

/// Committed vs pending parameter snapshots. Never merged until a
/// commit event fires; the ghost delta is derived by comparing them.
#[derive(Debug, Clone, Copy)]
struct ParamSnapshots {
    committed: DesignParameters,
    pending: DesignParameters,
}

/// Handle to a running recompute session.
///
/// Cheap to clone; the session shuts down when [`SessionHandle::shutdown`]
/// is called or every handle has been dropped.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
    snapshots: Arc<RwLock<ParamSnapshots>>,
    doc_rx: watch::Receiver<Option<Arc<PatternDocument>>>,
}

impl SessionHandle {
    /// Records a parameter drag: the pending snapshot updates
    /// immediately (for ghost preview) and the debounce window restarts.
    pub fn update_params(&self, params: DesignParameters) -> Result<(), PipelineError> {
        self.snapshots.write().pending = params;
        self.send(Command::Params(params))
    }

    /// Changes the garment description; debounced like a drag.
    pub fn set_garment(&self, description: impl Into<String>) -> Result<(), PipelineError> {
        self.send(Command::Garment(description.into()))
    }

    /// Changes the brand; debounced like a drag.
    pub fn set_brand(&self, brand: BrandStyle) -> Result<(), PipelineError> {
        self.send(Command::Brand(brand))
    }

    /// Best-effort visual delta for the drag currently in progress.
    pub fn ghost(&self) -> GhostDelta {
        let snap = *self.snapshots.read();
        GhostDelta::between(&snap.committed, &snap.pending)
    }

    /// Watch stream of the current document. Starts at `None` and then
    /// always holds the result of the most recent committed parameters.
    pub fn documents(&self) -> watch::Receiver<Option<Arc<PatternDocument>>> {
        self.doc_rx.clone()
    }

    /// Snapshot of the current document, if one has been published.
    pub fn current_document(&self) -> Option<Arc<PatternDocument>> {
        self.doc_rx.borrow().clone()
    }

    /// Asks the worker to exit after the current computation.
    pub fn shutdown(&self) -> Result<(), PipelineError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, cmd: Command) -> Result<(), PipelineError> {
        self.tx.send(cmd).map_err(|_| PipelineError::SessionClosed)
    }
}

/// Spawns a recompute session on the current tokio runtime.
///
/// The initial configuration is committed immediately, so a first
/// document appears without waiting for a drag event.
pub fn spawn_session(config: SessionConfig) -> SessionHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let (doc_tx, doc_rx) = watch::channel(None);
    let snapshots = Arc::new(RwLock::new(ParamSnapshots {
        committed: config.params,
        pending: config.params,
    }));

    let worker = Worker {
        garment: config.garment.clone(),
        brand: config.brand,
        pending: Some(config.params),
        generation: 0,
        state: SessionState::Idle,
        debounce: config.debounce,
        compute_delay: config.compute_delay,
        snapshots: Arc::clone(&snapshots),
        doc_tx,
    };
    tokio::spawn(worker.run(rx));

    SessionHandle { tx, snapshots, doc_rx }
}

struct Worker {
    garment: String,
    brand: BrandStyle,
    /// Parameters awaiting commit, if a drag happened since the last one.
    pending: Option<DesignParameters>,
    /// Generation of the newest commit; results from older generations
    /// are discarded on arrival.
    generation: u64,
    state: SessionState,
    debounce: Duration,
    compute_delay: Duration,
    snapshots: Arc<RwLock<ParamSnapshots>>,
    doc_tx: watch::Sender<Option<Arc<PatternDocument>>>,
}

type ComputeResult = (u64, Result<PatternDocument, DraftError>);

impl Worker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<ComputeResult>();

        // Commit the initial configuration right away.
        let mut deadline = Some(Instant::now());

        loop {
            // A dormant debounce arm needs some deadline to sleep on.
            let wake_at = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                maybe_cmd = rx.recv() => {
                    match maybe_cmd {
                        Some(Command::Params(params)) => {
                            self.pending = Some(params);
                            deadline = Some(Instant::now() + self.debounce);
                            self.transition(SessionState::Pending);
                        }
                        Some(Command::Garment(description)) => {
                            self.garment = description;
                            if self.pending.is_none() {
                                self.pending = Some(self.snapshots.read().committed);
                            }
                            deadline = Some(Instant::now() + self.debounce);
                            self.transition(SessionState::Pending);
                        }
                        Some(Command::Brand(brand)) => {
                            self.brand = brand;
                            if self.pending.is_none() {
                                self.pending = Some(self.snapshots.read().committed);
                            }
                            deadline = Some(Instant::now() + self.debounce);
                            self.transition(SessionState::Pending);
                        }
                        Some(Command::Shutdown) | None => {
                            debug!("recompute session shutting down");
                            break;
                        }
                    }
                }

                _ = sleep_until(wake_at), if deadline.is_some() => {
                    deadline = None;
                    if let Some(params) = self.pending.take() {
                        self.commit(params, &result_tx);
                    }
                }

                Some((generation, result)) = result_rx.recv() => {
                    self.complete(generation, result);
                }
            }
        }
    }

    /// Commits the pending snapshot and launches one background draft.
    fn commit(&mut self, params: DesignParameters, result_tx: &mpsc::UnboundedSender<ComputeResult>) {
        self.generation += 1;
        self.snapshots.write().committed = params;
        self.transition(SessionState::Computing);
        debug!(generation = self.generation, "committing parameters");

        let generation = self.generation;
        let garment = self.garment.clone();
        let brand = self.brand;
        let delay = self.compute_delay;
        let tx = result_tx.clone();
        tokio::task::spawn_blocking(move || {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            let result = assemble(&garment, brand, &params);
            // Receiver gone means the session is shutting down.
            let _ = tx.send((generation, result));
        });
    }

    /// Publishes a finished draft unless a newer commit superseded it.
    fn complete(&mut self, generation: u64, result: Result<PatternDocument, DraftError>) {
        if generation != self.generation {
            trace!(
                generation,
                newest = self.generation,
                "dropping superseded recompute result"
            );
            return;
        }
        self.transition(SessionState::Idle);
        match result {
            Ok(doc) => {
                debug!(generation, style = %doc.style_name, "publishing document");
                // Single writer: replacing the slot is the only mutation.
                let _ = self.doc_tx.send(Some(Arc::new(doc)));
            }
            Err(err) => {
                // Previous document stays on screen.
                warn!(generation, error = %err, "recompute failed, keeping previous document");
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}
