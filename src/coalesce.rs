//! Live-Query Coalescer (C7).
//!
//! For interactive typing the front end emits a key-by-key update; this
//! module owns a `session -> latest pending text` map and a `dropped`
//! session set, each guarded by its own mutex, plus a dedicated worker
//! thread that drains the former against the latter. Re-architected as a
//! plain worker thread that owns its receive side: the behavioral contract
//! is last-write-wins per session and no emission ever reaches a dropped
//! session, not any particular locking strategy.
//!
//! Grounded on the `parking_lot::Mutex`/`Condvar` shared-map-plus-worker
//! pattern used throughout the pack's server code (e.g.
//! `omnitron-dev-omni`'s RPC dispatcher), adapted to a single pending slot
//! per session instead of a queue.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::engine::Engine;

type SessionId = u64;

struct Shared {
    pending: Mutex<HashMap<SessionId, String>>,
    // Sessions that disconnected. Checked both when dequeuing (to skip
    // scoring pointlessly) and again right before `emit` (to catch a
    // disconnect that arrived while scoring was already in flight), since a
    // session can drop after its text was dequeued but before its result
    // was ready.
    dropped: Mutex<HashSet<SessionId>>,
    ready: Condvar,
    shutdown: AtomicBool,
}

/// Coalesces per-session live queries so only the most recently typed text
/// for each session is ever scored, discarding any snapshot superseded
/// before the worker picked it up.
pub struct Coalescer {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl Coalescer {
    /// Spawns the worker thread. `emit(session_id, results)` is called once
    /// per scored snapshot, from the worker thread; it must not block for
    /// long, since it runs between dequeuing one session's work and the
    /// next. `k` is the number of suggestions to produce per snapshot.
    pub fn spawn<F>(engine: Arc<Engine>, k: usize, emit: F) -> Coalescer
    where
        F: Fn(SessionId, Vec<String>) + Send + 'static,
    {
        let shared = Arc::new(Shared {
            pending: Mutex::new(HashMap::new()),
            dropped: Mutex::new(HashSet::new()),
            ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || {
            Coalescer::run(worker_shared, engine, k, emit);
        });

        Coalescer {
            shared,
            worker: Some(worker),
        }
    }

    fn run<F>(shared: Arc<Shared>, engine: Arc<Engine>, k: usize, emit: F)
    where
        F: Fn(SessionId, Vec<String>),
    {
        loop {
            let (session, text) = {
                let mut pending = shared.pending.lock();
                loop {
                    if shared.shutdown.load(AtomicOrdering::Acquire) {
                        return;
                    }
                    if let Some(&session) = pending.keys().next() {
                        let text = pending.remove(&session).unwrap();
                        break (session, text);
                    }
                    shared.ready.wait(&mut pending);
                }
            };

            if shared.dropped.lock().contains(&session) {
                continue;
            }

            let results = if text.is_empty() {
                Vec::new()
            } else {
                engine.suggest(&text, k).unwrap_or_default()
            };

            // The session may have disconnected while `suggest` was
            // running; re-check immediately before emitting so no result
            // for a dropped session is ever delivered.
            if shared.dropped.lock().contains(&session) {
                continue;
            }

            debug!(session, result_count = results.len(), "coalesced query scored");
            emit(session, results);
        }
    }

    /// Submits the latest text for `session`. Non-blocking: if an older
    /// snapshot for this session is still waiting (not yet picked up by the
    /// worker), it is overwritten and silently discarded. A no-op for a
    /// session that has already been dropped.
    pub fn submit(&self, session: SessionId, text: String) {
        if self.shared.dropped.lock().contains(&session) {
            return;
        }
        let mut pending = self.shared.pending.lock();
        pending.insert(session, text);
        self.shared.ready.notify_one();
    }

    /// Marks `session` as disconnected. Any pending snapshot for it is
    /// discarded immediately; any computation already in flight for it is
    /// still run to completion but its result is never emitted -- `run`
    /// checks the dropped set right before calling `emit`.
    pub fn drop_session(&self, session: SessionId) {
        self.shared.dropped.lock().insert(session);
        self.shared.pending.lock().remove(&session);
        self.shared.ready.notify_one();
    }
}

impl Drop for Coalescer {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, AtomicOrdering::Release);
        self.shared.ready.notify_all();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
