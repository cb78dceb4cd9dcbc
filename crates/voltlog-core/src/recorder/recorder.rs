//! The recording pipeline: bounded buffers, periodic sampler, and
//! inactivity watchdog.
//!
//! Stream lifecycle is inferred from frame arrival alone. The first
//! frame arms the recorder, the second confirms a live stream, and a
//! 2-second gap ends it: while arming the recorder quietly resets,
//! while recording it finalizes the accumulated data into export
//! artifacts. Sampler and watchdog are tokio tasks owned here and
//! cancelled as a unit on reset, so tests can drive the whole machine
//! under a paused clock.

use crate::{
    ExportArtifacts, RecorderConfig, RecorderReadout, RecorderStats, RecorderStatus, Result,
    export,
    recorder::{DecodedSignals, RawFrame, RawFrameEvent, Snapshot},
};

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Mutable recorder state. All mutation happens behind one lock, in
/// response to an external call or a timer task.
struct RecorderInner {
    status: RecorderStatus,
    decoded: DecodedSignals,
    frames: Vec<RawFrame>,
    snapshots: Vec<Snapshot>,
    frames_seen: u64,
    artifacts: Option<ExportArtifacts>,
    /// Session ID for log correlation, assigned on arming.
    session_id: Option<Uuid>,
    /// Bumped on every watchdog arm, finalize, and reset; a watchdog
    /// task whose generation is stale fires into nothing.
    watchdog_gen: u64,
}

impl RecorderInner {
    fn new() -> Self {
        Self {
            status: RecorderStatus::Idle,
            decoded: DecodedSignals::default(),
            frames: Vec::new(),
            snapshots: Vec::new(),
            frames_seen: 0,
            artifacts: None,
            session_id: None,
            watchdog_gen: 0,
        }
    }

    fn stats(&self) -> RecorderStats {
        RecorderStats {
            frame_count: self.frames.len(),
            snapshot_count: self.snapshots.len(),
            frames_seen: self.frames_seen,
        }
    }
}

/// Timer tasks owned by the recorder. There is at most one of each;
/// re-arming the watchdog aborts and replaces the pending one.
#[derive(Default)]
struct Timers {
    sampler: Option<JoinHandle<()>>,
    watchdog: Option<JoinHandle<()>>,
}

/// Turns a live, possibly-bursty stream of raw frames and decoded
/// signal updates into two bounded ordered logs and, on demand or on
/// stream death, persists them as export artifacts.
///
/// Cloning yields another handle to the same recorder; timer tasks hold
/// such clones.
#[derive(Clone)]
pub struct Recorder {
    inner: Arc<Mutex<RecorderInner>>,
    timers: Arc<Mutex<Timers>>,
    readout_tx: watch::Sender<RecorderReadout>,
    config: Arc<RecorderConfig>,
}

impl Recorder {
    /// Create an idle recorder.
    pub fn new(config: RecorderConfig) -> Self {
        let (readout_tx, _) = watch::channel(RecorderReadout::default());
        info!(export_root = ?config.export_root, "Recorder initialized");
        Self {
            inner: Arc::new(Mutex::new(RecorderInner::new())),
            timers: Arc::new(Mutex::new(Timers::default())),
            readout_tx,
            config: Arc::new(config),
        }
    }

    /// Replace the held decoded signal state wholesale.
    ///
    /// Side effect only: the new state is picked up by future sampler
    /// ticks. Never fails, publishes nothing.
    pub async fn update_decoded(&self, decoded: DecodedSignals) {
        self.inner.lock().await.decoded = decoded;
    }

    /// Ingest one raw frame event.
    ///
    /// Normalizes the frame, counts it, appends it if the buffer has
    /// room, and drives the state machine. Ignored without effect while
    /// finalizing or in a terminal state; `frames_seen` advances only
    /// while ingestion is live, dropped frames are not counted.
    #[instrument(skip(self, event))]
    pub async fn on_raw_frame(&self, event: RawFrameEvent) {
        let frame = RawFrame::from_event(event);

        let (transitioned, generation) = {
            let mut inner = self.inner.lock().await;

            match inner.status {
                RecorderStatus::Finalizing | RecorderStatus::Ready | RecorderStatus::Error => {
                    debug!(status = ?inner.status, "Frame ignored, ingestion is off");
                    return;
                }
                _ => {}
            }

            inner.frames_seen += 1;
            if inner.frames.len() < self.config.raw_frame_cap {
                inner.frames.push(frame);
            }

            let transitioned = match inner.status {
                RecorderStatus::Idle => {
                    let session_id = Uuid::new_v4();
                    inner.session_id = Some(session_id);
                    inner.status = RecorderStatus::Arming;
                    info!(session_id = %session_id, "First frame seen, arming");
                    true
                }
                RecorderStatus::Arming if inner.frames_seen >= 2 => {
                    inner.status = RecorderStatus::Recording;
                    if let Some(session_id) = inner.session_id {
                        info!(session_id = %session_id, "Stream confirmed, recording");
                    }
                    true
                }
                _ => false,
            };

            inner.watchdog_gen += 1;
            self.publish(&inner);
            (transitioned, inner.watchdog_gen)
        };

        // A state transition (re-)starts the sampler; every qualifying
        // frame re-arms the sliding watchdog.
        if transitioned {
            self.start_sampler().await;
        }
        self.arm_watchdog(generation).await;
    }

    /// Current lifecycle state.
    pub async fn status(&self) -> RecorderStatus {
        self.inner.lock().await.status
    }

    /// Current buffer statistics.
    pub async fn stats(&self) -> RecorderStats {
        self.inner.lock().await.stats()
    }

    /// Paths of the last completed export, if any.
    pub async fn artifacts(&self) -> Option<ExportArtifacts> {
        self.inner.lock().await.artifacts.clone()
    }

    /// Observe every status, statistics, or artifact change.
    ///
    /// Dropping the receiver is the unsubscription.
    pub fn subscribe(&self) -> watch::Receiver<RecorderReadout> {
        self.readout_tx.subscribe()
    }

    /// Stop sampling and persist both buffers as export artifacts.
    ///
    /// Empty buffers are a benign abort back to idle: no files are
    /// written and both buffers are cleared so a later session cannot
    /// pick up frames from the dead stream. A call while already
    /// finalizing is a no-op. Any I/O or archive failure transitions to
    /// [`RecorderStatus::Error`] and is returned to the caller.
    #[instrument(skip(self))]
    pub async fn finalize(&self) -> Result<Option<ExportArtifacts>> {
        {
            let mut inner = self.inner.lock().await;
            if inner.status == RecorderStatus::Finalizing {
                debug!("Finalize already in progress");
                return Ok(None);
            }
            inner.status = RecorderStatus::Finalizing;
            inner.watchdog_gen += 1;
            self.publish(&inner);
        }

        self.stop_timers().await;

        let (csv, trace, stamp, session_id) = {
            let mut inner = self.inner.lock().await;
            if inner.status != RecorderStatus::Finalizing {
                // A reset won the race; nothing left to export.
                return Ok(None);
            }
            if inner.frames.is_empty() || inner.snapshots.is_empty() {
                inner.status = RecorderStatus::Idle;
                inner.frames.clear();
                inner.snapshots.clear();
                inner.frames_seen = 0;
                inner.session_id = None;
                debug!("Nothing to export, returning to idle");
                self.publish(&inner);
                return Ok(None);
            }
            (
                export::render_csv(&inner.snapshots),
                export::render_trace(&inner.frames),
                export::file_stamp(Utc::now()),
                inner.session_id,
            )
        };

        let written = export::write_export(&self.config.export_root, &stamp, csv, trace).await;

        let mut inner = self.inner.lock().await;
        match written {
            Ok(artifacts) => {
                if inner.status != RecorderStatus::Finalizing {
                    // Reset during the I/O: files stay on disk but are
                    // not re-exposed as current artifacts.
                    warn!("Reset during export, discarding artifact paths");
                    return Ok(None);
                }
                inner.status = RecorderStatus::Ready;
                inner.artifacts = Some(artifacts.clone());
                if let Some(session_id) = session_id {
                    info!(
                        session_id = %session_id,
                        frames = inner.frames.len(),
                        snapshots = inner.snapshots.len(),
                        archive = ?artifacts.archive,
                        "Export ready"
                    );
                }
                self.publish(&inner);
                Ok(Some(artifacts))
            }
            Err(e) => {
                if inner.status == RecorderStatus::Finalizing {
                    inner.status = RecorderStatus::Error;
                    self.publish(&inner);
                }
                Err(e)
            }
        }
    }

    /// Cancel all timers, clear buffers, counters, decoded state, and
    /// artifact paths, and return to idle. Always succeeds.
    ///
    /// Files already written by a completed or in-flight finalize are
    /// left on disk untouched.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        self.stop_timers().await;

        let mut inner = self.inner.lock().await;
        inner.watchdog_gen += 1;
        inner.status = RecorderStatus::Idle;
        inner.frames.clear();
        inner.snapshots.clear();
        inner.frames_seen = 0;
        inner.artifacts = None;
        inner.decoded = DecodedSignals::default();
        inner.session_id = None;
        info!("Recorder reset");
        self.publish(&inner);
    }

    fn publish(&self, inner: &RecorderInner) {
        self.readout_tx.send_replace(RecorderReadout {
            status: inner.status,
            stats: inner.stats(),
            artifacts: inner.artifacts.clone(),
        });
    }

    /// Spawn the periodic sampler, replacing any previous one. The
    /// first snapshot is taken one full interval after arming, not
    /// immediately.
    async fn start_sampler(&self) {
        let recorder = self.clone();
        let period = self.config.sample_interval;

        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.sampler.take() {
            handle.abort();
        }
        timers.sampler = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                recorder.sample_tick().await;
            }
        }));
    }

    /// Take one snapshot of the current decoded state. Silently drops
    /// the sample once the snapshot buffer is at cap.
    async fn sample_tick(&self) {
        let mut inner = self.inner.lock().await;
        if !matches!(
            inner.status,
            RecorderStatus::Arming | RecorderStatus::Recording
        ) {
            return;
        }
        if inner.snapshots.len() >= self.config.snapshot_cap {
            return;
        }
        let snapshot = Snapshot::sample(&inner.decoded, export::locale_timestamp(Utc::now()));
        inner.snapshots.push(snapshot);
        self.publish(&inner);
    }

    /// Arm the single-shot inactivity watchdog, cancelling any pending
    /// one. Expiry with a stale generation is ignored.
    async fn arm_watchdog(&self, generation: u64) {
        let recorder = self.clone();
        let horizon = self.config.inactivity_timeout;

        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.watchdog.take() {
            handle.abort();
        }
        timers.watchdog = Some(tokio::spawn(async move {
            sleep(horizon).await;
            // The expiry action runs detached: the stored (abortable)
            // task must not be the one performing reset/finalize, or
            // their own timer cleanup would cancel it mid-flight.
            tokio::spawn(async move {
                recorder.on_watchdog_expiry(generation).await;
            });
        }));
    }

    /// Watchdog expiry: the stream went quiet for the full horizon.
    async fn on_watchdog_expiry(&self, generation: u64) {
        let status = {
            let inner = self.inner.lock().await;
            if inner.watchdog_gen != generation {
                return;
            }
            inner.status
        };

        match status {
            RecorderStatus::Arming => {
                warn!("Stream died before confirmation, resetting");
                self.reset().await;
            }
            RecorderStatus::Recording => {
                info!("Stream inactive, finalizing automatically");
                // Fire-and-forget: the failure is observable only via
                // the Error status, matching the manual path's side
                // effects without a caller to re-signal.
                if let Err(e) = self.finalize().await {
                    error!(error = ?e, "Automatic finalize failed");
                }
            }
            _ => {}
        }
    }

    /// Abort sampler and watchdog. Stale-generation guards make this
    /// safe even if a timer is mid-flight.
    async fn stop_timers(&self) {
        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.sampler.take() {
            handle.abort();
        }
        if let Some(handle) = timers.watchdog.take() {
            handle.abort();
        }
    }
}
