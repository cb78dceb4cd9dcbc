use crate::{
    BatteryStatus, DecodedSignals, FrameByte, FrameId, RawFrameEvent, Recorder, RecorderConfig,
    RecorderStatus,
};

use std::path::Path;
use std::time::Duration;

use tokio::time::sleep;

/// Short timer horizons so the sampler tick (1s) and the watchdog
/// (1.5s) never land on the same virtual instant.
fn config(root: &Path) -> RecorderConfig {
    RecorderConfig {
        sample_interval: Duration::from_secs(1),
        inactivity_timeout: Duration::from_millis(1500),
        export_root: root.to_path_buf(),
        ..RecorderConfig::default()
    }
}

fn any_frame() -> RawFrameEvent {
    RawFrameEvent {
        time_offset_ms: Some(0.0),
        id: Some(FrameId::Num(0x1A2)),
        bytes: Some(vec![FrameByte::Num(1), FrameByte::Num(2)]),
        kind: None,
    }
}

fn decoded_with_soc(soc: f64) -> DecodedSignals {
    DecodedSignals {
        battery: Some(BatteryStatus {
            soc: Some(soc),
            ..BatteryStatus::default()
        }),
        ..DecodedSignals::default()
    }
}

/// WHAT: First frame arms, second frame confirms recording
/// WHY: Transitions are driven by frame count, not frame content
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_idle_when_frames_arrive_then_arming_then_recording() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    assert_eq!(recorder.status().await, RecorderStatus::Idle);

    recorder.on_raw_frame(any_frame()).await;
    assert_eq!(recorder.status().await, RecorderStatus::Arming);

    recorder.on_raw_frame(any_frame()).await;
    assert_eq!(recorder.status().await, RecorderStatus::Recording);
}

/// WHAT: frames_seen counts every ingested frame past the buffer cap
/// WHY: The statistic reflects the stream, the buffer reflects storage
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_full_buffer_when_frames_arrive_then_counted_but_dropped() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(RecorderConfig {
        raw_frame_cap: 3,
        ..config(root.path())
    });

    for _ in 0..5 {
        recorder.on_raw_frame(any_frame()).await;
    }

    let stats = recorder.stats().await;
    assert_eq!(stats.frame_count, 3);
    assert_eq!(stats.frames_seen, 5);
}

/// WHAT: Watchdog expiry while arming resets to idle with empty buffers
/// WHY: A stream that dies before confirmation leaves no residue
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_arming_when_stream_dies_then_reset_to_idle() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    assert_eq!(recorder.status().await, RecorderStatus::Arming);

    sleep(Duration::from_millis(1600)).await;

    assert_eq!(recorder.status().await, RecorderStatus::Idle);
    let stats = recorder.stats().await;
    assert_eq!(stats.frame_count, 0);
    assert_eq!(stats.snapshot_count, 0);
    assert_eq!(stats.frames_seen, 0);
}

/// WHAT: Each frame slides the watchdog window forward
/// WHY: A live stream must never be finalized out from under itself
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_frames_keep_arriving_then_no_auto_finalize() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;

    for _ in 0..5 {
        sleep(Duration::from_millis(800)).await;
        recorder.on_raw_frame(any_frame()).await;
    }

    assert_eq!(recorder.status().await, RecorderStatus::Recording);
}

/// WHAT: Stream silence finalizes automatically into a ready export
/// WHY: The watchdog path shares the manual finalize logic end to end
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_stream_goes_quiet_then_auto_finalize_ready() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(80.0)).await;

    // One sampler tick at 1s, watchdog expiry at 1.5s after the last
    // frame, then the async export runs to completion.
    sleep(Duration::from_millis(1600)).await;
    let mut rx = recorder.subscribe();
    let readout = rx
        .wait_for(|r| {
            matches!(
                r.status,
                RecorderStatus::Ready | RecorderStatus::Error | RecorderStatus::Idle
            )
        })
        .await
        .unwrap()
        .clone();

    assert_eq!(readout.status, RecorderStatus::Ready);
    let artifacts = readout.artifacts.unwrap();

    let csv = std::fs::read_to_string(&artifacts.csv).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().contains(",80,"));

    let trace = std::fs::read_to_string(&artifacts.trace).unwrap();
    assert_eq!(trace.lines().count(), 4);
}

/// WHAT: Finalize with empty buffers is a benign no-op back to idle
/// WHY: An empty export is not an error and must write no files
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_empty_buffers_when_finalized_then_idle_and_no_files() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    let result = recorder.finalize().await.unwrap();

    assert!(result.is_none());
    assert_eq!(recorder.status().await, RecorderStatus::Idle);
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

/// WHAT: Finalize with frames but no snapshots aborts to idle, cleared
/// WHY: Both buffers must hold data for an export to be meaningful, and
/// the abort must not leave residue for a later session
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_frames_without_snapshots_when_finalized_then_idle() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;

    let result = recorder.finalize().await.unwrap();

    assert!(result.is_none());
    assert_eq!(recorder.status().await, RecorderStatus::Idle);
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);

    let stats = recorder.stats().await;
    assert_eq!(stats.frame_count, 0);
    assert_eq!(stats.frames_seen, 0);
}

/// WHAT: After a benign abort, the next session exports only its own frames
/// WHY: Frames from a dead stream must never leak into a later export
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_benign_abort_when_next_session_exported_then_no_old_frames() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    assert!(recorder.finalize().await.unwrap().is_none());

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(70.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;

    let artifacts = recorder.finalize().await.unwrap().unwrap();

    // Two header lines plus the three frames of the second session.
    let trace = std::fs::read_to_string(&artifacts.trace).unwrap();
    assert_eq!(trace.lines().count(), 5);
}

/// WHAT: Concurrent finalize calls produce exactly one export
/// WHY: A second call while finalizing is a no-op, never a second bundle
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_finalize_in_flight_when_finalized_again_then_single_export() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(61.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;

    let (first, second) = tokio::join!(recorder.finalize(), recorder.finalize());

    let exports: Vec<_> = [first.unwrap(), second.unwrap()]
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(exports.len(), 1);
    assert_eq!(recorder.status().await, RecorderStatus::Ready);
    // One export folder and one zip, nothing doubled.
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 2);
}

/// WHAT: A reset during the export I/O wins over the finalize
/// WHY: Nothing of the old session may resurface after a reset, even
/// when its files finished writing
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_finalize_in_flight_when_reset_then_idle_without_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(33.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;

    // The finalize parks on its export I/O before the reset runs.
    let (finalized, ()) = tokio::join!(recorder.finalize(), recorder.reset());

    assert!(finalized.unwrap().is_none());
    assert_eq!(recorder.status().await, RecorderStatus::Idle);
    assert_eq!(recorder.artifacts().await, None);
}

/// WHAT: A manual finalize with buffered data lands in Ready with paths
/// WHY: The caller-facing path returns the artifacts it exposes
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_buffered_data_when_finalized_then_ready_with_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(55.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;

    let artifacts = recorder.finalize().await.unwrap().unwrap();

    assert_eq!(recorder.status().await, RecorderStatus::Ready);
    assert_eq!(recorder.artifacts().await, Some(artifacts.clone()));
    assert!(artifacts.archive.is_file());
}

/// WHAT: Export failure transitions to Error and surfaces to the caller
/// WHY: I/O failure is the one fallible path and must be observable both ways
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_unwritable_export_root_when_finalized_then_error() {
    let root = tempfile::tempdir().unwrap();
    // A plain file where the export root should be makes create_dir_all fail.
    let blocked = root.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();
    let recorder = Recorder::new(config(&blocked));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(10.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;

    let result = recorder.finalize().await;

    assert!(result.is_err());
    assert_eq!(recorder.status().await, RecorderStatus::Error);
}

/// WHAT: Frames are ignored in Ready until an explicit reset
/// WHY: Ready and Error are terminal for the ingestion path
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_ready_when_frames_arrive_then_ignored_until_reset() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(42.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.finalize().await.unwrap();
    assert_eq!(recorder.status().await, RecorderStatus::Ready);

    let seen_before = recorder.stats().await.frames_seen;
    recorder.on_raw_frame(any_frame()).await;
    assert_eq!(recorder.status().await, RecorderStatus::Ready);
    assert_eq!(recorder.stats().await.frames_seen, seen_before);

    recorder.reset().await;
    recorder.on_raw_frame(any_frame()).await;
    assert_eq!(recorder.status().await, RecorderStatus::Arming);
}

/// WHAT: Reset returns everything to the initial observable state
/// WHY: {status: idle, frames: 0, rows: 0} and no paths, from any prior state
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_any_state_when_reset_then_initial_readout() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.update_decoded(decoded_with_soc(99.0)).await;
    sleep(Duration::from_millis(1100)).await;
    recorder.on_raw_frame(any_frame()).await;
    recorder.finalize().await.unwrap();

    recorder.reset().await;

    let stats = recorder.stats().await;
    assert_eq!(recorder.status().await, RecorderStatus::Idle);
    assert_eq!(stats.frame_count, 0);
    assert_eq!(stats.snapshot_count, 0);
    assert_eq!(stats.frames_seen, 0);
    assert_eq!(recorder.artifacts().await, None);
}

/// WHAT: The snapshot buffer stops growing at its cap
/// WHY: Capacity exhaustion silently drops samples, the stream continues
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_snapshot_cap_when_sampler_keeps_ticking_then_capped() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(RecorderConfig {
        snapshot_cap: 2,
        ..config(root.path())
    });

    recorder.on_raw_frame(any_frame()).await;
    recorder.on_raw_frame(any_frame()).await;

    for _ in 0..5 {
        sleep(Duration::from_millis(1000)).await;
        recorder.on_raw_frame(any_frame()).await;
    }

    assert_eq!(recorder.stats().await.snapshot_count, 2);
    assert_eq!(recorder.status().await, RecorderStatus::Recording);
}

/// WHAT: Subscribers observe every status and stats change
/// WHY: The readout channel is the UI's only window into the pipeline
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_subscriber_when_frames_arrive_then_readout_updates() {
    let root = tempfile::tempdir().unwrap();
    let recorder = Recorder::new(config(root.path()));
    let mut rx = recorder.subscribe();

    assert_eq!(rx.borrow().status, RecorderStatus::Idle);

    recorder.on_raw_frame(any_frame()).await;
    rx.changed().await.unwrap();
    let readout = rx.borrow_and_update().clone();
    assert_eq!(readout.status, RecorderStatus::Arming);
    assert_eq!(readout.stats.frames_seen, 1);
}
