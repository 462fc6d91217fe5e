//! Scan lifecycle simulation
//!
//! The simulator owns a single [`ScanState`] and moves it through
//! `idle -> scanning -> complete`, or back to `idle` when a run is stopped.
//! Every mutation publishes a fresh snapshot on a watch channel, so observers
//! only ever see complete, immutable states.

use scandeck_core::{
    Clock, Entropy, PhotoRef, ScanState, ScanStatus, PROGRESS_COMPLETE,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Largest progress increment applied by a single tick, in percent
pub const MAX_PROGRESS_STEP: f64 = 2.0;

/// Size of placeholder photos requested from the image service
pub const PHOTO_SIZE: (u32, u32) = (800, 600);

/// Drives one [`ScanState`] through its lifecycle on command
#[derive(Debug)]
pub struct ScanSimulator {
    state: ScanState,
    photo: Option<PhotoRef>,
    fault: Option<String>,
    publisher: watch::Sender<ScanState>,
}

impl ScanSimulator {
    /// Create a simulator in the idle zero state
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(ScanState::idle());
        Self {
            state: ScanState::idle(),
            photo: None,
            fault: None,
            publisher,
        }
    }

    /// Current snapshot
    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state.is_scanning
    }

    /// Most recently captured photo, if any
    pub fn photo(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }

    /// Reason given by the last call to [`ScanSimulator::fail`]
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Receive every published snapshot, starting with the current one
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.publisher.subscribe()
    }

    /// Begin a new scan run.
    ///
    /// Ignored while a run is already in progress. Returns whether a run
    /// was started.
    pub fn start(&mut self) -> bool {
        if self.state.is_scanning {
            debug!("start ignored, scan already running");
            return false;
        }
        self.fault = None;
        self.publish(ScanState::started());
        info!("scan started");
        true
    }

    /// Abort the current run and return to idle.
    ///
    /// Progress, point count and time estimate are reset together. Ignored
    /// while not scanning. Returns whether a run was stopped.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_scanning {
            debug!("stop ignored, no scan running");
            return false;
        }
        let progress = self.state.progress;
        self.publish(ScanState::idle());
        info!(progress, "scan stopped");
        true
    }

    /// Force the zero state from anywhere and forget the captured photo
    pub fn reset(&mut self) {
        self.photo = None;
        self.fault = None;
        self.publish(ScanState::idle());
        debug!("simulator reset");
    }

    /// Advance the current run by one tick.
    ///
    /// Progress grows by a uniform draw from `[0, 2)` and is clamped to 100.
    /// The point count follows progress and the time estimate counts down by
    /// one second. Reaching 100 completes the run. A no-op unless scanning;
    /// returns whether the state changed.
    pub fn tick<E: Entropy + ?Sized>(&mut self, entropy: &mut E) -> bool {
        if !self.state.is_scanning {
            return false;
        }

        let step = entropy.uniform(0.0, MAX_PROGRESS_STEP);
        let progress = (self.state.progress + step).clamp(0.0, PROGRESS_COMPLETE);
        let mut next = ScanState {
            progress,
            points_collected: ScanState::points_for_progress(progress),
            estimated_time_remaining: self.state.estimated_time_remaining.saturating_sub(1),
            ..self.state
        };

        if progress >= PROGRESS_COMPLETE {
            next.progress = PROGRESS_COMPLETE;
            next.status = ScanStatus::Complete;
            next.is_scanning = false;
            info!(points = next.points_collected, "scan complete");
        }

        self.publish(next);
        true
    }

    /// Put the scanner into the error state, e.g. on a simulated hardware fault.
    ///
    /// Ignored once a run has completed, so a complete state always carries
    /// full progress. Returns whether the error state was entered.
    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        if self.state.status == ScanStatus::Complete {
            debug!(reason = %reason, "fail ignored, scan already complete");
            return false;
        }
        warn!(reason = %reason, "scan failed");
        self.fault = Some(reason);
        self.publish(ScanState {
            is_scanning: false,
            status: ScanStatus::Error,
            ..self.state
        });
        true
    }

    /// Take a placeholder photo of the scene
    pub fn capture_photo<E, C>(&mut self, entropy: &mut E, clock: &C) -> &PhotoRef
    where
        E: Entropy + ?Sized,
        C: Clock + ?Sized,
    {
        let seed = entropy.index(1000) as u32;
        let (width, height) = PHOTO_SIZE;
        let photo = PhotoRef::placeholder(seed, width, height, clock.timestamp());
        debug!(url = %photo.url, "photo captured");
        self.photo.insert(photo)
    }

    fn publish(&mut self, state: ScanState) {
        self.state = state;
        self.publisher.send_replace(state);
    }
}

impl Default for ScanSimulator {
    fn default() -> Self {
        Self::new()
    }
}
