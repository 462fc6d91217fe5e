//! Headless host for a scan simulation
//!
//! A [`ScanSession`] plays the part of the dashboard view: it owns the
//! simulator and the activity log behind shared handles and schedules their
//! timers as tokio tasks. Each task is held by a [`TaskGuard`], so stopping,
//! resetting or dropping the session cancels every pending timer.

use crate::log_feeder::LogFeeder;
use crate::sampler::{PointCloudSampler, SamplerConfig};
use crate::simulator::ScanSimulator;
use crate::task::TaskGuard;
use parking_lot::Mutex;
use scandeck_core::{
    Entropy, LogLevel, PhotoRef, SampledCloud, ScanState, SeededEntropy, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Cadence of simulator ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Boxed entropy stream owned by one task
pub type EntropyStream = Box<dyn Entropy + Send>;

type SharedEntropy = Arc<Mutex<EntropyStream>>;

/// Runtime knobs for a [`ScanSession`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    /// Seed for every entropy stream; `None` seeds from the OS
    pub seed: Option<u64>,
    pub sampler: SamplerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
            sampler: SamplerConfig::default(),
        }
    }
}

/// Independent entropy streams for the tick task, the log task and
/// foreground requests (geometry, photos)
pub struct SessionEntropy {
    pub tick: EntropyStream,
    pub log: EntropyStream,
    pub view: EntropyStream,
}

impl SessionEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            tick: Box::new(SeededEntropy::from_seed(seed)),
            log: Box::new(SeededEntropy::from_seed(seed.wrapping_add(1))),
            view: Box::new(SeededEntropy::from_seed(seed.wrapping_add(2))),
        }
    }

    pub fn from_os() -> Self {
        Self {
            tick: Box::new(SeededEntropy::from_os()),
            log: Box::new(SeededEntropy::from_os()),
            view: Box::new(SeededEntropy::from_os()),
        }
    }
}

/// A simulator, its activity log and the timers that drive them
pub struct ScanSession {
    config: SessionConfig,
    simulator: Arc<Mutex<ScanSimulator>>,
    feeder: Arc<Mutex<LogFeeder>>,
    tick_entropy: SharedEntropy,
    log_entropy: SharedEntropy,
    view_entropy: Mutex<EntropyStream>,
    sampler: PointCloudSampler,
    ticker: Option<TaskGuard>,
    logger: Option<TaskGuard>,
}

impl ScanSession {
    /// Create an idle session with a seeded log and the system clock
    pub fn new(config: SessionConfig) -> Self {
        let entropy = match config.seed {
            Some(seed) => SessionEntropy::from_seed(seed),
            None => SessionEntropy::from_os(),
        };
        Self::with_parts(config, LogFeeder::new(SystemClock), entropy)
    }

    /// Create an idle session from explicit parts
    pub fn with_parts(config: SessionConfig, feeder: LogFeeder, entropy: SessionEntropy) -> Self {
        Self {
            config,
            simulator: Arc::new(Mutex::new(ScanSimulator::new())),
            feeder: Arc::new(Mutex::new(feeder)),
            tick_entropy: Arc::new(Mutex::new(entropy.tick)),
            log_entropy: Arc::new(Mutex::new(entropy.log)),
            view_entropy: Mutex::new(entropy.view),
            sampler: PointCloudSampler::new(config.sampler),
            ticker: None,
            logger: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Latest published snapshot
    pub fn state(&self) -> ScanState {
        self.simulator.lock().state()
    }

    /// Observe every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.simulator.lock().subscribe()
    }

    /// Shared handle to the activity log
    pub fn log(&self) -> Arc<Mutex<LogFeeder>> {
        self.feeder.clone()
    }

    /// Whether a tick timer is currently scheduled
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start a scan run and schedule its ticks.
    ///
    /// Must be called from within a tokio runtime. Ignored while a run is
    /// already in progress; returns whether a run was started.
    pub fn start(&mut self) -> bool {
        if !self.simulator.lock().start() {
            return false;
        }
        self.feeder.lock().append(LogLevel::Info, "Scan started");

        self.ticker = Some(TaskGuard::spawn(
            "scan-tick",
            run_ticks(
                self.simulator.clone(),
                self.feeder.clone(),
                self.tick_entropy.clone(),
                self.config.tick_interval,
            ),
        ));

        let scanning = self.simulator.lock().subscribe();
        self.logger = Some(TaskGuard::spawn(
            "activity-log",
            run_log(self.feeder.clone(), self.log_entropy.clone(), scanning),
        ));
        true
    }

    /// Stop the current run and cancel its timers.
    ///
    /// Ignored while not scanning; returns whether a run was stopped.
    pub fn stop(&mut self) -> bool {
        self.cancel_timers();
        if !self.simulator.lock().stop() {
            return false;
        }
        self.feeder.lock().append(LogLevel::Warn, "Scan stopped by user");
        true
    }

    /// Return to the zero state from anywhere
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.simulator.lock().reset();
        self.feeder.lock().append(LogLevel::Info, "System reset");
    }

    /// Put the scanner into the error state and cancel its timers.
    ///
    /// Ignored once the run has completed; returns whether the fault was
    /// recorded.
    pub fn fail(&mut self, reason: &str) -> bool {
        if !self.simulator.lock().fail(reason) {
            return false;
        }
        self.cancel_timers();
        self.feeder.lock().append(LogLevel::Error, format!("Scanner fault: {reason}"));
        true
    }

    /// Take a placeholder photo and note it in the log
    pub fn capture_photo(&self) -> PhotoRef {
        let mut simulator = self.simulator.lock();
        let mut entropy = self.view_entropy.lock();
        let mut feeder = self.feeder.lock();
        let photo = simulator.capture_photo(&mut **entropy, feeder.clock()).clone();
        feeder.append(LogLevel::Info, "Photo captured");
        photo
    }

    /// Most recently captured photo
    pub fn photo(&self) -> Option<PhotoRef> {
        self.simulator.lock().photo().cloned()
    }

    /// Geometry for the current point count
    pub fn point_cloud(&self) -> SampledCloud {
        let state = self.state();
        let mut entropy = self.view_entropy.lock();
        self.sampler.sample_state(&state, &mut **entropy)
    }

    /// Empty the activity log
    pub fn clear_log(&self) {
        self.feeder.lock().clear();
    }

    /// Transcript of the activity log
    pub fn export_log(&self) -> String {
        self.feeder.lock().export()
    }

    fn cancel_timers(&mut self) {
        for mut task in [self.ticker.take(), self.logger.take()].into_iter().flatten() {
            task.cancel();
        }
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        debug!("scan session torn down");
    }
}

async fn run_ticks(
    simulator: Arc<Mutex<ScanSimulator>>,
    feeder: Arc<Mutex<LogFeeder>>,
    entropy: SharedEntropy,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of an interval completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let state = {
            let mut simulator = simulator.lock();
            let mut entropy = entropy.lock();
            if !simulator.tick(&mut **entropy) {
                break;
            }
            simulator.state()
        };
        if state.is_complete() {
            feeder.lock().append(
                LogLevel::Success,
                format!("Scan complete: {} points collected", state.points_collected),
            );
            break;
        }
    }
    debug!("tick timer finished");
}

async fn run_log(
    feeder: Arc<Mutex<LogFeeder>>,
    entropy: SharedEntropy,
    scanning: watch::Receiver<ScanState>,
) {
    // each run gets its own task, so every delay is drawn within one run
    loop {
        let delay = LogFeeder::next_delay(&mut **entropy.lock());
        tokio::time::sleep(delay).await;

        if !scanning.borrow().is_scanning {
            break;
        }
        let mut stream = entropy.lock();
        feeder.lock().tick(&mut **stream);
    }
    info!("activity log closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use scandeck_core::{FixedClock, ScanStatus, ScriptedEntropy};

    fn scripted_session(step: f64) -> ScanSession {
        let entropy = SessionEntropy {
            tick: Box::new(ScriptedEntropy::constant(step)),
            log: Box::new(ScriptedEntropy::new(vec![1500.0, 2.0, 0.5])),
            view: Box::new(ScriptedEntropy::constant(0.0)),
        };
        ScanSession::with_parts(
            SessionConfig::default(),
            LogFeeder::new(FixedClock::new("10:00:00")),
            entropy,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_runs_to_completion() {
        let mut session = scripted_session(2.0);
        assert!(session.start());
        assert!(session.is_ticking());

        tokio::time::sleep(Duration::from_millis(5_050)).await;

        let state = session.state();
        assert_eq!(state.status, ScanStatus::Complete);
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.points_collected, 100_000);
        assert!(!session.is_ticking());
        assert_eq!(session.point_cloud().len(), 50_000);

        let log = session.log();
        let last = log.lock().latest().cloned().unwrap();
        assert_eq!(last.level, LogLevel::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticks() {
        let mut session = scripted_session(1.0);
        session.start();
        tokio::time::sleep(Duration::from_millis(550)).await;
        assert!(session.state().progress > 0.0);

        assert!(session.stop());
        assert!(!session.stop());
        assert!(!session.is_ticking());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let state = session.state();
        assert_eq!(state.status, ScanStatus::Idle);
        assert_eq!(state.progress, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_timer() {
        let mut session = scripted_session(1.0);
        assert!(session.start());
        assert!(!session.start());
        tokio::time::sleep(Duration::from_millis(1_050)).await;
        // ten ticks of 1% each
        assert_eq!(session.state().progress, 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_feeds_only_while_scanning() {
        let mut session = scripted_session(0.0);
        let before = session.log().lock().len();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.log().lock().len(), before);

        session.start();
        tokio::time::sleep(Duration::from_millis(1_600)).await;
        let log = session.log();
        let feeder = log.lock();
        // seed entries, "Scan started", one synthetic entry
        assert_eq!(feeder.len(), before + 2);
        assert_eq!(feeder.latest().map(|e| e.level), Some(LogLevel::Info));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_draws_fresh_log_delay() {
        let entropy = SessionEntropy {
            tick: Box::new(ScriptedEntropy::constant(0.0)),
            log: Box::new(ScriptedEntropy::new(vec![3000.0, 0.0, 0.9])),
            view: Box::new(ScriptedEntropy::constant(0.0)),
        };
        let mut session = ScanSession::with_parts(
            SessionConfig::default(),
            LogFeeder::new(FixedClock::new("10:00:00")),
            entropy,
        );
        let before = session.log().lock().len();

        session.start();
        tokio::time::sleep(Duration::from_millis(2_800)).await;
        assert!(session.stop());
        assert!(session.start());

        // the 3000 ms delay of the first run must not fire into the second
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(session.log().lock().len(), before + 3);

        // second run draws the 1000 ms minimum
        tokio::time::sleep(Duration::from_millis(800)).await;
        let log = session.log();
        let feeder = log.lock();
        assert_eq!(feeder.len(), before + 4);
        assert_eq!(feeder.latest().map(|e| e.level), Some(LogLevel::Info));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_silences_log() {
        let mut session = scripted_session(0.0);
        session.start();
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.stop();
        let after_stop = session.log().lock().len();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.log().lock().len(), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_after_completion_is_ignored() {
        let mut session = scripted_session(2.0);
        session.start();
        tokio::time::sleep(Duration::from_millis(5_050)).await;
        let len = session.log().lock().len();

        assert!(!session.fail("late fault"));
        assert_eq!(session.state().status, ScanStatus::Complete);
        assert_eq!(session.log().lock().len(), len);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_photo() {
        let mut session = scripted_session(2.0);
        session.start();
        let photo = session.capture_photo();
        assert!(photo.url.starts_with(PhotoRef::SERVICE_URL));
        assert_eq!(session.photo(), Some(photo));

        session.reset();
        assert!(session.photo().is_none());
        assert_eq!(session.state(), ScanState::idle());
        assert!(!session.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_stops_ticks() {
        let mut session = scripted_session(1.0);
        session.start();
        assert!(session.fail("laser interlock open"));
        assert_eq!(session.state().status, ScanStatus::Error);
        assert!(!session.is_ticking());
        let log = session.log();
        assert_eq!(log.lock().latest().map(|e| e.level), Some(LogLevel::Error));
    }
}
