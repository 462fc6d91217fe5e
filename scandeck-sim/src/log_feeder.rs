//! Synthetic activity log
//!
//! The feeder owns a bounded, ordered buffer of [`LogEntry`] values. While a
//! scan is running the host calls [`LogFeeder::tick`] after each randomized
//! delay from [`LogFeeder::next_delay`]; every other entry comes from explicit
//! [`LogFeeder::append`] calls.

use scandeck_core::{render_transcript, Clock, Entropy, LogEntry, LogLevel, SystemClock};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tracing::trace;

/// Maximum number of entries retained; older entries are evicted first
pub const LOG_CAPACITY: usize = 1000;

/// Probability that a synthetic entry is raised as a warning
pub const WARN_PROBABILITY: f64 = 0.1;

/// Bounds of the randomized delay between synthetic entries, in milliseconds
pub const LOG_DELAY_MS: (u64, u64) = (1000, 3000);

/// Operational messages emitted while scanning
pub const MESSAGE_CATALOG: [&str; 10] = [
    "Capturing point cloud segment",
    "Laser intensity nominal",
    "Motor position updated",
    "Processing depth data",
    "Calibrating sensor array",
    "Filtering noise from scan data",
    "Aligning point cloud segments",
    "Camera exposure adjusted",
    "Writing scan buffer",
    "Sensor temperature within operating range",
];

const SEED_ENTRIES: [(LogLevel, &str); 4] = [
    (LogLevel::Success, "Scanner system initialized"),
    (LogLevel::Info, "Laser module ready"),
    (LogLevel::Info, "Motor controller calibrated"),
    (LogLevel::Info, "Camera connected"),
];

/// Bounded activity log with FIFO eviction
pub struct LogFeeder {
    entries: VecDeque<LogEntry>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl LogFeeder {
    /// Create a feeder seeded with the start-up entries
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        let mut feeder = Self::empty(clock);
        for (level, message) in SEED_ENTRIES {
            feeder.append(level, message);
        }
        feeder
    }

    /// Create a feeder with no entries at all
    pub fn empty(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
            clock: Box::new(clock),
        }
    }

    /// Number of entries currently retained
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The clock entries are stamped with
    pub fn clock(&self) -> &(dyn Clock + Send + Sync) {
        self.clock.as_ref()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Append a message stamped with the current time
    pub fn append(&mut self, level: LogLevel, message: impl Into<String>) -> &LogEntry {
        let entry = LogEntry::new(level, message, self.clock.timestamp());
        self.push(entry)
    }

    /// Append a preformed entry, evicting from the head past capacity
    pub fn push(&mut self, entry: LogEntry) -> &LogEntry {
        trace!(level = %entry.level, message = %entry.message, "log entry");
        while self.entries.len() >= LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Emit one synthetic operational message
    pub fn tick<E: Entropy + ?Sized>(&mut self, entropy: &mut E) -> &LogEntry {
        let message = MESSAGE_CATALOG[entropy.index(MESSAGE_CATALOG.len())];
        let level = if entropy.chance(WARN_PROBABILITY) {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };
        self.append(level, message)
    }

    /// Delay before the next synthetic message, drawn fresh for every firing
    pub fn next_delay<E: Entropy + ?Sized>(entropy: &mut E) -> Duration {
        let (low, high) = LOG_DELAY_MS;
        let millis = entropy.uniform(low as f64, high as f64);
        Duration::from_millis(millis.round() as u64)
    }

    /// Drop every entry and note that the log was cleared
    pub fn clear(&mut self) {
        self.entries.clear();
        self.append(LogLevel::Info, "Log cleared");
    }

    /// Render the log as a transcript, one `[timestamp] LEVEL: message` per line
    pub fn export(&self) -> String {
        render_transcript(&self.entries)
    }
}

impl Default for LogFeeder {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl fmt::Debug for LogFeeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFeeder")
            .field("len", &self.entries.len())
            .field("latest", &self.entries.back())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scandeck_core::{FixedClock, ScriptedEntropy, SeededEntropy};

    fn feeder() -> LogFeeder {
        LogFeeder::new(FixedClock::new("10:00:00"))
    }

    #[test]
    fn test_seeded_on_construction() {
        let feeder = feeder();
        let levels: Vec<_> = feeder.entries().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Success, LogLevel::Info, LogLevel::Info, LogLevel::Info]
        );
    }

    #[test]
    fn test_eviction_keeps_last_thousand_in_order() {
        let mut feeder = LogFeeder::empty(FixedClock::new("10:00:00"));
        for i in 0..1050 {
            feeder.append(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(feeder.len(), LOG_CAPACITY);
        for (offset, entry) in feeder.entries().enumerate() {
            assert_eq!(entry.message, format!("entry {}", offset + 50));
        }
    }

    #[test]
    fn test_eviction_counts_seed_entries() {
        let mut feeder = feeder();
        for i in 0..LOG_CAPACITY {
            feeder.append(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(feeder.len(), LOG_CAPACITY);
        assert_eq!(feeder.entries().next().map(|e| e.message.as_str()), Some("entry 0"));
    }

    #[test]
    fn test_tick_draws_from_catalog() {
        let mut feeder = LogFeeder::empty(FixedClock::new("10:00:00"));
        let mut entropy = SeededEntropy::from_seed(3);
        for _ in 0..200 {
            let entry = feeder.tick(&mut entropy);
            assert!(MESSAGE_CATALOG.contains(&entry.message.as_str()));
            assert!(matches!(entry.level, LogLevel::Info | LogLevel::Warn));
        }
    }

    #[test]
    fn test_tick_level_follows_chance() {
        let mut feeder = LogFeeder::empty(FixedClock::new("10:00:00"));
        // index draw, then chance draw
        let mut entropy = ScriptedEntropy::new(vec![4.0, 0.05, 9.0, 0.5]);
        let first = feeder.tick(&mut entropy).clone();
        assert_eq!(first.message, MESSAGE_CATALOG[4]);
        assert_eq!(first.level, LogLevel::Warn);
        let second = feeder.tick(&mut entropy).clone();
        assert_eq!(second.message, MESSAGE_CATALOG[9]);
        assert_eq!(second.level, LogLevel::Info);
    }

    #[test]
    fn test_next_delay_in_bounds() {
        let mut entropy = SeededEntropy::from_seed(11);
        for _ in 0..500 {
            let delay = LogFeeder::next_delay(&mut entropy);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_clear_leaves_single_notice() {
        let mut feeder = feeder();
        feeder.clear();
        assert_eq!(feeder.len(), 1);
        let entry = feeder.latest().unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "Log cleared");
    }

    #[test]
    fn test_export_format() {
        let mut feeder = LogFeeder::empty(FixedClock::new("unused"));
        feeder.push(LogEntry::new(LogLevel::Info, "A", "10:00:00"));
        feeder.push(LogEntry::new(LogLevel::Warn, "B", "10:00:01"));
        assert_eq!(feeder.export(), "[10:00:00] INFO: A\n[10:00:01] WARN: B");
        assert_eq!(feeder.len(), 2);
    }

    #[test]
    fn test_export_empty_log() {
        let feeder = LogFeeder::empty(FixedClock::new("10:00:00"));
        assert_eq!(feeder.export(), "");
    }
}
