//! Procedural point cloud sampling
//!
//! Turns a point count into the helical, radius-modulated ring shown while a
//! scan is running. Positions carry a small random jitter, so only the
//! cardinality and the bounding structure of a sample are reproducible.

use scandeck_core::{Entropy, Point3f, PointSample, SampledCloud, ScanState};
use std::f64::consts::PI;

/// Upper bound on the number of samples produced for rendering
pub const MAX_SAMPLES: usize = 50_000;

/// Default per-axis jitter amplitude
pub const DEFAULT_JITTER: f64 = 0.05;

/// Tunables for [`PointCloudSampler`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Cap on the number of samples, regardless of the collected count
    pub max_samples: usize,
    /// Each axis is offset by a uniform draw from `[-jitter, jitter)`
    pub jitter: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_samples: MAX_SAMPLES,
            jitter: DEFAULT_JITTER,
        }
    }
}

/// Maps a collected point count to renderable geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct PointCloudSampler {
    config: SamplerConfig,
}

impl PointCloudSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Number of samples produced for a collected point count
    pub fn sample_count(&self, points_collected: u64) -> usize {
        usize::try_from(points_collected)
            .unwrap_or(usize::MAX)
            .min(self.config.max_samples)
    }

    /// Generate `min(points_collected, max_samples)` samples.
    ///
    /// Sample `i` of `n` sits at `angle = i/n * 4π` on a ring of radius
    /// `2 + 0.5 sin(3 angle)` at height `1.5 sin(2 angle)`. Color is a
    /// gradient over normalized height: red rises and blue falls with height,
    /// green is constant.
    pub fn sample<E: Entropy + ?Sized>(&self, points_collected: u64, entropy: &mut E) -> SampledCloud {
        let count = self.sample_count(points_collected);
        let mut cloud = SampledCloud::with_capacity(count);
        let jitter = self.config.jitter;

        for i in 0..count {
            let angle = (i as f64 / count as f64) * 4.0 * PI;
            let radius = 2.0 + 0.5 * (3.0 * angle).sin();
            let height = 1.5 * (2.0 * angle).sin();

            let mut offset = [0.0f64; 3];
            if jitter > 0.0 {
                for axis in &mut offset {
                    *axis = entropy.uniform(-jitter, jitter);
                }
            }

            let position = Point3f::new(
                (radius * angle.cos() + offset[0]) as f32,
                (height + offset[1]) as f32,
                (radius * angle.sin() + offset[2]) as f32,
            );
            cloud.push(PointSample::new(position, height_color(height)));
        }

        cloud
    }

    /// Sample the geometry for a published scan snapshot
    pub fn sample_state<E: Entropy + ?Sized>(&self, state: &ScanState, entropy: &mut E) -> SampledCloud {
        self.sample(state.points_collected, entropy)
    }
}

fn height_color(height: f64) -> [f32; 3] {
    let normalized = (height + 1.5) / 3.0;
    [
        (0.2 + 0.8 * normalized) as f32,
        0.8,
        (0.4 + 0.6 * (1.0 - normalized)) as f32,
    ]
}
