//! Point types and related functionality

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// Linear RGB color with components in `[0, 1]`
pub type Color3f = [f32; 3];

/// One synthetic sensor reading: a position and the color it is drawn with.
///
/// Samples are derived from the number of collected points every time
/// geometry is requested and are never stored by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct PointSample {
    pub position: Point3f,
    pub color: Color3f,
}

unsafe impl Pod for PointSample {}
unsafe impl Zeroable for PointSample {}

impl PointSample {
    pub fn new(position: Point3f, color: Color3f) -> Self {
        Self { position, color }
    }

    /// Color quantized to 8 bits per channel, as written to PLY files
    pub fn color_u8(&self) -> [u8; 3] {
        self.color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for PointSample {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl From<PointSample> for Point3f {
    fn from(sample: PointSample) -> Self {
        sample.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_quantization() {
        let sample = PointSample::new(Point3f::origin(), [0.0, 0.8, 1.0]);
        assert_eq!(sample.color_u8(), [0, 204, 255]);
    }

    #[test]
    fn test_color_quantization_clamps() {
        let sample = PointSample::new(Point3f::origin(), [-0.5, 1.5, 0.5]);
        assert_eq!(sample.color_u8(), [0, 255, 128]);
    }
}
