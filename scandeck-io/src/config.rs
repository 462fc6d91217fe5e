//! Scanner configuration documents
//!
//! A configuration is five fixed categories of numeric and boolean fields,
//! stored as camelCase JSON. Missing fields take their built-in defaults, so a
//! partial document is still a valid document.

use scandeck_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Distance sensing and sweep parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerSettings {
    /// Points per degree of sweep
    pub resolution: f64,
    /// Sweep rate in Hz
    pub scan_speed: f64,
    /// Closest measurable distance in metres
    pub range_min: f64,
    /// Farthest measurable distance in metres
    pub range_max: f64,
    pub auto_calibrate: bool,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            resolution: 0.5,
            scan_speed: 10.0,
            range_min: 0.1,
            range_max: 30.0,
            auto_calibrate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaserSettings {
    /// Output power in percent
    pub power: f64,
    /// Wavelength in nm
    pub wavelength: f64,
    /// Pulse frequency in kHz
    pub pulse_frequency: f64,
    pub safety_lock: bool,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            power: 75.0,
            wavelength: 905.0,
            pulse_frequency: 20.0,
            safety_lock: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotorSettings {
    /// Rotation speed in rpm
    pub speed: f64,
    pub acceleration: f64,
    /// Step size in degrees
    pub step_angle: f64,
    pub home_on_start: bool,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            speed: 600.0,
            acceleration: 50.0,
            step_angle: 1.8,
            home_on_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraSettings {
    /// Exposure time in ms
    pub exposure: f64,
    pub gain: f64,
    /// Color temperature in kelvin
    pub white_balance: f64,
    pub auto_focus: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            exposure: 10.0,
            gain: 1.0,
            white_balance: 5500.0,
            auto_focus: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingSettings {
    pub noise_filter: bool,
    /// Smoothing strength in `[0, 1]`
    pub smoothing: f64,
    /// Downsampling voxel edge in metres
    pub voxel_size: f64,
    pub outlier_removal: bool,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            noise_filter: true,
            smoothing: 0.5,
            voxel_size: 0.01,
            outlier_removal: true,
        }
    }
}

/// A complete scanner configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub scanner: ScannerSettings,
    pub laser: LaserSettings,
    pub motor: MotorSettings,
    pub camera: CameraSettings,
    pub processing: ProcessingSettings,
}

impl ScannerConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Render as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Check that every field lies in its physical range
    pub fn validate(&self) -> Result<()> {
        let s = &self.scanner;
        check(s.resolution > 0.0, "scanner.resolution must be positive")?;
        check(s.scan_speed > 0.0, "scanner.scanSpeed must be positive")?;
        check(s.range_min >= 0.0, "scanner.rangeMin must not be negative")?;
        check(s.range_min < s.range_max, "scanner.rangeMin must be below scanner.rangeMax")?;

        let l = &self.laser;
        check((0.0..=100.0).contains(&l.power), "laser.power must be within 0..=100")?;
        check(l.wavelength > 0.0, "laser.wavelength must be positive")?;
        check(l.pulse_frequency > 0.0, "laser.pulseFrequency must be positive")?;

        let m = &self.motor;
        check(m.speed > 0.0, "motor.speed must be positive")?;
        check(m.acceleration > 0.0, "motor.acceleration must be positive")?;
        check(m.step_angle > 0.0 && m.step_angle <= 360.0, "motor.stepAngle must be within (0, 360]")?;

        let c = &self.camera;
        check(c.exposure > 0.0, "camera.exposure must be positive")?;
        check(c.gain >= 0.0, "camera.gain must not be negative")?;
        check(
            (1000.0..=12000.0).contains(&c.white_balance),
            "camera.whiteBalance must be within 1000..=12000",
        )?;

        let p = &self.processing;
        check((0.0..=1.0).contains(&p.smoothing), "processing.smoothing must be within 0..=1")?;
        check(p.voxel_size > 0.0, "processing.voxelSize must be positive")?;
        Ok(())
    }
}

fn check(ok: bool, message: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(message.to_string()))
    }
}
