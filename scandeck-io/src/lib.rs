//! I/O operations for scandeck
//! 
//! This crate reads and edits the scanner configuration documents and writes
//! the downloadable artifacts: log transcripts and PLY point cloud exports.

pub mod config;
pub mod editor;
pub mod loader;
pub mod ply;
pub mod transcript;
pub mod error;

pub use config::*;
pub use editor::*;
pub use error::*;
pub use loader::*;
pub use ply::{PlyWriter, POINT_CLOUD_FILE};
pub use transcript::*;

use scandeck_core::{Result, SampledCloud};

/// Trait for writing point clouds to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<std::path::Path>>(cloud: &SampledCloud, path: P) -> Result<()>;
}

/// Auto-detect format and write a sampled point cloud
pub fn write_point_cloud<P: AsRef<std::path::Path>>(cloud: &SampledCloud, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("ply") => ply::PlyWriter::write_point_cloud(cloud, path),
        _ => Err(scandeck_core::Error::Unsupported(
            format!("Unsupported point cloud format: {:?}", path.extension())
        )),
    }
}
