//! PLY export
//!
//! Two artifacts are produced: a header-only placeholder that only announces
//! the collected point count, and a full ASCII cloud with per-vertex colors.

use crate::PointCloudWriter;
use ply_rs::{
    ply::{Addable, DefaultElement, ElementDef, Ply, Property, PropertyDef, PropertyType, ScalarType},
    writer::Writer,
};
use scandeck_core::{Result, SampledCloud};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Suggested download name for point cloud exports
pub const POINT_CLOUD_FILE: &str = "point_cloud.ply";

const GENERATOR_COMMENT: &str = "generated by scandeck";

pub struct PlyWriter;

impl PlyWriter {
    /// Header-only PLY declaring `points_collected` vertices and no payload
    pub fn placeholder(points_collected: u64) -> Result<String> {
        let mut ply = Ply::<DefaultElement>::new();
        ply.header.comments.push(GENERATOR_COMMENT.to_string());
        ply.header.comments.push("placeholder export, vertex data omitted".to_string());

        let mut vertex = position_element();
        vertex.count = usize::try_from(points_collected).unwrap_or(usize::MAX);
        ply.header.elements.add(vertex);

        let mut out = Vec::new();
        Writer::<DefaultElement>::new().write_header(&mut out, &ply.header)?;
        into_text(out)
    }

    /// Write the header-only placeholder to `path`
    pub fn write_placeholder<P: AsRef<Path>>(points_collected: u64, path: P) -> Result<()> {
        let text = Self::placeholder(points_collected)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Full ASCII PLY with positions and 8-bit colors
    pub fn to_ascii(cloud: &SampledCloud) -> Result<String> {
        let mut ply = Ply::<DefaultElement>::new();
        ply.header.comments.push(GENERATOR_COMMENT.to_string());

        let mut vertex_element = position_element();
        vertex_element.count = cloud.len();
        for channel in ["red", "green", "blue"] {
            vertex_element.properties.add(PropertyDef::new(
                channel.to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }
        ply.header.elements.add(vertex_element);

        let mut vertices = Vec::with_capacity(cloud.len());
        for sample in cloud {
            let [r, g, b] = sample.color_u8();
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(sample.position.x));
            vertex.insert("y".to_string(), Property::Float(sample.position.y));
            vertex.insert("z".to_string(), Property::Float(sample.position.z));
            vertex.insert("red".to_string(), Property::UChar(r));
            vertex.insert("green".to_string(), Property::UChar(g));
            vertex.insert("blue".to_string(), Property::UChar(b));
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        let mut out = Vec::new();
        Writer::new().write_ply(&mut out, &mut ply)?;
        into_text(out)
    }
}

impl PointCloudWriter for PlyWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &SampledCloud, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = Self::to_ascii(cloud)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        debug!(path = %path.display(), points = cloud.len(), "point cloud written");
        Ok(())
    }
}

fn position_element() -> ElementDef {
    let mut element = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        element.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    element
}

fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| scandeck_core::Error::InvalidData(e.to_string()))
}
