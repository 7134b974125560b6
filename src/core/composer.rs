//! Put the many suns where the single sun was.
//!
//! The mini suns are generated around +X, so they are first tilted up
//! by the altitude (about Y) and then turned by the azimuth plus the
//! fixed [AZIMUTH_OFFSET] (about Z). The rotated text replaces the span
//! from the first line of the `void light solar` block to the last
//! line of the `solar source sun` block; every other line of the
//! description is kept as it is.

// std
use std::fs;
use std::path::{Path, PathBuf};
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::manysuns::{Float, AZIMUTH_OFFSET};
use crate::core::renderer::Renderer;
use crate::core::scanner::{Block, BlockScanner};
use crate::core::solar::SolarPosition;
use crate::core::sundesc::{LIGHT_KEYWORD, SOURCE_KEYWORD};

/// Rotation angles (degrees) about Y and Z for a solar position.
pub fn rotation_angles(position: &SolarPosition) -> (Float, Float) {
    (-position.altitude, -(position.azimuth + AZIMUTH_OFFSET))
}

pub struct SceneComposer<'a, R: Renderer> {
    renderer: &'a R,
}

impl<'a, R: Renderer> SceneComposer<'a, R> {
    pub fn new(renderer: &'a R) -> Self {
        SceneComposer { renderer }
    }
    pub fn rotate(&self, scene: &str, position: &SolarPosition) -> Result<String> {
        let (ry, rz) = rotation_angles(position);
        let rotated: String = self.renderer.rotate(scene, ry, rz)?;
        log::info!(
            "Changed the sun location to altitude: {}, azimuth: {} degrees",
            position.altitude,
            position.azimuth
        );
        Ok(rotated)
    }
    /// Replace the sun blocks of the normalized `lines` by `rotated`.
    pub fn splice<S: AsRef<str>>(lines: &[S], rotated: &str) -> Result<String> {
        let light: Block = BlockScanner::scan(LIGHT_KEYWORD, lines)
            .ok_or_else(|| ManySunsError::Splice(format!("'{}' block not found", LIGHT_KEYWORD)))?;
        let source: Block = BlockScanner::scan(SOURCE_KEYWORD, lines)
            .ok_or_else(|| ManySunsError::Splice(format!("'{}' block not found", SOURCE_KEYWORD)))?;
        if source.end < light.start {
            return Err(ManySunsError::Splice(format!(
                "'{}' (line {}) ends before '{}' (line {}) starts",
                SOURCE_KEYWORD,
                source.end + 1,
                LIGHT_KEYWORD,
                light.start + 1
            )));
        }
        let mut out: String = String::new();
        for line in &lines[..light.start] {
            out.push_str(line.as_ref());
            out.push('\n');
        }
        out.push_str(rotated.trim_end_matches('\n'));
        out.push('\n');
        for line in &lines[source.end + 1..] {
            out.push_str(line.as_ref());
            out.push('\n');
        }
        log::debug!(
            "replaced lines {} to {} by the many suns",
            light.start + 1,
            source.end + 1
        );
        Ok(out)
    }
}

/// Write `text` to a temporary sibling first and rename it, so a
/// failing write never leaves a partial output behind.
pub fn write_output<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path: &Path = path.as_ref();
    let file_name: String = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ManySunsError::Splice(format!("{:?} is not a file path", path)))?;
    let tmp: PathBuf = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp, text).map_err(|e| ManySunsError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ManySunsError::io(path, e));
    }
    Ok(())
}
