//! Errors of the many-suns pipeline. Every stage aborts the run on
//! the first failure, nothing is retried.

// std
use std::path::{Path, PathBuf};
// others
use thiserror::Error;
// manysuns
use crate::core::manysuns::Float;

pub type Result<T> = std::result::Result<T, ManySunsError>;

#[derive(Error, Debug)]
pub enum ManySunsError {
    #[error("missing template(s): {}", list_paths(.0))]
    TemplateMissing(Vec<PathBuf>),
    #[error("template {path:?} is unusable: {reason}")]
    Template { path: PathBuf, reason: String },
    /// Malformed scene or view text, wrapped with context by the caller.
    #[error("{0}")]
    Syntax(String),
    #[error("sun description: {0}")]
    Parse(String),
    #[error("compile failed: {0}")]
    Compile(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("degenerate irradiance (single sun: {single}, many suns: {many}), check scene and templates")]
    Division { single: Float, many: Float },
    #[error("splice failed: {0}")]
    Splice(String),
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl ManySunsError {
    /// Attach the artifact path to an I/O error.
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        ManySunsError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
