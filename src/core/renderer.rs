//! The rendering collaborator. Everything the pipeline needs from a
//! lighting simulation goes through this trait: compiling scene text,
//! rendering the canonical sun, tracing pixel directions, probing
//! irradiance and rotating scene text.

// others
use strum_macros::{Display, EnumString};
// manysuns
use crate::core::error::Result;
use crate::core::film::Image;
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::manysuns::{Float, Spectrum};
use crate::core::view::ViewSpec;

/// A traced pixel: the direction of its ray and whether the sun disk
/// covers it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelRay {
    pub direction: Vector3f,
    pub covered: bool,
}

pub trait Renderer: Send + Sync {
    /// Whatever form the backend traces against.
    type Compiled: Send + Sync;

    /// Compile scene text; `name` identifies the scene (e.g. `001-sun`).
    fn compile(&self, name: &str, scene: &str) -> Result<Self::Compiled>;
    /// Render a `side` x `side` image.
    fn render_image(&self, compiled: &Self::Compiled, view: &ViewSpec, side: u32) -> Result<Image>;
    /// One ray per pixel in raster order.
    fn trace_pixel_directions(&self, compiled: &Self::Compiled, image: &Image) -> Result<Vec<PixelRay>>;
    /// RGB irradiance at `point` for a surface facing `normal`.
    fn probe_irradiance(&self, compiled: &Self::Compiled, point: &Point3f, normal: &Vector3f) -> Result<Spectrum>;
    /// Rotate scene text about Y by `ry`, then about Z by `rz` degrees.
    fn rotate(&self, scene: &str, ry: Float, rz: Float) -> Result<String>;
    /// Expand a generator command (`!gendaylit ...`) into scene text.
    /// Backends which can not run generators return `None` and the
    /// command stays as it is.
    fn expand_command(&self, _command: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RendererKind {
    /// In-process renderer.
    Native,
    /// The Radiance command line tools.
    Radiance,
}
