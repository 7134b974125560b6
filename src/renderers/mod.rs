//! Implementations of the **Renderer** trait.
//!
//! - NativeRenderer
//! - RadianceRenderer
//!
//! ## Native Renderer
//!
//! **NativeRenderer** runs in process and knows nothing but distant
//! sources (`source` primitives modified by `light` or `glow`). That
//! is enough for sky descriptions and the sun templates, the results
//! are deterministic and no external programs are needed.
//!
//! ```rust
//! use manysuns::core::geometry::{Point3f, Vector3f};
//! use manysuns::core::renderer::Renderer;
//! use manysuns::renderers::native::NativeRenderer;
//!
//! let renderer = NativeRenderer::new();
//! let sun = renderer
//!     .compile("001-sun", "void light solar 0 0 3 1 1 1\nsolar source sun 0 0 4 1 0 0 0.533\n")
//!     .unwrap();
//! let e = renderer
//!     .probe_irradiance(&sun, &Point3f::default(), &Vector3f::new(1.0, 0.0, 0.0))
//!     .unwrap();
//! assert!(e.weighted() > 0.0);
//! ```
//!
//! ## Radiance Renderer
//!
//! **RadianceRenderer** calls `oconv`, `rpict`, `vwrays`, `rtrace` and
//! `xform` in the working folder. The programs have to be on the
//! `PATH`.

pub mod native;
pub mod radiance;
