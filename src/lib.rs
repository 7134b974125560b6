//! # manysuns
//!
//! [Rust][rust] crate to replace the single sun of a [Radiance][radiance]
//! sky description by many small suns. A point-like distant source is
//! fine for most lighting simulations, but algorithms which sample
//! sources as true points produce hard, aliased shadows. Splitting the
//! solar disk (0.533 degrees) into *N* mini suns fixes that while keeping
//! the irradiance of the original description.
//!
//! The pipeline (see [generate_many_suns]) has five stages:
//!
//! 1. [parse][sundesc] the sun description (radiance and direction),
//! 2. compute the [solar position][solar] (altitude and azimuth),
//! 3. render the canonical sun and turn covered pixels into
//!    [direction samples][sampling],
//! 4. [equalize][equalizer] the irradiance of the many suns against the
//!    single sun,
//! 5. rotate the many suns into place and [splice][composer] them into a
//!    copy of the original description.
//!
//! All rendering goes through the [Renderer][renderer] trait. There is a
//! [native][native] in-process backend and a [subprocess][radiance]
//! backend driving the Radiance toolchain.
//!
//! [rust]: https://www.rust-lang.org
//! [radiance]: https://www.radiance-online.org
//! [generate_many_suns]: core/api/fn.generate_many_suns.html
//! [sundesc]: core/sundesc/index.html
//! [solar]: core/solar/index.html
//! [sampling]: core/sampling/index.html
//! [equalizer]: core/equalizer/index.html
//! [composer]: core/composer/index.html
//! [renderer]: core/renderer/trait.Renderer.html
//! [native]: renderers/native/index.html
//! [radiance]: renderers/radiance/index.html

#[macro_use]
extern crate impl_ops;

pub mod core;
pub mod renderers;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
