pub mod api;
pub mod composer;
pub mod equalizer;
pub mod error;
pub mod film;
pub mod floatfile;
pub mod geometry;
pub mod manysuns;
pub mod options;
pub mod primitive;
pub mod renderer;
pub mod sampling;
pub mod scanner;
pub mod solar;
pub mod spectrum;
pub mod sundesc;
pub mod template;
pub mod transform;
pub mod view;
