//! Options of a many-suns run. The defaults hold the fixed template
//! names, tokens and conventions; the command line only supplies the
//! run inputs.

// std
use std::path::{Path, PathBuf};
// manysuns
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::manysuns::Float;

pub struct PipelineOptions {
    /// Folder with the templates; all intermediate artifacts go here.
    pub folder: PathBuf,
    /// The original sun description (never modified).
    pub sun_description: PathBuf,
    /// Side of the square image the suns are sampled from.
    pub square_side: u32,
    pub single_sun_template: String, // "001-sun_template.rad"
    pub view_template: String,       // "x.vf"
    pub many_sun_template: String,   // "NNN-sun_template.rad"
    pub many_sun_format: String,     // "manysun.fmt"
    pub radiance_tokens: [String; 3], // "RADR", "RADG", "RADB"
    pub count_token: String,          // "NNN"
    /// Arbitrary nonzero radiance used before equalization.
    pub placeholder_token: String, // "1E4"
    pub receiver: Point3f,
    pub receiver_normal: Vector3f,
    pub output_marker: String, // "suns_FNSTATIC"
}

impl Default for PipelineOptions {
    fn default() -> PipelineOptions {
        PipelineOptions {
            folder: PathBuf::from("."),
            sun_description: PathBuf::new(),
            square_side: 32,
            single_sun_template: String::from("001-sun_template.rad"),
            view_template: String::from("x.vf"),
            many_sun_template: String::from("NNN-sun_template.rad"),
            many_sun_format: String::from("manysun.fmt"),
            radiance_tokens: [
                String::from("RADR"),
                String::from("RADG"),
                String::from("RADB"),
            ],
            count_token: String::from("NNN"),
            placeholder_token: String::from("1E4"),
            receiver: Point3f::new(0.0, 0.0, 0.0),
            receiver_normal: Vector3f::new(1.0, 0.0, 0.0),
            output_marker: String::from("suns_FNSTATIC"),
        }
    }
}

impl PipelineOptions {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(folder: P, sun_description: Q, square_side: u32) -> Self {
        PipelineOptions {
            folder: folder.as_ref().to_path_buf(),
            sun_description: sun_description.as_ref().to_path_buf(),
            square_side,
            ..Default::default()
        }
    }
    /// Numeric value of the placeholder radiance token.
    pub fn placeholder_radiance(&self) -> Option<Float> {
        self.placeholder_token
            .parse::<Float>()
            .ok()
            .filter(|v| v.is_finite() && *v != 0.0)
    }
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.folder.join(name)
    }
    /// Output path: `<stem>-<count>-<marker>.rad` next to the original.
    pub fn output_path(&self, count: usize) -> PathBuf {
        let stem: String = self
            .sun_description
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("sun"));
        let name: String = format!("{}-{}-{}.rad", stem, count, self.output_marker);
        match self.sun_description.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn output_sits_next_to_original() {
        let options = PipelineOptions::new("/templates", "/skies/june21.rad", 32);
        assert_eq!(
            options.output_path(632),
            PathBuf::from("/skies/june21-632-suns_FNSTATIC.rad")
        );
        assert_eq!(options.artifact("x.vf"), PathBuf::from("/templates/x.vf"));
    }

    #[test]
    fn placeholder_must_be_a_nonzero_number() {
        let mut options = PipelineOptions::default();
        assert_eq!(options.placeholder_radiance(), Some(1.0e4));
        options.placeholder_token = String::from("0");
        assert_eq!(options.placeholder_radiance(), None);
        options.placeholder_token = String::from("RAD");
        assert_eq!(options.placeholder_radiance(), None);
    }
}
