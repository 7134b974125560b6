//! The four templates a run depends on, all kept in the working
//! folder:
//!
//! * `001-sun_template.rad`: a single sun along +X with the radiance
//!   tokens `RADR`, `RADG` and `RADB`,
//! * `x.vf`: the view looking at that sun,
//! * `NNN-sun_template.rad`: the many suns, `NNN` stands for the
//!   square side and `1E4` for the placeholder radiance,
//! * `manysun.fmt`: one mini sun, with the fields `${x}`, `${y}`,
//!   `${z}` (direction) and `${n}` (1-based index).
//!
//! The many-suns template pulls in the generation template through a
//! generator line naming it (e.g. `!rcalc -o manysun.fmt NNN-sun.vec`).
//! That line is replaced by the materialised blocks.

// std
use std::fs;
use std::path::PathBuf;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::Vector3f;
use crate::core::manysuns::Spectrum;
use crate::core::options::PipelineOptions;
use crate::core::view::ViewSpec;

pub struct TemplatePaths {
    pub single_sun: PathBuf,
    pub view: PathBuf,
    pub many_sun: PathBuf,
    pub many_sun_format: PathBuf,
}

impl TemplatePaths {
    /// Check that every template exists, report all missing ones.
    pub fn locate(options: &PipelineOptions) -> Result<TemplatePaths> {
        log::info!("Looking for template files in {:?}", options.folder);
        let paths = TemplatePaths {
            single_sun: options.artifact(&options.single_sun_template),
            view: options.artifact(&options.view_template),
            many_sun: options.artifact(&options.many_sun_template),
            many_sun_format: options.artifact(&options.many_sun_format),
        };
        let missing: Vec<PathBuf> = paths
            .all()
            .iter()
            .filter(|p| !p.is_file())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ManySunsError::TemplateMissing(missing));
        }
        log::info!("All templates found.");
        Ok(paths)
    }
    fn all(&self) -> Vec<PathBuf> {
        vec![
            self.single_sun.clone(),
            self.view.clone(),
            self.many_sun.clone(),
            self.many_sun_format.clone(),
        ]
    }
}

pub struct TemplateSet {
    pub paths: TemplatePaths,
    pub single_sun: String,
    pub view: String,
    pub many_sun: String,
    pub many_sun_format: String,
    radiance_tokens: [String; 3],
    count_token: String,
}

impl TemplateSet {
    pub fn load(options: &PipelineOptions) -> Result<TemplateSet> {
        let paths: TemplatePaths = TemplatePaths::locate(options)?;
        let read = |p: &PathBuf| fs::read_to_string(p).map_err(|e| ManySunsError::io(p, e));
        let single_sun: String = read(&paths.single_sun)?;
        let view: String = read(&paths.view)?;
        let many_sun: String = read(&paths.many_sun)?;
        let many_sun_format: String = read(&paths.many_sun_format)?;
        for token in &options.radiance_tokens {
            if !single_sun.contains(token.as_str()) {
                return Err(ManySunsError::Template {
                    path: paths.single_sun.clone(),
                    reason: format!("radiance token '{}' not found", token),
                });
            }
        }
        let placeholder: &str = options.placeholder_token.as_str();
        if !contains_token(&many_sun, placeholder) && !contains_token(&many_sun_format, placeholder) {
            return Err(ManySunsError::Template {
                path: paths.many_sun.clone(),
                reason: format!("placeholder radiance '{}' not found", placeholder),
            });
        }
        Ok(TemplateSet {
            paths,
            single_sun,
            view,
            many_sun,
            many_sun_format,
            radiance_tokens: options.radiance_tokens.clone(),
            count_token: options.count_token.clone(),
        })
    }
    /// The view options; a malformed view file can not be rendered.
    pub fn view_spec(&self) -> Result<ViewSpec> {
        ViewSpec::parse(&self.view)
            .map_err(|e| ManySunsError::Render(format!("view {:?}: {}", self.paths.view, e)))
    }
    /// The single sun carrying the given radiance.
    pub fn single_sun_scene(&self, radiance: &Spectrum) -> String {
        let mut scene: String = self.single_sun.clone();
        for (token, value) in self.radiance_tokens.iter().zip(radiance.c.iter()) {
            scene = scene.replace(token.as_str(), &value.to_string());
        }
        scene
    }
    /// The many suns for square side `side`, one block per sample.
    pub fn many_sun_scene(&self, side: u32, samples: &[Vector3f]) -> String {
        let side_text: String = side.to_string();
        let scene: String = self.many_sun.replace(self.count_token.as_str(), &side_text);
        let mut blocks: String = String::new();
        for (i, d) in samples.iter().enumerate() {
            let block: String = self
                .many_sun_format
                .replace(self.count_token.as_str(), &side_text)
                .replace("${x}", &d.x.to_string())
                .replace("${y}", &d.y.to_string())
                .replace("${z}", &d.z.to_string())
                .replace("${n}", &(i + 1).to_string());
            blocks.push_str(block.trim_end());
            blocks.push('\n');
        }
        let format_name: &str = self
            .paths
            .many_sun_format
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        let mut out: String = String::new();
        let mut expanded: bool = false;
        for line in scene.lines() {
            if line.trim_start().starts_with('!') && !format_name.is_empty() && line.contains(format_name) {
                out.push_str(&blocks);
                expanded = true;
            } else {
                out.push_str(line);
                out.push('\n');
            }
        }
        if !expanded {
            out.push('\n');
            out.push_str(&blocks);
        }
        out
    }
}

/// Is `token` present as a whitespace separated word?
pub fn contains_token(text: &str, token: &str) -> bool {
    text.split_whitespace().any(|w| w == token)
}
