//! The whole conversion from a sun description to the description of
//! many suns. Intermediate artifacts are written into the working
//! folder and stay there (also after a failure), the result is written
//! next to the original description.

// std
use std::fs;
use std::path::{Path, PathBuf};
// manysuns
use crate::core::composer::{write_output, SceneComposer};
use crate::core::equalizer::{Equalization, IrradianceEqualizer};
use crate::core::error::{ManySunsError, Result};
use crate::core::floatfile::write_vectors;
use crate::core::manysuns::Float;
use crate::core::options::PipelineOptions;
use crate::core::renderer::Renderer;
use crate::core::sampling::{SampleGenerator, SampleSet};
use crate::core::solar::SolarPosition;
use crate::core::sundesc::{normalize, SunDescription};
use crate::core::template::TemplateSet;
use crate::core::view::ViewSpec;

/// Generators whose output is a sun description.
const SKY_GENERATORS: [&str; 2] = ["gendaylit", "gensky"];

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ManySunsRun {
    pub output: PathBuf,
    /// Number of mini suns.
    pub count: usize,
    pub position: SolarPosition,
    /// Radiance of each mini sun (per channel factor).
    pub scale: Float,
}

fn write_artifact<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    fs::write(path.as_ref(), text).map_err(|e| ManySunsError::io(path.as_ref(), e))?;
    log::debug!("wrote {:?}", path.as_ref());
    Ok(())
}

/// Replace `!gendaylit ...` and `!gensky ...` lines by their output,
/// if the renderer is able to run them.
pub fn expand_sky_generators<R: Renderer>(renderer: &R, text: &str) -> Result<String> {
    let mut out: String = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed: &str = line.trim_start();
        let program: &str = trimmed
            .trim_start_matches('!')
            .split_whitespace()
            .next()
            .unwrap_or("");
        if trimmed.starts_with('!') && SKY_GENERATORS.contains(&program) {
            if let Some(expanded) = renderer.expand_command(trimmed)? {
                log::info!(
                    "Executed {} to prepare sun description for conversion",
                    program
                );
                out.push_str(expanded.trim_end());
                out.push('\n');
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

/// Convert the sun description `options.sun_description` into many
/// suns and return where the result went.
pub fn generate_many_suns<R: Renderer>(renderer: &R, options: &PipelineOptions) -> Result<ManySunsRun> {
    // templates first, nothing is computed with one of them missing
    let templates: TemplateSet = TemplateSet::load(options)?;
    let r0: Float = options
        .placeholder_radiance()
        .ok_or_else(|| ManySunsError::Template {
            path: templates.paths.many_sun.clone(),
            reason: format!(
                "placeholder radiance '{}' is not a nonzero number",
                options.placeholder_token
            ),
        })?;
    let original: String = fs::read_to_string(&options.sun_description)
        .map_err(|e| ManySunsError::io(&options.sun_description, e))?;
    let text: String = expand_sky_generators(renderer, &original)?;
    let lines: Vec<String> = normalize(&text);
    // sun
    let sun: SunDescription = SunDescription::parse(&lines)?;
    log::info!("Sun description ready for conversion");
    let position: SolarPosition = SolarPosition::from_direction(&sun.direction)?;
    log::info!(
        "Calculated solar altitude of the supplied sun description at {}",
        position.altitude
    );
    log::info!(
        "Calculated solar azimuth of the supplied sun description at {}",
        position.azimuth
    );
    // single sun
    let single: String = templates.single_sun_scene(&sun.radiance);
    write_artifact(options.artifact("001-sun.rad"), &single)?;
    log::info!(
        "Created standard sun 001-sun.rad with RGB Radiance {} (equal to the supplied sun description)",
        sun.radiance
    );
    // samples
    let side: u32 = options.square_side;
    let view: ViewSpec = templates.view_spec()?;
    let samples: SampleSet = SampleGenerator::new(renderer).generate(&single, &view, side)?;
    samples.image.write_hdr(options.artifact(&format!("{}-sun.hdr", side)))?;
    write_vectors(options.artifact(&format!("{}-sun.vec", side)), &samples.directions)?;
    // many suns
    let many_name: String = format!("{}-sun", side);
    let many: String = templates.many_sun_scene(side, &samples.directions);
    log::info!(
        "Used {}.vec and {} to create descriptions of {} suns: {}.rad",
        many_name,
        options.many_sun_template,
        samples.len(),
        many_name
    );
    let equalization: Equalization = IrradianceEqualizer::new(
        renderer,
        options.receiver,
        options.receiver_normal,
    )
    .equalize(
        &single,
        (many_name.as_str(), many.as_str()),
        (options.placeholder_token.as_str(), r0),
    )?;
    write_artifact(options.artifact(&format!("{}.rad", many_name)), &equalization.scene)?;
    // rotate and splice
    let composer = SceneComposer::new(renderer);
    let rotated: String = composer.rotate(&equalization.scene, &position)?;
    write_artifact(options.artifact(&format!("{}_xform.rad", many_name)), &rotated)?;
    let composed: String = SceneComposer::<R>::splice(&lines, &rotated)?;
    let output: PathBuf = options.output_path(samples.len());
    write_output(&output, &composed)?;
    log::info!("Created {:?} with {} mini suns", output, samples.len());
    Ok(ManySunsRun {
        output,
        count: samples.len(),
        position,
        scale: equalization.scale,
    })
}
