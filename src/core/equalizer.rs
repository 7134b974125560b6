//! Scale the radiance of the many suns so they deliver the irradiance
//! of the single sun.
//!
//! Both scenes are probed in their canonical (unrotated) orientation
//! at the same receiver. The many suns are set up with an arbitrary
//! placeholder radiance `R0`, the scale then is
//!
//! ```text
//! S = R0 * I1 / IN
//! ```
//!
//! where `I1` and `IN` are the weighted irradiance values of the single
//! and the many suns.

// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::manysuns::{Float, Spectrum};
use crate::core::renderer::Renderer;

/// Radiance of each mini sun, a pure function of the two weighted
/// irradiance values and the placeholder radiance.
pub fn radiance_scale(single: Float, many: Float, placeholder: Float) -> Result<Float> {
    if !(single > 0.0 as Float) || !(many > 0.0 as Float) || !single.is_finite() || !many.is_finite() {
        return Err(ManySunsError::Division { single, many });
    }
    let scale: Float = placeholder * single / many;
    if !scale.is_finite() || !(scale > 0.0 as Float) {
        return Err(ManySunsError::Division { single, many });
    }
    Ok(scale)
}

/// Replace every whitespace separated occurrence of `token` by
/// `value`; whitespace and all other text stay untouched. Returns the
/// new text and the number of replacements.
pub fn replace_token(text: &str, token: &str, value: &str) -> (String, usize) {
    let mut out: String = String::with_capacity(text.len());
    let mut count: usize = 0;
    let mut word_start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                count += push_word(&mut out, &text[start..i], token, value);
            }
            out.push(c);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        count += push_word(&mut out, &text[start..], token, value);
    }
    (out, count)
}

fn push_word(out: &mut String, word: &str, token: &str, value: &str) -> usize {
    if word == token {
        out.push_str(value);
        1
    } else {
        out.push_str(word);
        0
    }
}

#[derive(Debug, Clone)]
pub struct Equalization {
    pub single: Spectrum,
    pub many: Spectrum,
    pub scale: Float,
    /// The many suns scene with the placeholder replaced by `scale`.
    pub scene: String,
    pub replaced: usize,
}

pub struct IrradianceEqualizer<'a, R: Renderer> {
    renderer: &'a R,
    receiver: Point3f,
    normal: Vector3f,
}

impl<'a, R: Renderer> IrradianceEqualizer<'a, R> {
    pub fn new(renderer: &'a R, receiver: Point3f, normal: Vector3f) -> Self {
        IrradianceEqualizer {
            renderer,
            receiver,
            normal,
        }
    }
    fn probe(&self, name: &str, scene: &str) -> Result<Spectrum> {
        let compiled = self.renderer.compile(name, scene)?;
        self.renderer
            .probe_irradiance(&compiled, &self.receiver, &self.normal)
    }
    /// Probe both scenes (concurrently) and scale the placeholder of
    /// the many suns.
    pub fn equalize(
        &self,
        single_sun: &str,
        many_sun: (&str, &str),
        placeholder: (&str, Float),
    ) -> Result<Equalization> {
        let (many_name, many_scene) = many_sun;
        let (token, r0) = placeholder;
        let (single, many) = rayon::join(
            || self.probe("001-sun", single_sun),
            || self.probe(many_name, many_scene),
        );
        let single: Spectrum = single?;
        let many: Spectrum = many?;
        log::info!(
            "Irradiance of standard sun (001-sun.rad) calculated at: {} W/m2",
            single.weighted()
        );
        log::info!(
            "Irradiance of many suns ({}.rad) calculated at: {} W/m2",
            many_name,
            many.weighted()
        );
        let scale: Float = radiance_scale(single.weighted(), many.weighted(), r0)?;
        let (scene, replaced) = replace_token(many_scene, token, &scale.to_string());
        if replaced == 0 {
            return Err(ManySunsError::Compile(format!(
                "placeholder radiance '{}' not found in {}",
                token, many_name
            )));
        }
        log::info!(
            "Set Radiance in {}.rad at {} to achieve equal irradiance",
            many_name,
            scale
        );
        Ok(Equalization {
            single,
            many,
            scale,
            scene,
            replaced,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::renderers::native::NativeRenderer;
    use approx::assert_relative_eq;

    #[test]
    fn scale_is_pure_and_linear() {
        let s: Float = radiance_scale(3.0, 12.0, 1.0e4).unwrap();
        assert_eq!(s, 2500.0);
        assert_eq!(radiance_scale(3.0, 12.0, 1.0e4).unwrap(), s);
        assert_relative_eq!(radiance_scale(6.0, 12.0, 1.0e4).unwrap(), 2.0 * s);
        assert_relative_eq!(radiance_scale(3.0, 24.0, 1.0e4).unwrap(), 0.5 * s);
    }

    #[test]
    fn degenerate_irradiance() {
        assert!(matches!(
            radiance_scale(3.0, 0.0, 1.0e4),
            Err(ManySunsError::Division { .. })
        ));
        assert!(radiance_scale(3.0, -1.0, 1.0e4).is_err());
        assert!(radiance_scale(0.0, 1.0, 1.0e4).is_err());
        assert!(radiance_scale(Float::NAN, 1.0, 1.0e4).is_err());
    }

    #[test]
    fn whole_tokens_only() {
        let (text, n) = replace_token("3 1E4 1E4\t1E4\n# 1E40 x1E4\n1E4", "1E4", "7.5");
        assert_eq!(text, "3 7.5 7.5\t7.5\n# 1E40 x1E4\n7.5");
        assert_eq!(n, 4);
    }

    #[test]
    fn equalized_suns_match_the_single_sun() {
        let renderer = NativeRenderer::new();
        let equalizer = IrradianceEqualizer::new(
            &renderer,
            Point3f::default(),
            Vector3f::new(1.0, 0.0, 0.0),
        );
        let single = "void light solar 0 0 3 5 5 5\nsolar source sun 0 0 4 1 0 0 0.533\n";
        let many = "void light solar 0 0 3 1E4 1E4 1E4\n\
                    solar source s1 0 0 4 1 0.001 0 0.1\n\
                    solar source s2 0 0 4 1 -0.001 0 0.1\n";
        let eq = equalizer.equalize(single, ("2-sun", many), ("1E4", 1.0e4)).unwrap();
        assert_eq!(eq.replaced, 3);
        assert!(eq.scale > 0.0);
        let check = renderer.compile("check", &eq.scene).unwrap();
        let e = renderer
            .probe_irradiance(&check, &Point3f::default(), &Vector3f::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(e.weighted(), eq.single.weighted(), max_relative = 1e-9);
    }

    #[test]
    fn dark_scene_can_not_be_equalized() {
        let renderer = NativeRenderer::new();
        let equalizer = IrradianceEqualizer::new(
            &renderer,
            Point3f::default(),
            Vector3f::new(1.0, 0.0, 0.0),
        );
        let single = "void light solar 0 0 3 5 5 5\nsolar source sun 0 0 4 1 0 0 0.533\n";
        // the many suns shine from behind the receiver
        let many = "void light solar 0 0 3 1E4 1E4 1E4\nsolar source s1 0 0 4 -1 0 0 0.1\n";
        assert!(matches!(
            equalizer.equalize(single, ("1-sun", many), ("1E4", 1.0e4)),
            Err(ManySunsError::Division { .. })
        ));
    }
}
