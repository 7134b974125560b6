//! Extract the sun from a Radiance sky description.
//!
//! Sky generators like `gendaylit` and `gensky` describe the sun as a
//! `light` material called `solar` and a distant `source` called `sun`:
//!
//! ```text
//! void light solar
//! 0
//! 0
//! 3 6.9e+06 6.9e+06 6.9e+06
//!
//! solar source sun
//! 0
//! 0
//! 4 -0.60 -0.52 0.60 0.533
//! ```
//!
//! The description is read once and normalized in memory, the input
//! file itself is never touched.

// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::Vector3f;
use crate::core::manysuns::{Float, Spectrum, SOLAR_OPENING_ANGLE};
use crate::core::primitive::Primitive;
use crate::core::scanner::{Block, BlockScanner};

pub const LIGHT_KEYWORD: &str = "void light solar";
pub const SOURCE_KEYWORD: &str = "solar source sun";

/// Trim every line, collapse the whitespace of lines carrying one of
/// the sun keywords. Nothing else is changed.
pub fn normalize(text: &str) -> Vec<String> {
    let light: Vec<&str> = LIGHT_KEYWORD.split_whitespace().collect();
    let source: Vec<&str> = SOURCE_KEYWORD.split_whitespace().collect();
    text.lines()
        .map(|line| {
            if contains_words(line, &light) || contains_words(line, &source) {
                line.split_whitespace().collect::<Vec<&str>>().join(" ")
            } else {
                line.trim().to_string()
            }
        })
        .collect()
}

fn contains_words(line: &str, keyword: &[&str]) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    words.windows(keyword.len()).any(|w| w == keyword)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunDescription {
    /// Radiance of the `solar` light material.
    pub radiance: Spectrum,
    /// Direction towards the sun as given (not normalized).
    pub direction: Vector3f,
    /// Full opening angle in degrees.
    pub opening_angle: Float,
    pub light_block: Block,
    pub source_block: Block,
}

impl SunDescription {
    /// Parse normalized lines. Both blocks have to be present and carry
    /// at least three real arguments each.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<SunDescription> {
        let light_block: Option<Block> = BlockScanner::scan(LIGHT_KEYWORD, lines);
        let source_block: Option<Block> = BlockScanner::scan(SOURCE_KEYWORD, lines);
        let (light_block, source_block) = match (light_block, source_block) {
            (Some(l), Some(s)) => (l, s),
            (l, s) => {
                let mut msg: String = String::from("sun description is incomplete.");
                if l.is_none() {
                    msg.push_str(" 'void light solar' not found.");
                }
                if s.is_none() {
                    msg.push_str(" 'solar source sun' not found.");
                }
                return Err(ManySunsError::Parse(msg));
            }
        };
        let light: Vec<Float> = block_reals(&light_block, LIGHT_KEYWORD)?;
        let radiance: Spectrum = Spectrum::from_tail(&light).ok_or_else(|| {
            ManySunsError::Parse(format!(
                "'{}' needs 3 radiance values, found {}",
                LIGHT_KEYWORD,
                light.len()
            ))
        })?;
        let source: Vec<Float> = block_reals(&source_block, SOURCE_KEYWORD)?;
        let direction: Vector3f = Vector3f::from_slice(&source).ok_or_else(|| {
            ManySunsError::Parse(format!(
                "'{}' needs 3 direction values, found {}",
                SOURCE_KEYWORD,
                source.len()
            ))
        })?;
        if direction.has_nans() || direction.length_squared() == 0.0 as Float {
            return Err(ManySunsError::Parse(format!(
                "sun direction ({}) is not a direction",
                direction
            )));
        }
        if radiance.has_nans() {
            return Err(ManySunsError::Parse(format!(
                "sun radiance ({}) is not a number",
                radiance
            )));
        }
        if let Some(angle) = source.get(3) {
            if (angle - SOLAR_OPENING_ANGLE).abs() > 1.0e-6 {
                log::warn!(
                    "sun opening angle {} in description, assuming {}",
                    angle,
                    SOLAR_OPENING_ANGLE
                );
            }
        }
        log::info!(
            "Sun radiance (RGB) of the supplied sun description found at: {}",
            radiance
        );
        log::info!(
            "Sun direction vector (XYZ) of the supplied sun description found at: {}",
            direction
        );
        Ok(SunDescription {
            radiance,
            direction,
            opening_angle: SOLAR_OPENING_ANGLE,
            light_block,
            source_block,
        })
    }
}

/// Real arguments of a sun block. A block whose argument counts do not
/// add up falls back to the numbers on its last line, after the count.
fn block_reals(block: &Block, keyword: &str) -> Result<Vec<Float>> {
    match Primitive::from_words(&block.words()) {
        Ok((p, _)) => Ok(p.reals),
        Err(e) => {
            let mut words: Vec<&str> = block.last_line().split_whitespace().collect();
            if block.lines.len() == 1 {
                // one line layout, the keyword is on the last line
                let skip: usize = keyword.split_whitespace().count().min(words.len());
                words = words.split_off(skip);
            }
            let reals: Vec<Float> = words
                .iter()
                .skip(1)
                .filter_map(|w| w.parse::<Float>().ok())
                .collect();
            if reals.len() < 3 {
                return Err(ManySunsError::Parse(format!(
                    "'{}' block (line {}): {}",
                    keyword,
                    block.start + 1,
                    e
                )));
            }
            log::warn!(
                "'{}' block (line {}): {}, using the numbers of its last line",
                keyword,
                block.start + 1,
                e
            );
            Ok(reals)
        }
    }
}
