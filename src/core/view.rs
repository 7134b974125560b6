//! Radiance view options as read from a view file (`rview -vf`):
//!
//! ```text
//! rview -vtv -vp 0 0 0 -vd 1 0 0 -vu 0 0 1 -vh 0.6 -vv 0.6 -vs 0 -vl 0
//! ```
//!
//! Only perspective views (`-vtv`) can be turned into pixel rays.

// std
use std::fmt;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::{vec3_cross_vec3, Point3f, Vector3f};
use crate::core::manysuns::{radians, Float};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    /// View type character (`v` perspective, `l` parallel, ...).
    pub vtype: char,
    pub vp: Point3f,
    pub vd: Vector3f,
    pub vu: Vector3f,
    /// Horizontal and vertical view size in degrees.
    pub vh: Float,
    pub vv: Float,
    /// View shift and lift in units of the view size.
    pub vs: Float,
    pub vl: Float,
}

impl Default for ViewSpec {
    fn default() -> Self {
        ViewSpec {
            vtype: 'v',
            vp: Point3f::new(0.0, 0.0, 0.0),
            vd: Vector3f::new(0.0, 1.0, 0.0),
            vu: Vector3f::new(0.0, 0.0, 1.0),
            vh: 45.0,
            vv: 45.0,
            vs: 0.0,
            vl: 0.0,
        }
    }
}

impl ViewSpec {
    /// Parse view options; a leading program name (`rview`, `rvu`,
    /// `rpict`) and unknown non-view options are skipped.
    pub fn parse(text: &str) -> Result<ViewSpec> {
        let words: Vec<&str> = text
            .lines()
            .filter(|l| !l.trim_start().starts_with('#'))
            .flat_map(|l| l.split_whitespace())
            .collect();
        let mut view: ViewSpec = ViewSpec::default();
        let mut i: usize = 0;
        while i < words.len() {
            let word: &str = words[i];
            i += 1;
            if !word.starts_with("-v") {
                continue;
            }
            match word {
                "-vp" => view.vp = Point3f::from(read_vector(&words, &mut i, word)?),
                "-vd" => view.vd = read_vector(&words, &mut i, word)?,
                "-vu" => view.vu = read_vector(&words, &mut i, word)?,
                "-vh" => view.vh = read_float(&words, &mut i, word)?,
                "-vv" => view.vv = read_float(&words, &mut i, word)?,
                "-vs" => view.vs = read_float(&words, &mut i, word)?,
                "-vl" => view.vl = read_float(&words, &mut i, word)?,
                "-vo" | "-va" => {
                    read_float(&words, &mut i, word)?;
                }
                "-vf" => {
                    return Err(ManySunsError::Syntax(String::from(
                        "nested view files (-vf) are not supported",
                    )));
                }
                _ => {
                    if let Some(t) = word.strip_prefix("-vt") {
                        let mut chars = t.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => view.vtype = c,
                            _ => {
                                return Err(ManySunsError::Syntax(format!(
                                    "bad view type option '{}'",
                                    word
                                )))
                            }
                        }
                    } else {
                        return Err(ManySunsError::Syntax(format!(
                            "unknown view option '{}'",
                            word
                        )));
                    }
                }
            }
        }
        if view.vd.length_squared() == 0.0 as Float {
            return Err(ManySunsError::Syntax(String::from(
                "view direction (-vd) is zero",
            )));
        }
        if vec3_cross_vec3(&view.vd, &view.vu).length_squared() == 0.0 as Float {
            return Err(ManySunsError::Syntax(String::from(
                "view up (-vu) is parallel to the view direction",
            )));
        }
        Ok(view)
    }
    pub fn is_perspective(&self) -> bool {
        self.vtype == 'v'
    }
    /// Options as command line arguments for the Radiance tools.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![format!("-vt{}", self.vtype)];
        args.push(String::from("-vp"));
        args.extend(vec![self.vp.x, self.vp.y, self.vp.z].iter().map(|v| v.to_string()));
        args.push(String::from("-vd"));
        args.extend(vec![self.vd.x, self.vd.y, self.vd.z].iter().map(|v| v.to_string()));
        args.push(String::from("-vu"));
        args.extend(vec![self.vu.x, self.vu.y, self.vu.z].iter().map(|v| v.to_string()));
        for (opt, v) in &[
            ("-vh", self.vh),
            ("-vv", self.vv),
            ("-vs", self.vs),
            ("-vl", self.vl),
        ] {
            args.push(opt.to_string());
            args.push(v.to_string());
        }
        args
    }
    /// Unit direction through the centre of pixel (`col`, `row`) of a
    /// `side` x `side` image. Row 0 is the top row.
    pub fn pixel_direction(&self, col: u32, row: u32, side: u32) -> Vector3f {
        let vd: Vector3f = self.vd.normalize();
        let right: Vector3f = vec3_cross_vec3(&vd, &self.vu).normalize();
        let up: Vector3f = vec3_cross_vec3(&right, &vd).normalize();
        let hn: Float = 2.0 as Float * radians(self.vh * 0.5).tan();
        let vn: Float = 2.0 as Float * radians(self.vv * 0.5).tan();
        let x: Float = (col as Float + 0.5) / side as Float;
        let y: Float = 1.0 as Float - (row as Float + 0.5) / side as Float;
        let d: Vector3f =
            vd + right * (hn * (x - 0.5 + self.vs)) + up * (vn * (y - 0.5 + self.vl));
        d.normalize()
    }
}

fn read_float(words: &[&str], i: &mut usize, opt: &str) -> Result<Float> {
    match words.get(*i) {
        Some(w) => {
            *i += 1;
            w.parse::<Float>()
                .map_err(|_| ManySunsError::Syntax(format!("'{}' after {} is not a number", w, opt)))
        }
        None => Err(ManySunsError::Syntax(format!("missing value after {}", opt))),
    }
}

fn read_vector(words: &[&str], i: &mut usize, opt: &str) -> Result<Vector3f> {
    let x: Float = read_float(words, i, opt)?;
    let y: Float = read_float(words, i, opt)?;
    let z: Float = read_float(words, i, opt)?;
    Ok(Vector3f::new(x, y, z))
}

impl fmt::Display for ViewSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}
