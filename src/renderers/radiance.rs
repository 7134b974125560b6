//! Drive the [Radiance](https://www.radiance-online.org) command line
//! tools. All programs run in the working folder, input is piped through
//! stdin and results are read back from stdout:
//!
//! * `oconv -f` compiles scene text (written to `<name>.rad`) into an
//!   octree,
//! * `rpict` renders the canonical sun,
//! * `vwrays` lists the ray of every pixel,
//! * `rtrace -I` probes irradiance,
//! * `xform` rotates scene text.

// std
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::film::{decode_hdr, Image};
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::manysuns::{Float, Spectrum};
use crate::core::renderer::{PixelRay, Renderer};
use crate::core::view::ViewSpec;

pub struct RadianceRenderer {
    pub folder: PathBuf,
}

/// An octree written into the working folder.
#[derive(Debug, Clone)]
pub struct Octree {
    pub name: String,
    pub path: PathBuf,
}

/// Which error a failing program maps to.
#[derive(Debug, Copy, Clone)]
enum Stage {
    Compile,
    Render,
}

impl Stage {
    fn error(self, msg: String) -> ManySunsError {
        match self {
            Stage::Compile => ManySunsError::Compile(msg),
            Stage::Render => ManySunsError::Render(msg),
        }
    }
}

impl RadianceRenderer {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        RadianceRenderer {
            folder: folder.as_ref().to_path_buf(),
        }
    }
    fn run(&self, program: &str, args: &[String], input: Option<String>, stage: Stage) -> Result<Vec<u8>> {
        log::debug!("{} {}", program, args.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.folder)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| stage.error(format!("can not run {}: {}", program, e)))?;
        // feed stdin from another thread, the program may fill stdout first
        let writer = match (input, child.stdin.take()) {
            (Some(text), Some(mut stdin)) => Some(std::thread::spawn(move || stdin.write_all(text.as_bytes()))),
            _ => None,
        };
        let output = child
            .wait_with_output()
            .map_err(|e| stage.error(format!("{} did not finish: {}", program, e)))?;
        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(stage.error(format!("can not write to {}: {}", program, e))),
                Err(_) => return Err(stage.error(format!("can not write to {}", program))),
            }
        }
        if !output.status.success() {
            return Err(stage.error(format!(
                "{} failed ({}): {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }
    fn octree_arg(&self, compiled: &Octree) -> String {
        compiled.path.to_string_lossy().into_owned()
    }
}

fn parse_floats(bytes: &[u8], program: &str) -> Result<Vec<Float>> {
    let text = String::from_utf8_lossy(bytes);
    let mut values: Vec<Float> = Vec::new();
    for token in text.split_whitespace() {
        values.push(token.parse::<Float>().map_err(|_| {
            ManySunsError::Render(format!("{} returned '{}' instead of a number", program, token))
        })?);
    }
    Ok(values)
}

fn resolution_args(view: &ViewSpec, side: u32) -> Vec<String> {
    let mut args: Vec<String> = view.to_args();
    args.push(String::from("-x"));
    args.push(side.to_string());
    args.push(String::from("-y"));
    args.push(side.to_string());
    for s in &["-pa", "0", "-pj", "0"] {
        args.push(s.to_string());
    }
    args
}

impl Renderer for RadianceRenderer {
    type Compiled = Octree;

    fn compile(&self, name: &str, scene: &str) -> Result<Octree> {
        let rad: PathBuf = self.folder.join(format!("{}.rad", name));
        fs::write(&rad, scene).map_err(|e| ManySunsError::io(&rad, e))?;
        let octree: Vec<u8> = self.run(
            "oconv",
            &[String::from("-f"), rad.to_string_lossy().into_owned()],
            None,
            Stage::Compile,
        )?;
        let path: PathBuf = self.folder.join(format!("{}.oct", name));
        fs::write(&path, octree).map_err(|e| ManySunsError::io(&path, e))?;
        Ok(Octree {
            name: name.to_string(),
            path,
        })
    }
    fn render_image(&self, compiled: &Octree, view: &ViewSpec, side: u32) -> Result<Image> {
        if side == 0 {
            return Err(ManySunsError::Render(String::from("image side must be positive")));
        }
        let mut args: Vec<String> = resolution_args(view, side);
        args.push(String::from("-ps"));
        args.push(String::from("1"));
        args.push(String::from("-w"));
        args.push(self.octree_arg(compiled));
        let picture: Vec<u8> = self.run("rpict", &args, None, Stage::Render)?;
        let (width, height, pixels) = decode_hdr(Cursor::new(picture))?;
        if width != side || height != side {
            return Err(ManySunsError::Render(format!(
                "rpict rendered {}x{} instead of {}x{} pixels",
                width, height, side, side
            )));
        }
        Image::from_pixels(width, height, pixels, view.clone())
    }
    fn trace_pixel_directions(&self, _compiled: &Octree, image: &Image) -> Result<Vec<PixelRay>> {
        let args: Vec<String> = resolution_args(&image.view, image.width);
        let values: Vec<Float> = parse_floats(&self.run("vwrays", &args, None, Stage::Render)?, "vwrays")?;
        let n: usize = image.width as usize * image.height as usize;
        if values.len() != 6 * n {
            return Err(ManySunsError::Render(format!(
                "vwrays returned {} values for {} pixels",
                values.len(),
                n
            )));
        }
        Ok(values
            .chunks(6)
            .zip(image.coverage.iter())
            .map(|(ray, covered)| PixelRay {
                direction: Vector3f::new(ray[3], ray[4], ray[5]),
                covered: *covered,
            })
            .collect())
    }
    fn probe_irradiance(&self, compiled: &Octree, point: &Point3f, normal: &Vector3f) -> Result<Spectrum> {
        let args: Vec<String> = vec![
            String::from("-w"),
            String::from("-h"),
            String::from("-I"),
            String::from("-dc"),
            String::from("1"),
            String::from("-dt"),
            String::from("0"),
            self.octree_arg(compiled),
        ];
        let input: String = format!("{} {}\n", point, normal);
        let values: Vec<Float> = parse_floats(&self.run("rtrace", &args, Some(input), Stage::Render)?, "rtrace")?;
        if values.len() < 3 {
            return Err(ManySunsError::Render(format!(
                "rtrace returned {} value(s) for {}",
                values.len(),
                compiled.name
            )));
        }
        Ok(Spectrum::rgb(values[0], values[1], values[2]))
    }
    fn rotate(&self, scene: &str, ry: Float, rz: Float) -> Result<String> {
        let args: Vec<String> = vec![
            String::from("-ry"),
            ry.to_string(),
            String::from("-rz"),
            rz.to_string(),
        ];
        let out: Vec<u8> = self.run("xform", &args, Some(scene.to_string()), Stage::Compile)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
    fn expand_command(&self, command: &str) -> Result<Option<String>> {
        let line: &str = command.trim_start().trim_start_matches('!');
        let out: Vec<u8> = self.run(
            "sh",
            &[String::from("-c"), line.to_string()],
            None,
            Stage::Compile,
        )?;
        Ok(Some(String::from_utf8_lossy(&out).into_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolution_follows_view_options() {
        let view = ViewSpec::parse("-vtv -vd 1 0 0 -vu 0 0 1 -vh 0.6 -vv 0.6").unwrap();
        let args = resolution_args(&view, 32);
        assert_eq!(args[0], "-vtv");
        assert_eq!(&args[args.len() - 8..], &["-x", "32", "-y", "32", "-pa", "0", "-pj", "0"]);
    }

    #[test]
    fn rtrace_output_is_parsed() {
        assert_eq!(
            parse_floats(b"1.5e+02\t2\t3\n", "rtrace").unwrap(),
            vec![150.0, 2.0, 3.0]
        );
        assert!(parse_floats(b"oops", "rtrace").is_err());
    }

    #[test]
    fn missing_program_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = RadianceRenderer::new(dir.path());
        let err = renderer
            .run("manysuns-no-such-program", &[], None, Stage::Render)
            .unwrap_err();
        assert!(matches!(err, ManySunsError::Render(_)));
    }
}
