// std
use std::collections::HashMap;
use std::collections::HashSet;
// others
use num::Zero;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::film::Image;
use crate::core::geometry::{vec3_angle_between, vec3_dot_vec3f, Point3f, Vector3f};
use crate::core::manysuns::{cone_solid_angle, degrees, Float, Spectrum};
use crate::core::primitive::{parse_scene, primitives, write_scene, Primitive, SceneItem};
use crate::core::renderer::{PixelRay, Renderer};
use crate::core::transform::Transform;
use crate::core::view::ViewSpec;

/// A `source` primitive: a disk at infinity seen under `angle`
/// degrees, emitting the radiance of its `light` or `glow` modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DistantSource {
    pub name: String,
    pub l: Spectrum,
    /// Unit vector towards the source.
    pub w_light: Vector3f,
    /// Full opening angle in degrees.
    pub angle: Float,
    pub solid_angle: Float,
}

impl DistantSource {
    pub fn new(name: &str, l: &Spectrum, w_light: &Vector3f, angle: Float) -> Self {
        DistantSource {
            name: name.to_string(),
            l: *l,
            w_light: w_light.normalize(),
            angle,
            solid_angle: cone_solid_angle(angle),
        }
    }
    /// Does a ray leaving in direction `d` hit the source disk?
    pub fn covers(&self, d: &Vector3f) -> bool {
        degrees(vec3_angle_between(d, &self.w_light)) <= self.angle * 0.5 as Float
    }
    /// Irradiance on a surface with unit normal `n`.
    pub fn irradiance(&self, n: &Vector3f) -> Spectrum {
        let cos_theta: Float = vec3_dot_vec3f(n, &self.w_light).max(0.0 as Float);
        self.l * (self.solid_angle * cos_theta)
    }
}

/// Compiled form of the native renderer: all distant sources.
#[derive(Debug, Clone)]
pub struct NativeScene {
    pub name: String,
    pub sources: Vec<DistantSource>,
}

/// Surface types which have to follow a rotation.
const SURFACES: [&str; 11] = [
    "source", "sphere", "bubble", "polygon", "ring", "cone", "cup", "cylinder", "tube", "instance",
    "mesh",
];

/// Deterministic in-process renderer. It only knows distant sources,
/// which is all a sky description without a model needs.
#[derive(Debug, Default, Clone)]
pub struct NativeRenderer {}

impl NativeRenderer {
    pub fn new() -> Self {
        NativeRenderer::default()
    }
}

fn rotate_primitive(prim: &Primitive, t: &Transform) -> Result<Primitive> {
    let mut rotated: Primitive = prim.clone();
    let need = |n: usize| -> Result<()> {
        if prim.reals.len() < n {
            Err(ManySunsError::Compile(format!(
                "'{}' needs {} real arguments, found {}",
                prim.header(),
                n,
                prim.reals.len()
            )))
        } else {
            Ok(())
        }
    };
    let point = |r: &mut [Float]| {
        let p: Point3f = t.transform_point(&Point3f::new(r[0], r[1], r[2]));
        r[0] = p.x;
        r[1] = p.y;
        r[2] = p.z;
    };
    let vector = |r: &mut [Float]| {
        let v: Vector3f = t.transform_vector(&Vector3f::new(r[0], r[1], r[2]));
        r[0] = v.x;
        r[1] = v.y;
        r[2] = v.z;
    };
    match prim.ptype.as_str() {
        "source" => {
            need(3)?;
            vector(&mut rotated.reals[0..3]);
        }
        "sphere" | "bubble" => {
            need(3)?;
            point(&mut rotated.reals[0..3]);
        }
        "polygon" => {
            if prim.reals.len() < 9 || prim.reals.len() % 3 != 0 {
                return Err(ManySunsError::Compile(format!(
                    "'{}' has {} vertex coordinates",
                    prim.header(),
                    prim.reals.len()
                )));
            }
            for vertex in rotated.reals.chunks_mut(3) {
                point(vertex);
            }
        }
        "ring" => {
            need(6)?;
            point(&mut rotated.reals[0..3]);
            vector(&mut rotated.reals[3..6]);
        }
        "cone" | "cup" | "cylinder" | "tube" => {
            need(6)?;
            point(&mut rotated.reals[0..3]);
            point(&mut rotated.reals[3..6]);
        }
        _ => {
            return Err(ManySunsError::Compile(format!(
                "can not rotate '{}' in process",
                prim.header()
            )));
        }
    }
    Ok(rotated)
}

impl Renderer for NativeRenderer {
    type Compiled = NativeScene;

    fn compile(&self, name: &str, scene: &str) -> Result<NativeScene> {
        let items: Vec<SceneItem> = parse_scene(scene)?;
        for item in &items {
            if let SceneItem::Command(c) = item {
                log::warn!("{}: ignoring generator command '{}'", name, c);
            }
        }
        let mut emitters: HashMap<&str, Spectrum> = HashMap::new();
        let mut defined: HashSet<&str> = HashSet::new();
        let mut sources: Vec<DistantSource> = Vec::new();
        for prim in primitives(&items) {
            match prim.ptype.as_str() {
                "light" | "glow" => {
                    if prim.reals.len() < 3 {
                        return Err(ManySunsError::Compile(format!(
                            "{}: '{}' needs 3 radiance values",
                            name,
                            prim.header()
                        )));
                    }
                    let l: Spectrum = Spectrum::rgb(prim.reals[0], prim.reals[1], prim.reals[2]);
                    emitters.insert(prim.identifier.as_str(), l);
                }
                "source" => {
                    if prim.reals.len() < 4 {
                        return Err(ManySunsError::Compile(format!(
                            "{}: '{}' needs direction and angle",
                            name,
                            prim.header()
                        )));
                    }
                    let w_light: Vector3f = Vector3f::new(prim.reals[0], prim.reals[1], prim.reals[2]);
                    if w_light.length_squared() == 0.0 as Float {
                        return Err(ManySunsError::Compile(format!(
                            "{}: '{}' has no direction",
                            name,
                            prim.header()
                        )));
                    }
                    if prim.modifier == "void" {
                        log::debug!("{}: '{}' is void", name, prim.header());
                    } else if let Some(l) = emitters.get(prim.modifier.as_str()) {
                        sources.push(DistantSource::new(&prim.identifier, l, &w_light, prim.reals[3]));
                    } else if !defined.contains(prim.modifier.as_str()) {
                        return Err(ManySunsError::Compile(format!(
                            "{}: unknown modifier '{}' of '{}'",
                            name,
                            prim.modifier,
                            prim.header()
                        )));
                    }
                }
                _ => {}
            }
            defined.insert(prim.identifier.as_str());
        }
        log::debug!("compiled {} with {} source(s)", name, sources.len());
        Ok(NativeScene {
            name: name.to_string(),
            sources,
        })
    }
    fn render_image(&self, compiled: &NativeScene, view: &ViewSpec, side: u32) -> Result<Image> {
        if side == 0 {
            return Err(ManySunsError::Render(String::from("image side must be positive")));
        }
        if !view.is_perspective() {
            return Err(ManySunsError::Render(format!(
                "view type '{}' is not supported, use -vtv",
                view.vtype
            )));
        }
        let mut image: Image = Image::new(side, side, view.clone());
        for row in 0..side {
            for col in 0..side {
                let d: Vector3f = view.pixel_direction(col, row, side);
                let mut l: Spectrum = Spectrum::zero();
                let mut covered: bool = false;
                for source in &compiled.sources {
                    if source.covers(&d) {
                        l += source.l;
                        covered = true;
                    }
                }
                image.set_pixel(col, row, l, covered);
            }
        }
        log::debug!(
            "rendered {} at {}x{}, {} pixel(s) covered",
            compiled.name,
            side,
            side,
            image.covered_count()
        );
        Ok(image)
    }
    fn trace_pixel_directions(&self, _compiled: &NativeScene, image: &Image) -> Result<Vec<PixelRay>> {
        if image.width != image.height {
            return Err(ManySunsError::Render(format!(
                "image of {}x{} pixels is not square",
                image.width, image.height
            )));
        }
        let side: u32 = image.width;
        let mut rays: Vec<PixelRay> = Vec::with_capacity(side as usize * side as usize);
        for row in 0..side {
            for col in 0..side {
                rays.push(PixelRay {
                    direction: image.view.pixel_direction(col, row, side),
                    covered: image.is_covered(col, row),
                });
            }
        }
        Ok(rays)
    }
    fn probe_irradiance(&self, compiled: &NativeScene, _point: &Point3f, normal: &Vector3f) -> Result<Spectrum> {
        if normal.length_squared() == 0.0 as Float {
            return Err(ManySunsError::Render(String::from("receiver normal is zero")));
        }
        let n: Vector3f = normal.normalize();
        let mut e: Spectrum = Spectrum::zero();
        for source in &compiled.sources {
            e += source.irradiance(&n);
        }
        Ok(e)
    }
    fn rotate(&self, scene: &str, ry: Float, rz: Float) -> Result<String> {
        let t: Transform = Transform::rotate_y_then_z(ry, rz);
        let mut items: Vec<SceneItem> = parse_scene(scene)?;
        for item in items.iter_mut() {
            if let SceneItem::Primitive(prim) = item {
                if SURFACES.contains(&prim.ptype.as_str()) {
                    *prim = rotate_primitive(prim, &t)?;
                }
            }
        }
        let mut out: String = format!("# xform -ry {} -rz {}\n", ry, rz);
        out.push_str(&write_scene(&items));
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SUN: &str = "void light solar\n0\n0\n3 2 2 2\n\nsolar source sun\n0\n0\n4 1 0 0 0.533\n";

    fn view(size: Float) -> ViewSpec {
        ViewSpec::parse(&format!(
            "rview -vtv -vp 0 0 0 -vd 1 0 0 -vu 0 0 1 -vh {} -vv {}",
            size, size
        ))
        .unwrap()
    }

    #[test]
    fn compile_sun() {
        let renderer = NativeRenderer::new();
        let scene = renderer.compile("001-sun", SUN).unwrap();
        assert_eq!(scene.sources.len(), 1);
        assert_eq!(scene.sources[0].l, Spectrum::rgb(2.0, 2.0, 2.0));
        assert_eq!(scene.sources[0].w_light, Vector3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn compile_modifiers() {
        let renderer = NativeRenderer::new();
        let scene = renderer
            .compile(
                "sky",
                "void glow g 0 0 4 1 1 1 0\ng source a 0 0 4 0 0 1 180\nvoid source b 0 0 4 0 1 0 1\n\
                 void plastic p 0 0 5 .5 .5 .5 0 0\np source c 0 0 4 0 1 0 1\n",
            )
            .unwrap();
        assert_eq!(scene.sources.len(), 1);
        assert_eq!(scene.sources[0].name, "a");
        assert!(matches!(
            renderer.compile("bad", "nolight source s 0 0 4 0 0 1 1\n"),
            Err(ManySunsError::Compile(_))
        ));
        assert!(renderer.compile("bad", "void light l 0 0 2 1 1\n").is_err());
    }

    #[test]
    fn small_images() {
        let renderer = NativeRenderer::new();
        let scene = renderer.compile("001-sun", SUN).unwrap();
        let v = view(0.533);
        assert_eq!(renderer.render_image(&scene, &v, 1).unwrap().covered_count(), 1);
        assert_eq!(renderer.render_image(&scene, &v, 2).unwrap().covered_count(), 4);
        assert_eq!(renderer.render_image(&scene, &v, 8).unwrap().covered_count(), 52);
        assert!(renderer.render_image(&scene, &v, 0).is_err());
        let parallel = ViewSpec::parse("-vtl -vd 1 0 0 -vu 0 0 1").unwrap();
        assert!(renderer.render_image(&scene, &parallel, 4).is_err());
    }

    #[test]
    fn traced_rays_follow_coverage() {
        let renderer = NativeRenderer::new();
        let scene = renderer.compile("001-sun", SUN).unwrap();
        let image = renderer.render_image(&scene, &view(0.6), 32).unwrap();
        let rays = renderer.trace_pixel_directions(&scene, &image).unwrap();
        assert_eq!(rays.len(), 32 * 32);
        assert_eq!(rays.iter().filter(|r| r.covered).count(), 632);
        for ray in rays.iter().filter(|r| r.covered) {
            assert!(scene.sources[0].covers(&ray.direction));
        }
    }

    #[test]
    fn irradiance_of_a_sun() {
        let renderer = NativeRenderer::new();
        let scene = renderer.compile("001-sun", SUN).unwrap();
        let omega: Float = cone_solid_angle(0.533);
        let e = renderer
            .probe_irradiance(&scene, &Point3f::default(), &Vector3f::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(e.c[0], 2.0 * omega, epsilon = 1e-15);
        // facing away
        let e = renderer
            .probe_irradiance(&scene, &Point3f::default(), &Vector3f::new(-1.0, 0.0, 0.0))
            .unwrap();
        assert!(e.is_zero());
    }

    #[test]
    fn rotation_moves_geometry_only() {
        let renderer = NativeRenderer::new();
        let text = format!("{}\nvoid plastic p 0 0 5 .5 .5 .5 0 0\n!gensky 3 21 12\np ring r 0 0 8 1 0 0 1 0 0 0 1\n", SUN);
        let out = renderer.rotate(&text, -90.0, 0.0).unwrap();
        assert!(out.starts_with("# xform -ry -90 -rz 0\n"));
        assert!(out.contains("!gensky 3 21 12\n"));
        let items = parse_scene(&out).unwrap();
        let prims: Vec<&Primitive> = primitives(&items).collect();
        assert_eq!(prims[0].reals, vec![2.0, 2.0, 2.0]);
        assert_eq!(prims[2].reals, vec![0.5, 0.5, 0.5, 0.0, 0.0]);
        // +X tilted up by 90 degrees points to +Z
        assert_abs_diff_eq!(prims[1].reals[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prims[1].reals[2], 1.0, epsilon = 1e-12);
        assert_eq!(prims[1].reals[3], 0.533);
        // ring centre (1, 0, 0) and normal (1, 0, 0) both end up on +Z
        for i in 0..2 {
            assert_abs_diff_eq!(prims[3].reals[i], 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(prims[3].reals[i + 3], 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(prims[3].reals[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prims[3].reals[5], 1.0, epsilon = 1e-12);
        assert_eq!(&prims[3].reals[6..], &[0.0, 1.0]);
        assert!(renderer.rotate("void mesh m 1 x.rtm 0 0\n", 10.0, 10.0).is_err());
    }
}
