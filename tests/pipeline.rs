// std
use std::fs;
use std::path::{Path, PathBuf};
// others
use approx::{assert_abs_diff_eq, assert_relative_eq};
use tempfile::TempDir;
// manysuns
use manysuns::core::api::generate_many_suns;
use manysuns::core::error::ManySunsError;
use manysuns::core::floatfile::read_vectors;
use manysuns::core::geometry::{Point3f, Vector3f};
use manysuns::core::manysuns::{cone_solid_angle, Float, SOLAR_OPENING_ANGLE};
use manysuns::core::options::PipelineOptions;
use manysuns::core::primitive::{parse_scene, primitives, Primitive, SceneItem};
use manysuns::core::renderer::Renderer;
use manysuns::renderers::native::NativeRenderer;

const SUN_TEMPLATE: &str = "void light solar\n0\n0\n3 RADR RADG RADB\n\nsolar source sun\n0\n0\n4 1 0 0 0.533\n";
const MANY_SUN_TEMPLATE: &str = "# NNN x NNN pixel suns\n!rcalc -o manysun.fmt NNN-sun.vec\n";
const MANY_SUN_FORMAT: &str = "void light solar${n}\n0\n0\n3 1E4 1E4 1E4\n\n\
                               solar${n} source sun${n}\n0\n0\n4 ${x} ${y} ${z} 0.0167\n";

const BEFORE: &str = "# gendaylit 6 21 12 -a 52 -o -5 -m 0 -W 800 120\n\
                      # Local solar time: 12.05\n\
                      # Solar altitude and azimuth: 61.4 -1.1\n";
const AFTER: &str = "void brightfunc skyfunc\n\
                     2 skybright perezlum.cal\n\
                     0\n\
                     10 2.1 0.7 -1.0 -0.3 -1.1 0.2 0.0 0.0 0.0 1.0\n\
                     \n\
                     skyfunc glow skyglow\n\
                     0\n\
                     0\n\
                     4 0.9 0.9 1.15 0\n";

fn sky(direction: &str) -> String {
    format!(
        "{}\nvoid light solar\n0\n0\n3 1 1 1\n\nsolar source sun\n0\n0\n4 {} 0.533\n\n{}",
        BEFORE, direction, AFTER
    )
}

struct Setup {
    _dir: TempDir,
    options: PipelineOptions,
}

fn setup(view_size: Float, side: u32, sky_text: &str) -> Setup {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let templates: PathBuf = dir.path().join("templates");
    let skies: PathBuf = dir.path().join("skies");
    fs::create_dir(&templates).unwrap();
    fs::create_dir(&skies).unwrap();
    fs::write(templates.join("001-sun_template.rad"), SUN_TEMPLATE).unwrap();
    fs::write(
        templates.join("x.vf"),
        format!(
            "rview -vtv -vp 0 0 0 -vd 1 0 0 -vu 0 0 1 -vh {} -vv {} -vs 0 -vl 0\n",
            view_size, view_size
        ),
    )
    .unwrap();
    fs::write(templates.join("NNN-sun_template.rad"), MANY_SUN_TEMPLATE).unwrap();
    fs::write(templates.join("manysun.fmt"), MANY_SUN_FORMAT).unwrap();
    fs::write(skies.join("sky.rad"), sky_text).unwrap();
    let options = PipelineOptions::new(&templates, skies.join("sky.rad"), side);
    Setup { _dir: dir, options }
}

fn scene_of(path: &Path) -> Vec<SceneItem> {
    parse_scene(&fs::read_to_string(path).unwrap()).unwrap()
}

fn is_mini_sun(p: &Primitive) -> bool {
    p.is_source() && p.identifier.starts_with("sun") && p.identifier != "sun"
}

#[test]
fn zenith_sun_becomes_632_suns() {
    let setup = setup(0.6, 32, &sky("0 0 1"));
    let original: String = fs::read_to_string(&setup.options.sun_description).unwrap();
    let renderer = NativeRenderer::new();
    let run = generate_many_suns(&renderer, &setup.options).unwrap();
    assert_eq!(run.count, 632);
    assert_abs_diff_eq!(run.position.altitude, 90.0, epsilon = 1e-9);
    assert_eq!(run.position.azimuth, 0.0);
    assert!(run.scale > 0.0);
    assert_eq!(
        run.output,
        setup.options.sun_description.with_file_name("sky-632-suns_FNSTATIC.rad")
    );
    // the original is untouched
    assert_eq!(fs::read_to_string(&setup.options.sun_description).unwrap(), original);
    // N source blocks, every light carries the same radiance
    let items = scene_of(&run.output);
    let prims: Vec<&Primitive> = primitives(&items).collect();
    assert_eq!(prims.iter().filter(|p| is_mini_sun(p)).count(), 632);
    let lights: Vec<&&Primitive> = prims.iter().filter(|p| p.ptype == "light").collect();
    assert_eq!(lights.len(), 632);
    for light in lights {
        assert_eq!(light.reals, vec![run.scale; 3]);
    }
    assert!(!prims.iter().any(|p| p.header() == "void light solar"));
    // everything around the sun is kept line by line
    let text: String = fs::read_to_string(&run.output).unwrap();
    assert!(text.starts_with(BEFORE));
    assert!(text.ends_with(AFTER));
}

#[test]
fn artifacts_are_left_in_the_working_folder() {
    let setup = setup(0.6, 32, &sky("0 0 1"));
    let run = generate_many_suns(&NativeRenderer::new(), &setup.options).unwrap();
    for name in &["001-sun.rad", "32-sun.hdr", "32-sun.vec", "32-sun.rad", "32-sun_xform.rad"] {
        assert!(setup.options.artifact(name).is_file(), "{} missing", name);
    }
    let vectors = read_vectors(setup.options.artifact("32-sun.vec")).unwrap();
    assert_eq!(vectors.len(), run.count);
    let single = fs::read_to_string(setup.options.artifact("001-sun.rad")).unwrap();
    assert!(single.contains("3 1 1 1\n"));
}

#[test]
fn irradiance_is_conserved() {
    for direction in &["0 0 1", "-0.5 -0.5 0.707", "0.3 -0.2 0.9", "-0.3 0.2 0.9"] {
        let setup = setup(0.533, 16, &sky(direction));
        let renderer = NativeRenderer::new();
        let run = generate_many_suns(&renderer, &setup.options).unwrap();
        let sun = run.position.direction();
        let rotated = renderer
            .compile(
                "16-sun_xform",
                &fs::read_to_string(setup.options.artifact("16-sun_xform.rad")).unwrap(),
            )
            .unwrap();
        let e = renderer
            .probe_irradiance(&rotated, &Point3f::default(), &sun)
            .unwrap();
        // a sun of radiance 1 straight above the receiver
        let expected: Float = cone_solid_angle(SOLAR_OPENING_ANGLE);
        assert_relative_eq!(e.weighted(), expected, max_relative = 1e-6);
        // the mini suns are centred on the sun direction
        let mut mean: Vector3f = Vector3f::default();
        for p in primitives(&parse_scene(&fs::read_to_string(&run.output).unwrap()).unwrap()) {
            if is_mini_sun(p) {
                mean += Vector3f::new(p.reals[0], p.reals[1], p.reals[2]);
            }
        }
        let mean = mean.normalize();
        assert_abs_diff_eq!(mean.x, sun.x, epsilon = 1e-6);
        assert_abs_diff_eq!(mean.y, sun.y, epsilon = 1e-6);
        assert_abs_diff_eq!(mean.z, sun.z, epsilon = 1e-6);
    }
}

#[test]
fn more_pixels_give_more_suns() {
    let mut previous: usize = 0;
    for side in &[4, 8, 16, 24, 32] {
        let setup = setup(0.533, *side, &sky("0.1 -0.6 0.79"));
        let run = generate_many_suns(&NativeRenderer::new(), &setup.options).unwrap();
        assert!(run.count >= previous);
        previous = run.count;
    }
    assert_eq!(previous, 812);
}

#[test]
fn missing_templates_stop_the_run() {
    let setup = setup(0.6, 8, &sky("0 0 1"));
    fs::remove_file(setup.options.artifact("x.vf")).unwrap();
    fs::remove_file(setup.options.artifact("manysun.fmt")).unwrap();
    match generate_many_suns(&NativeRenderer::new(), &setup.options) {
        Err(ManySunsError::TemplateMissing(missing)) => assert_eq!(missing.len(), 2),
        other => panic!("expected missing templates, got {:?}", other.map(|r| r.output)),
    }
    assert!(!setup.options.artifact("001-sun.rad").exists());
}

#[test]
fn incomplete_sun_description() {
    let setup = setup(0.6, 8, &format!("{}void light solar\n0\n0\n3 1 1 1\n{}", BEFORE, AFTER));
    assert!(matches!(
        generate_many_suns(&NativeRenderer::new(), &setup.options),
        Err(ManySunsError::Parse(_))
    ));
    assert!(!setup.options.output_path(52).exists());
}

#[test]
fn receiver_facing_away_is_degenerate() {
    let mut setup = setup(0.6, 8, &sky("0 0 1"));
    setup.options.receiver_normal = Vector3f::new(-1.0, 0.0, 0.0);
    assert!(matches!(
        generate_many_suns(&NativeRenderer::new(), &setup.options),
        Err(ManySunsError::Division { .. })
    ));
}

#[test]
fn view_missing_the_sun() {
    let setup = setup(0.6, 8, &sky("0 0 1"));
    fs::write(
        setup.options.artifact("x.vf"),
        "rview -vtv -vp 0 0 0 -vd 0 1 0 -vu 0 0 1 -vh 0.6 -vv 0.6\n",
    )
    .unwrap();
    assert!(matches!(
        generate_many_suns(&NativeRenderer::new(), &setup.options),
        Err(ManySunsError::Render(_))
    ));
}
