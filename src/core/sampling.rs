//! Turn the rendered image of the canonical sun into direction
//! samples. Every pixel covered by the sun disk contributes the
//! direction of its ray, so the number of mini suns is the pixel count
//! of the disk inscribed in the square image, roughly `P * P * PI / 4`.

// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::film::Image;
use crate::core::geometry::Vector3f;
use crate::core::manysuns::MAX_SQUARE_SIDE;
use crate::core::renderer::{PixelRay, Renderer};
use crate::core::view::ViewSpec;

pub struct SampleSet {
    pub side: u32,
    /// Directions of the covered pixels in raster order.
    pub directions: Vec<Vector3f>,
    pub image: Image,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.directions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

pub struct SampleGenerator<'a, R: Renderer> {
    renderer: &'a R,
}

impl<'a, R: Renderer> SampleGenerator<'a, R> {
    pub fn new(renderer: &'a R) -> Self {
        SampleGenerator { renderer }
    }
    /// Render the single sun scene at `side` x `side` pixels and
    /// collect one direction per covered pixel.
    pub fn generate(&self, single_sun: &str, view: &ViewSpec, side: u32) -> Result<SampleSet> {
        if side == 0 || side > MAX_SQUARE_SIDE {
            return Err(ManySunsError::Render(format!(
                "square side of {} pixels is outside 1..={}",
                side, MAX_SQUARE_SIDE
            )));
        }
        let compiled = self.renderer.compile("001-sun", single_sun)?;
        let image: Image = self.renderer.render_image(&compiled, view, side)?;
        let rays: Vec<PixelRay> = self.renderer.trace_pixel_directions(&compiled, &image)?;
        let n_pixels: usize = side as usize * side as usize;
        if rays.len() != n_pixels {
            return Err(ManySunsError::Render(format!(
                "traced {} rays for an image of {}x{} pixels",
                rays.len(),
                side,
                side
            )));
        }
        let directions: Vec<Vector3f> = rays
            .iter()
            .filter(|r| r.covered)
            .map(|r| r.direction)
            .collect();
        if directions.is_empty() {
            return Err(ManySunsError::Render(format!(
                "no pixel of the {}x{} image shows the sun, check the view",
                side, side
            )));
        }
        log::info!(
            "Direction vectors for {} mini suns, based on an image of {}x{} pixels",
            directions.len(),
            side,
            side
        );
        Ok(SampleSet {
            side,
            directions,
            image,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::manysuns::Float;
    use crate::renderers::native::NativeRenderer;
    use std::f64::consts::PI;

    const SUN: &str = "void light solar 0 0 3 1 1 1\nsolar source sun 0 0 4 1 0 0 0.533\n";

    fn count(renderer: &NativeRenderer, view: &ViewSpec, side: u32) -> usize {
        SampleGenerator::new(renderer)
            .generate(SUN, view, side)
            .unwrap()
            .len()
    }

    #[test]
    fn count_grows_with_the_square() {
        let renderer = NativeRenderer::new();
        let view = ViewSpec::parse("-vtv -vd 1 0 0 -vu 0 0 1 -vh 0.533 -vv 0.533").unwrap();
        let mut previous: usize = 0;
        for side in 1..=64 {
            let n: usize = count(&renderer, &view, side);
            assert!(n >= 1);
            assert!(n >= previous, "N({}) = {} < {}", side, n, previous);
            if side >= 16 {
                let expected: Float = PI / 4.0 * (side * side) as Float;
                let ratio: Float = n as Float / expected;
                assert!(ratio > 0.9 && ratio < 1.1, "N({}) = {}", side, n);
            }
            previous = n;
        }
        assert_eq!(count(&renderer, &view, 32), 812);
    }

    #[test]
    fn directions_point_at_the_sun() {
        let renderer = NativeRenderer::new();
        let view = ViewSpec::parse("-vtv -vd 1 0 0 -vu 0 0 1 -vh 0.6 -vv 0.6").unwrap();
        let samples = SampleGenerator::new(&renderer).generate(SUN, &view, 32).unwrap();
        assert_eq!(samples.len(), 632);
        assert_eq!(samples.image.covered_count(), 632);
        for d in &samples.directions {
            assert!(d.x > 0.99998);
        }
    }

    #[test]
    fn sun_outside_the_view() {
        let renderer = NativeRenderer::new();
        let view = ViewSpec::parse("-vtv -vd 0 1 0 -vu 0 0 1 -vh 0.6 -vv 0.6").unwrap();
        assert!(matches!(
            SampleGenerator::new(&renderer).generate(SUN, &view, 8),
            Err(ManySunsError::Render(_))
        ));
        assert!(SampleGenerator::new(&renderer).generate(SUN, &view, 0).is_err());
    }

    #[test]
    fn oversized_square_is_rejected() {
        let renderer = NativeRenderer::new();
        let view = ViewSpec::parse("-vtv -vd 1 0 0 -vu 0 0 1 -vh 0.6 -vv 0.6").unwrap();
        for side in &[MAX_SQUARE_SIDE + 1, 70_000, u32::MAX] {
            assert!(matches!(
                SampleGenerator::new(&renderer).generate(SUN, &view, *side),
                Err(ManySunsError::Render(_))
            ));
        }
    }
}
