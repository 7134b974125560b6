//! The rendered image of the canonical sun. Each pixel keeps its RGB
//! value and whether the sun disk covers it; the view it was rendered
//! with travels along so pixel directions can be traced later.

// std
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
// others
use image::codecs::hdr::{HdrDecoder, HdrEncoder};
use image::Rgb;
use num::Zero;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::manysuns::{Float, Spectrum};
use crate::core::view::ViewSpec;

#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// Raster order, top row first.
    pub pixels: Vec<Spectrum>,
    pub coverage: Vec<bool>,
    pub view: ViewSpec,
}

impl Image {
    pub fn new(width: u32, height: u32, view: ViewSpec) -> Self {
        let n: usize = width as usize * height as usize;
        Image {
            width,
            height,
            pixels: vec![Spectrum::zero(); n],
            coverage: vec![false; n],
            view,
        }
    }
    /// Build an image from decoded pixels; a pixel counts as covered
    /// when its weighted value is positive.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Spectrum>, view: ViewSpec) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(ManySunsError::Render(format!(
                "image of {}x{} pixels carries {} values",
                width,
                height,
                pixels.len()
            )));
        }
        let coverage: Vec<bool> = pixels
            .iter()
            .map(|p| p.weighted() > 0.0 as Float)
            .collect();
        Ok(Image {
            width,
            height,
            pixels,
            coverage,
            view,
        })
    }
    fn get_pixel_index(&self, col: u32, row: u32) -> usize {
        (row * self.width + col) as usize
    }
    pub fn set_pixel(&mut self, col: u32, row: u32, value: Spectrum, covered: bool) {
        let index: usize = self.get_pixel_index(col, row);
        self.pixels[index] = value;
        self.coverage[index] = covered;
    }
    pub fn get_pixel(&self, col: u32, row: u32) -> Spectrum {
        self.pixels[self.get_pixel_index(col, row)]
    }
    pub fn is_covered(&self, col: u32, row: u32) -> bool {
        self.coverage[self.get_pixel_index(col, row)]
    }
    pub fn covered_count(&self) -> usize {
        self.coverage.iter().filter(|c| **c).count()
    }
    /// Write a Radiance RGBE picture.
    pub fn write_hdr<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|e| ManySunsError::io(path.as_ref(), e))?;
        let rgb: Vec<Rgb<f32>> = self
            .pixels
            .iter()
            .map(|p| Rgb([p.c[0] as f32, p.c[1] as f32, p.c[2] as f32]))
            .collect();
        HdrEncoder::new(BufWriter::new(file)).encode(
            &rgb[..],
            self.width as usize,
            self.height as usize,
        )?;
        log::debug!(
            "Writing image {:?} with {}x{} pixels",
            path.as_ref(),
            self.width,
            self.height
        );
        Ok(())
    }
}

/// Decode a Radiance RGBE picture into pixels (raster order).
pub fn decode_hdr<R: std::io::BufRead>(reader: R) -> Result<(u32, u32, Vec<Spectrum>)> {
    let hdr = HdrDecoder::with_strictness(reader, false)?;
    let meta = hdr.metadata();
    let n: usize = meta.width as usize * meta.height as usize;
    let mut pixels: Vec<Spectrum> = vec![Spectrum::zero(); n];
    hdr.read_image_transform(
        |p| {
            let rgb = p.to_hdr();
            Spectrum::rgb(rgb[0] as Float, rgb[1] as Float, rgb[2] as Float)
        },
        &mut pixels,
    )?;
    Ok((meta.width, meta.height, pixels))
}
