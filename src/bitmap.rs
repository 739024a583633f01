// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel surface the renderer draws into.
//!
//! A Bitmap is a row-major grid of RGBA pixels.  It can be carved into
//! disjoint horizontal Bands, each of which holds the only mutable
//! reference to its rows; handing one Band to each worker is what
//! lets the workers write without any locking.

use std::fs::File;
use std::io::BufWriter;
use std::mem;
use std::ops::Range;
use std::path::Path;

use image::bmp::BMPEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;

use crate::errors::RenderError;

/// One pixel.  Channels are compared in r, g, b, a order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba {
    /// Builds a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }
}

/// A width x height grid of pixels, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// Creates a bitmap with every pixel set to `Rgba::default()`.
    pub fn new(width: usize, height: usize) -> Result<Bitmap, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Bitmap {
            width,
            height,
            pixels: vec![Rgba::default(); width * height],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw pixels, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Fills the whole bitmap with one color.
    pub fn reset(&mut self, color: Rgba) {
        for p in self.pixels.iter_mut() {
            *p = color;
        }
    }

    /// Reads one pixel, or None if (column, row) is off the bitmap.
    pub fn get(&self, column: usize, row: usize) -> Option<Rgba> {
        if column < self.width && row < self.height {
            Some(self.pixels[row * self.width + column])
        } else {
            None
        }
    }

    /// Writes one pixel.
    pub fn set(&mut self, column: usize, row: usize, color: Rgba) -> Result<(), RenderError> {
        if column >= self.width || row >= self.height {
            return Err(RenderError::OutOfBounds(column, row));
        }
        self.pixels[row * self.width + column] = color;
        Ok(())
    }

    /// Splits the bitmap into one mutable band per row range.  The
    /// ranges must be in order, contiguous, and together cover every
    /// row exactly once.  Empty ranges are allowed and yield empty
    /// bands.
    pub fn bands_mut(&mut self, partitions: &[Range<usize>]) -> Result<Vec<Band<'_>>, RenderError> {
        let (width, height) = (self.width, self.height);
        let bad = |rows: &Range<usize>| RenderError::BadPartition {
            rows: (rows.start, rows.end),
            height,
        };

        let mut rest: &mut [Rgba] = &mut self.pixels;
        let mut bands = Vec::with_capacity(partitions.len());
        let mut next_row = 0;
        for rows in partitions {
            if rows.start != next_row || rows.end < rows.start || rows.end > height {
                return Err(bad(rows));
            }
            let (pixels, tail) = mem::take(&mut rest).split_at_mut(rows.len() * width);
            rest = tail;
            bands.push(Band {
                width,
                rows: rows.clone(),
                pixels,
            });
            next_row = rows.end;
        }

        if next_row != height {
            return Err(bad(&(next_row..height)));
        }
        Ok(bands)
    }

    /// Flattens to 8-bit RGB; the alpha channel is not stored on disk.
    fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b]);
        }
        bytes
    }

    /// Writes the bitmap to `path`.  Files ending in `.ppm` or `.pnm`
    /// are written as binary PNM pixmaps, everything else as BMP.
    /// Whatever was written before a failure is left in place.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        let failed = |source| RenderError::Save {
            path: path.display().to_string(),
            source,
        };

        let bytes = self.to_rgb_bytes();
        let (w, h) = (self.width as u32, self.height as u32);
        let mut output = BufWriter::new(File::create(path).map_err(failed)?);

        let is_pnm = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.eq_ignore_ascii_case("ppm") || ext.eq_ignore_ascii_case("pnm"),
            None => false,
        };
        if is_pnm {
            PNMEncoder::new(&mut output)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary))
                .encode(&bytes[..], w, h, ColorType::RGB(8))
                .map_err(failed)?;
        } else {
            BMPEncoder::new(&mut output)
                .encode(&bytes, w, h, ColorType::RGB(8))
                .map_err(failed)?;
        }
        output.into_inner().map(|_| ()).map_err(|e| failed(e.into_error()))
    }
}

/// The exclusive, writable view of a contiguous run of rows.  Coordinates
/// passed to `set` are absolute image coordinates.
#[derive(Debug)]
pub struct Band<'a> {
    width: usize,
    rows: Range<usize>,
    pixels: &'a mut [Rgba],
}

impl<'a> Band<'a> {
    /// The rows this band owns.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Width of the underlying bitmap.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if the band owns no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.start == self.rows.end
    }

    /// Writes one pixel.  Rows outside the band are refused.
    pub fn set(&mut self, column: usize, row: usize, color: Rgba) -> Result<(), RenderError> {
        if column >= self.width || row < self.rows.start || row >= self.rows.end {
            return Err(RenderError::OutOfBounds(column, row));
        }
        self.pixels[(row - self.rows.start) * self.width + column] = color;
        Ok(())
    }
}
