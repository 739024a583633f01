// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane, the Viewport, bounded by
//! xmin..xmax on the real axis and ymin..ymax on the imaginary axis.
use num::Complex;

use crate::errors::RenderError;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y (column, row) of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The rectangle of the complex plane that gets mapped onto the image.
/// Once constructed, the bounds are guaranteed finite and ordered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Viewport {
    /// Builds a viewport from its four bounds.  Requires xmin < xmax
    /// and ymin < ymax.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Viewport, RenderError> {
        if ![xmin, xmax, ymin, ymax].iter().all(|b| b.is_finite()) {
            return Err(RenderError::InvalidViewport(
                "The viewport bounds must be finite numbers".to_string(),
            ));
        }

        if xmin >= xmax {
            return Err(RenderError::InvalidViewport(format!(
                "xmin ({}) is not to the left of xmax ({})",
                xmin, xmax
            )));
        }

        if ymin >= ymax {
            return Err(RenderError::InvalidViewport(format!(
                "ymin ({}) is not below ymax ({})",
                ymin, ymax
            )));
        }

        Ok(Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// A square viewport centered on a point, extending `scale` in
    /// every direction.
    pub fn from_center(center: Complex<f64>, scale: f64) -> Result<Viewport, RenderError> {
        if !(scale > 0.0) {
            return Err(RenderError::InvalidViewport(format!(
                "The scale must be positive, got {}",
                scale
            )));
        }
        Viewport::new(
            center.re - scale,
            center.re + scale,
            center.im - scale,
            center.im + scale,
        )
    }

    /// Left edge.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Right edge.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Bottom edge.
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Top edge.
    pub fn ymax(&self) -> f64 {
        self.ymax
    }
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels from one to points in
/// the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane being rendered
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// viewport it maps onto.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
        })
    }

    /// The total number of points in the integral grid.
    pub fn pixel_count(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, map it by
    /// linear interpolation to a point on the complex plane.  Pixel
    /// (0, 0) lands exactly on (xmin, ymin).
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let vp = &self.viewport;
        Complex::new(
            vp.xmin + (pixel.0 as f64) * (vp.xmax - vp.xmin) / (self.integral_plane.0 as f64),
            vp.ymin + (pixel.1 as f64) * (vp.ymax - vp.ymin) / (self.integral_plane.1 as f64),
        )
    }
}
