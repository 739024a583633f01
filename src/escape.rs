// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.

use num::Complex;

use crate::bitmap::Rgba;
use crate::palette::{Grayscale, Palette};

/// This is our classic iterator function.  The orbit is seeded with
/// the point itself and squared-plus-point until it leaves the circle
/// of radius 2 or `max_iterations` steps have been taken.  Points that
/// never escape simply report `max_iterations`.
pub fn escape_time(point: Complex<f64>, max_iterations: usize) -> usize {
    let mut z = point;
    let mut count = 0;
    while z.norm_sqr() <= 4.0 && count < max_iterations {
        z = z * z + point;
        count += 1;
    }
    count
}

/// The color of a point under the given palette.
pub fn point_color<P: Palette + ?Sized>(point: Complex<f64>, max_iterations: usize, palette: &P) -> Rgba {
    palette.color(escape_time(point, max_iterations), max_iterations)
}

/// The grayscale color at (x, y) in the complex plane.
pub fn iterations_at_point(x: f64, y: f64, max_iterations: usize) -> Rgba {
    point_color(Complex::new(x, y), max_iterations, &Grayscale)
}
