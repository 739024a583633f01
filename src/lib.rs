#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z -> z² + c stays bounded.  For every pixel of
//! the image we find the matching point, iterate until the orbit
//! leaves the circle of radius 2 or an iteration cap is reached, and
//! color the pixel by how long that took.
//!
//! The work is split by rows: each worker thread owns a contiguous
//! band of the image and writes only there, so the threads never
//! contend for a pixel and the result does not depend on how many of
//! them there are.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod bitmap;
pub mod config;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod render;

pub use bitmap::{Band, Bitmap, Rgba};
pub use config::Config;
pub use errors::RenderError;
pub use escape::{escape_time, iterations_at_point, point_color};
pub use palette::{iteration_to_color, Grayscale, Palette};
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use render::{compute_image, compute_image_with, partition_rows};
