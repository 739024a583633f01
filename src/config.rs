// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What one run of the renderer should produce.  Everything is checked
//! here, before a single pixel is computed; nothing is clamped.

use std::path::PathBuf;

use num::Complex;

use crate::errors::RenderError;
use crate::planes::Viewport;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "mandel.bmp";
/// Default half-width of the viewport.
pub const DEFAULT_SCALE: f64 = 4.0;
/// Default image width and height.
pub const DEFAULT_SIZE: usize = 500;
/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Default number of workers.
pub const DEFAULT_THREADS: usize = 1;

/// All the parameters of a render.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The point of the complex plane at the center of the image
    pub center: Complex<f64>,
    /// Distance from the center to each edge of the viewport
    pub scale: f64,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Iteration cap per point
    pub max_iterations: usize,
    /// Number of workers
    pub threads: usize,
    /// Where the image is saved
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            center: Complex::new(0.0, 0.0),
            scale: DEFAULT_SCALE,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threads: DEFAULT_THREADS,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Refuses any configuration that cannot produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations == 0 {
            return Err(RenderError::InvalidIterations);
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidThreadCount(self.threads));
        }
        self.viewport().map(|_| ())
    }

    /// The region of the complex plane this configuration renders.
    pub fn viewport(&self) -> Result<Viewport, RenderError> {
        Viewport::from_center(self.center, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport().unwrap(), Viewport::new(-4.0, 4.0, -4.0, 4.0).unwrap());
    }

    #[test]
    fn zero_sizes_are_refused() {
        let config = Config {
            width: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        let config = Config {
            height: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_threads_are_refused() {
        let config = Config {
            threads: 0,
            ..Config::default()
        };
        match config.validate() {
            Err(RenderError::InvalidThreadCount(0)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zero_iterations_are_refused() {
        let config = Config {
            max_iterations: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_scale_is_refused() {
        let config = Config {
            scale: -1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn more_threads_than_rows_is_allowed() {
        let config = Config {
            height: 4,
            threads: 16,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
