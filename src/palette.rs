// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning escape counts into colors.  The renderer only ever talks to
//! the Palette trait, so swapping the coloring scheme touches neither
//! the evaluator nor the dispatcher.

use num::clamp;

use crate::bitmap::Rgba;

/// Maps an escape count in [0, max] to a pixel color.  Palettes are
/// shared by every worker, hence Sync.
pub trait Palette: Sync {
    /// The color for a point that ran for `count` of at most `max` iterations.
    fn color(&self, count: usize, max: usize) -> Rgba;
}

/// Linear gray ramp: black for points that escape at once, white for
/// points that never escape.  Alpha is always zero.
#[derive(Copy, Clone, Debug, Default)]
pub struct Grayscale;

impl Palette for Grayscale {
    fn color(&self, count: usize, max: usize) -> Rgba {
        if max == 0 {
            return Rgba::new(0, 0, 0, 0);
        }
        let count = clamp(count, 0, max) as u128;
        let gray = (255 * count / max as u128) as u8;
        Rgba::new(gray, gray, gray, 0)
    }
}

impl<F> Palette for F
where
    F: Fn(usize, usize) -> Rgba + Sync,
{
    fn color(&self, count: usize, max: usize) -> Rgba {
        self(count, max)
    }
}

/// The default mapping, as a plain function.
pub fn iteration_to_color(count: usize, max: usize) -> Rgba {
    Grayscale.color(count, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_the_ramp() {
        assert_eq!(iteration_to_color(0, 50), Rgba::new(0, 0, 0, 0));
        assert_eq!(iteration_to_color(50, 50), Rgba::new(255, 255, 255, 0));
    }

    #[test]
    fn uses_integer_division() {
        // 255 * 1 / 2 == 127
        assert_eq!(iteration_to_color(1, 2), Rgba::new(127, 127, 127, 0));
        assert_eq!(iteration_to_color(1, 1000), Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn ramp_is_monotonic() {
        for max in &[1, 2, 7, 50, 255, 1000] {
            let colors: Vec<Rgba> = (0..=*max).map(|i| iteration_to_color(i, *max)).collect();
            for pair in colors.windows(2) {
                assert!(pair[0].r <= pair[1].r);
                assert!(pair[0].g <= pair[1].g);
                assert!(pair[0].b <= pair[1].b);
            }
        }
    }

    #[test]
    fn counts_above_max_are_clamped() {
        assert_eq!(iteration_to_color(80, 50), Rgba::new(255, 255, 255, 0));
    }

    #[test]
    fn huge_caps_do_not_overflow() {
        let max = std::usize::MAX;
        assert_eq!(iteration_to_color(max, max), Rgba::new(255, 255, 255, 0));
        assert_eq!(iteration_to_color(max / 2, max), Rgba::new(127, 127, 127, 0));
    }

    #[test]
    fn zero_max_does_not_divide() {
        assert_eq!(iteration_to_color(3, 0), Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn closures_are_palettes() {
        let red = |count: usize, max: usize| Rgba::new((255 * count / max) as u8, 0, 0, 255);
        assert_eq!(red.color(10, 10), Rgba::new(255, 0, 0, 255));
    }
}
