// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while configuring, rendering, or
//! saving an image.

use std::io;

/// The single error type of the renderer.  Configuration problems are
/// caught before any worker is started; everything else is reported
/// after the workers have been joined.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// Width or height of zero.
    #[fail(display = "Image dimensions must be positive, got {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
    },

    /// The viewport bounds are not finite or not properly ordered.
    #[fail(display = "Invalid viewport: {}", _0)]
    InvalidViewport(String),

    /// An iteration cap of zero.
    #[fail(display = "The maximum iteration count must be at least 1")]
    InvalidIterations,

    /// A thread count of zero.
    #[fail(display = "The thread count must be at least 1, got {}", _0)]
    InvalidThreadCount(usize),

    /// Not even the bookkeeping for this many workers fits in memory.
    #[fail(display = "Cannot allocate work for {} workers", _0)]
    TooManyWorkers(usize),

    /// Row ranges handed to the bitmap do not tile it exactly.
    #[fail(display = "Row partition {:?} does not tile an image of height {}", rows, height)]
    BadPartition {
        /// The offending range, as start..end
        rows: (usize, usize),
        /// Height of the image being partitioned
        height: usize,
    },

    /// A write outside the image, or outside the writer's band.
    #[fail(display = "Pixel ({}, {}) is outside the writable area", _0, _1)]
    OutOfBounds(usize, usize),

    /// The operating system refused to start a worker.
    #[fail(display = "Could not start worker {}: {}", worker, source)]
    Spawn {
        /// Index of the worker that failed to start
        worker: usize,
        /// What the OS said
        #[cause]
        source: io::Error,
    },

    /// A worker panicked before finishing its rows.
    #[fail(display = "Worker {} panicked", worker)]
    WorkerPanicked {
        /// Index of the worker
        worker: usize,
    },

    /// The thread scope itself reported a panic that no join accounted for.
    #[fail(display = "A worker panicked outside of its join")]
    ScopePanicked,

    /// More than one worker failed; the first failure is kept.
    #[fail(display = "{} workers failed, first failure: {}", count, first)]
    Workers {
        /// How many workers failed
        count: usize,
        /// The first failure seen during the join
        first: Box<RenderError>,
    },

    /// The image could not be written.
    #[fail(display = "couldn't write to {}: {}", path, source)]
    Save {
        /// Destination that was being written
        path: String,
        /// What the OS said
        #[cause]
        source: io::Error,
    },
}

impl RenderError {
    /// Collapses the failures collected during a join into one error,
    /// or nothing if every worker succeeded.
    pub fn aggregate(mut failures: Vec<RenderError>) -> Option<RenderError> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            count => Some(RenderError::Workers {
                count,
                first: Box::new(failures.swap_remove(0)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_of_nothing_is_nothing() {
        assert!(RenderError::aggregate(vec![]).is_none());
    }

    #[test]
    fn aggregate_of_one_is_itself() {
        let e = RenderError::aggregate(vec![RenderError::WorkerPanicked { worker: 3 }]).unwrap();
        assert_eq!(e.to_string(), "Worker 3 panicked");
    }

    #[test]
    fn aggregate_of_many_keeps_the_first() {
        let e = RenderError::aggregate(vec![
            RenderError::WorkerPanicked { worker: 1 },
            RenderError::OutOfBounds(7, 9),
        ])
        .unwrap();
        assert_eq!(e.to_string(), "2 workers failed, first failure: Worker 1 panicked");
    }

    #[test]
    fn scope_panic_names_no_worker() {
        let e = RenderError::aggregate(vec![RenderError::ScopePanicked]).unwrap();
        assert_eq!(e.to_string(), "A worker panicked outside of its join");
    }

    #[test]
    fn save_error_names_path_and_reason() {
        let e = RenderError::Save {
            path: "nowhere/mandel.bmp".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            e.to_string(),
            "couldn't write to nowhere/mandel.bmp: No such file or directory"
        );
    }
}
