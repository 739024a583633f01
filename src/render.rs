// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The row-partition dispatcher.
//!
//! The image is cut into horizontal bands of rows, one per worker.
//! Every worker owns its band outright, so the workers never share a
//! pixel and no lock is needed; the only synchronization is the join
//! at the end of the crossbeam scope.  Because nothing is accumulated
//! across workers, the pixels come out identical whatever the thread
//! count.

use std::ops::Range;
use std::time::Instant;

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;

use crate::bitmap::{Band, Bitmap};
use crate::errors::RenderError;
use crate::escape::point_color;
use crate::palette::{Grayscale, Palette};
use crate::planes::{Pixel, PlaneMapper, Viewport};

/// Divides `height` rows among `threads` workers.  Every worker gets
/// `height / threads` rows, and the last one also takes whatever is
/// left over, so the ranges always end exactly at `height`.
///
/// When there are more threads than rows, every partition but the last
/// is empty.  Those workers are started anyway and do nothing.
pub fn partition_rows(height: usize, threads: usize) -> Result<Vec<Range<usize>>, RenderError> {
    if threads == 0 {
        return Err(RenderError::InvalidThreadCount(threads));
    }
    let mut partitions: Vec<Range<usize>> = Vec::new();
    partitions
        .try_reserve_exact(threads)
        .map_err(|_| RenderError::TooManyWorkers(threads))?;

    let rows_per_thread = height / threads;
    partitions.extend((0..threads).map(|i| {
        let start = i * rows_per_thread;
        let end = if i == threads - 1 {
            height
        } else {
            (i + 1) * rows_per_thread
        };
        start..end
    }));
    Ok(partitions)
}

/// Renders the Mandelbrot set over `viewport` into every pixel of
/// `bitmap`, using `threads` workers and the default grayscale
/// palette.  Returns once the whole image is filled.
pub fn compute_image(
    bitmap: &mut Bitmap,
    viewport: &Viewport,
    max_iterations: usize,
    threads: usize,
) -> Result<(), RenderError> {
    compute_image_with(bitmap, viewport, max_iterations, threads, &Grayscale)
}

/// As `compute_image`, with a caller-supplied palette.
pub fn compute_image_with<P: Palette>(
    bitmap: &mut Bitmap,
    viewport: &Viewport,
    max_iterations: usize,
    threads: usize,
    palette: &P,
) -> Result<(), RenderError> {
    if max_iterations == 0 {
        return Err(RenderError::InvalidIterations);
    }
    let plane = PlaneMapper::new(bitmap.width(), bitmap.height(), *viewport)?;
    let partitions = partition_rows(plane.integral_plane.1, threads)?;
    let bands = bitmap.bands_mut(&partitions)?;

    info!(
        "rendering {}x{} ({} pixels), {} iterations, {} workers",
        plane.integral_plane.0,
        plane.integral_plane.1,
        plane.pixel_count(),
        max_iterations,
        threads
    );
    let started = Instant::now();

    let failures = dispatch(&plane, bands, max_iterations, palette, None);

    match RenderError::aggregate(failures) {
        Some(e) => {
            error!("render failed: {}", e);
            Err(e)
        }
        None => {
            let elapsed = started.elapsed();
            info!(
                "rendered in {}.{:06}s",
                elapsed.as_secs(),
                elapsed.subsec_micros()
            );
            Ok(())
        }
    }
}

/// Starts one worker per band and joins them all.  Returns every
/// failure seen, in worker order.  If a worker cannot be started no
/// further workers are started, but those already running are still
/// joined.  `stack_size` overrides the platform default for workers.
fn dispatch<P: Palette>(
    plane: &PlaneMapper,
    bands: Vec<Band>,
    max_iterations: usize,
    palette: &P,
    stack_size: Option<usize>,
) -> Vec<RenderError> {
    crossbeam::scope(|scope| {
        let mut failures: Vec<RenderError> = vec![];
        let mut handles: Vec<(usize, ScopedJoinHandle<Result<(), RenderError>>)> =
            Vec::with_capacity(bands.len());

        for (worker, band) in bands.into_iter().enumerate() {
            let mut builder = scope.builder().name(format!("mandel-worker-{}", worker));
            if let Some(size) = stack_size {
                builder = builder.stack_size(size);
            }
            let spawned =
                builder.spawn(move |_| render_band(worker, plane, band, max_iterations, palette));
            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(source) => {
                    error!("could not start worker {}: {}", worker, source);
                    failures.push(RenderError::Spawn { worker, source });
                    break;
                }
            }
        }

        for (worker, handle) in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push(e),
                Err(_) => failures.push(RenderError::WorkerPanicked { worker }),
            }
        }
        failures
    })
    .unwrap_or_else(|_| vec![RenderError::ScopePanicked])
}

/// The work of a single thread: every pixel of every row in the band.
fn render_band<P: Palette>(
    worker: usize,
    plane: &PlaneMapper,
    mut band: Band,
    max_iterations: usize,
    palette: &P,
) -> Result<(), RenderError> {
    let rows = band.rows();
    debug!("worker {} starting on rows {}..{}", worker, rows.start, rows.end);
    for (row, column) in iproduct!(rows.clone(), 0..band.width()) {
        let point = plane.pixel_to_point(&Pixel(column, row));
        band.set(column, row, point_color(point, max_iterations, palette))?;
    }
    debug!("worker {} finished rows {}..{}", worker, rows.start, rows.end);
    Ok(())
}
