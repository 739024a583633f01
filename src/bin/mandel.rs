// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandel;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches, ErrorKind};
use mandel::config::DEFAULT_OUTPUT;
use mandel::{compute_image, Bitmap, Config, Rgba};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, isnotanumber_err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const SCALE: &str = "scale";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const MAX: &str = "max";
const OUTPUT: &str = "output";
const THREADS: &str = "threads";

const EXAMPLES: &str = "Some examples are:
    mandel -x -0.5 -y -0.5 -s 0.2
    mandel -x -.38 -y -.665 -s .05 -m 100
    mandel -x 0.286932 -y 0.014287 -s .0005 -m 1000";

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mandel")
        .version("0.1.0")
        .about("Multi-threaded Mandelbrot renderer")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name(XCENTER)
                .short("x")
                .long(XCENTER)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse x coordinate"))
                .help("X coordinate of image center point"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .short("y")
                .long(YCENTER)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse y coordinate"))
                .help("Y coordinate of image center point"),
        )
        .arg(
            Arg::with_name(SCALE)
                .short("s")
                .long(SCALE)
                .takes_value(true)
                .default_value("4")
                .validator(|s| validate_number::<f64>(&s, "Could not parse scale"))
                .help("Scale of the image in Mandelbrot coordinates"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .short("W")
                .long(WIDTH)
                .takes_value(true)
                .default_value("500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        65_535,
                        "Could not parse image width",
                        "Image width must be between 1 and 65535",
                    )
                })
                .help("Width of the image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .short("H")
                .long(HEIGHT)
                .takes_value(true)
                .default_value("500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        65_535,
                        "Could not parse image height",
                        "Image height must be between 1 and 65535",
                    )
                })
                .help("Height of the image in pixels"),
        )
        .arg(
            Arg::with_name(MAX)
                .short("m")
                .long(MAX)
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        1_000_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000000",
                    )
                })
                .help("The maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .short("o")
                .long(OUTPUT)
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(THREADS)
                .short("n")
                .long(THREADS)
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        1024,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 1024",
                    )
                })
                .help("The number of threads"),
        )
}

fn parsed<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        // Every numeric argument has a default and a validator.
        _ => unreachable!("{} was validated by clap", name),
    }
}

fn config(matches: &ArgMatches) -> Config {
    Config {
        center: Complex::new(parsed(matches, XCENTER), parsed(matches, YCENTER)),
        scale: parsed(matches, SCALE),
        width: parsed(matches, WIDTH),
        height: parsed(matches, HEIGHT),
        max_iterations: parsed(matches, MAX),
        threads: parsed(matches, THREADS),
        output: PathBuf::from(matches.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT)),
    }
}

fn main() {
    env_logger::init();
    let matches = match app().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    };
    let config = config(&matches);

    println!(
        "mandel: x={:.6} y={:.6} scale={:.6} max={} threads={} outfile={}",
        config.center.re,
        config.center.im,
        config.scale,
        config.max_iterations,
        config.threads,
        config.output.display()
    );

    if let Err(e) = config.validate() {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }

    let cpus = num_cpus::get();
    if config.threads > cpus {
        warn!("{} threads requested on {} cpus", config.threads, cpus);
    }

    let viewport = match config.viewport() {
        Ok(viewport) => viewport,
        Err(e) => {
            eprintln!("mandel: {}", e);
            std::process::exit(1);
        }
    };
    let mut bitmap = match Bitmap::new(config.width, config.height) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            eprintln!("mandel: {}", e);
            std::process::exit(1);
        }
    };

    // Dark blue, so any pixel the workers miss stands out.
    bitmap.reset(Rgba::new(0, 0, 255, 0));

    if let Err(e) = compute_image(&mut bitmap, &viewport, config.max_iterations, config.threads) {
        eprintln!("mandel: render failure: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = bitmap.save(&config.output) {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }
}
