// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

#[test]
fn renders_to_the_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.bmp");
    mandel()
        .args(&["-x", "-0.5", "-y", "0", "-s", "1.5"])
        .args(&["-W", "40", "-H", "30", "-m", "50", "-n", "3"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("mandel: x=-0.500000 y=0.000000 scale=1.500000 max=50 threads=3"));
    assert!(out.exists());
}

#[test]
fn writes_pnm_for_ppm_names() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.ppm");
    mandel()
        .args(&["-W", "8", "-H", "8", "-m", "10"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], b"P6");
}

#[test]
fn help_exits_with_one() {
    mandel()
        .arg("-h")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--threads"));
}

#[test]
fn zero_threads_is_rejected() {
    mandel()
        .args(&["-n", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Thread count must be between 1 and 1024"));
}

#[test]
fn non_positive_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.bmp");
    mandel()
        .args(&["-s", "0", "-W", "4", "-H", "4"])
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("scale must be positive"));
    assert!(!out.exists());
}

#[test]
fn unwritable_output_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("out.bmp");
    mandel()
        .args(&["-W", "4", "-H", "4", "-m", "10"])
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("couldn't write to"));
}

#[test]
fn enormous_thread_count_is_rejected_cleanly() {
    mandel()
        .args(&["-W", "4", "-H", "4", "-n", "18446744073709551615"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Thread count must be between 1 and 1024"));
}

#[test]
fn enormous_iteration_cap_is_rejected_cleanly() {
    mandel()
        .args(&["-W", "4", "-H", "4", "-m", "18446744073709551615"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Iteration count must be between 1 and 1000000000"));
}
