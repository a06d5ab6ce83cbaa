//! Command-line behaviour of the `cdetect` binary.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use cdetect::detect::markers::{COMMENT, DEBUG_STR, RODATA_CST4};
use common::{create_temp_file, elf_file, elf_with_sections, stamps};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn single_file_prints_label_only() {
    let file = elf_file(&[(COMMENT, stamps::GCC_7_2_0)]);
    cargo_bin_cmd!("cdetect")
        .arg(file.path())
        .assert()
        .success()
        .stdout("GCC 7.2.0\n");
}

#[test]
fn several_files_print_path_prefixed_lines_in_order() {
    let gcc = elf_file(&[(COMMENT, stamps::GCC_7_1_1)]);
    let rust = elf_file(&[(DEBUG_STR, stamps::RUSTC_1_27_0)]);
    let tcc = elf_file(&[(RODATA_CST4, &[0, 0, 0, 0])]);

    let expected = format!(
        "{}: GCC 7.1.1\n{}: Rust 1.27.0\n{}: TCC\n",
        gcc.path().display(),
        rust.path().display(),
        tcc.path().display()
    );
    cargo_bin_cmd!("cdetect")
        .arg(gcc.path())
        .arg(rust.path())
        .arg(tcc.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn non_elf_is_reported_and_fails() {
    let file = create_temp_file(b"#!/bin/sh\nexit 0\n");
    cargo_bin_cmd!("cdetect")
        .env_remove("RUST_LOG")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(format!("{}: not an ELF\n", file.path().display()));
}

#[test]
fn invalid_settings_are_reported_on_one_line() {
    let file = elf_file(&[(COMMENT, stamps::GCC_7_2_0)]);
    cargo_bin_cmd!("cdetect")
        .env_remove("RUST_LOG")
        .arg("--margin")
        .arg("5000")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("invalid detection settings: Invalid configuration:"))
        .stderr(predicate::str::contains("Error:").not())
        .stderr(predicate::str::contains("Caused by").not());
}

#[test]
fn missing_bare_name_is_not_found() {
    let empty = tempdir().unwrap();
    cargo_bin_cmd!("cdetect")
        .current_dir(empty.path())
        .env("PATH", empty.path())
        .env_remove("RUST_LOG")
        .arg("no-such-compiler-output")
        .assert()
        .failure()
        .stderr("no-such-compiler-output: no such file or directory\n");
}

#[test]
fn bare_name_is_resolved_on_path() {
    let bin_dir = tempdir().unwrap();
    let work_dir = tempdir().unwrap();
    fs::write(
        bin_dir.path().join("hello-clang"),
        elf_with_sections(&[(COMMENT, stamps::CLANG_6_0_0)]),
    )
    .unwrap();

    cargo_bin_cmd!("cdetect")
        .current_dir(work_dir.path())
        .env("PATH", bin_dir.path())
        .arg("hello-clang")
        .assert()
        .success()
        .stdout("Clang 6.0.0\n");
}

#[test]
fn details_report_classification() {
    let file = elf_file(&[(COMMENT, stamps::GCC_7_2_0)]);
    cargo_bin_cmd!("cdetect")
        .arg("--details")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GCC 7.2.0 (stripped: "))
        .stdout(predicate::str::contains("static: yes)"));
}

#[test]
fn json_output_is_parseable() {
    let file = elf_file(&[(COMMENT, stamps::GCC_TWO_STAMPS)]);
    let output = cargo_bin_cmd!("cdetect")
        .arg("--json")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["compiler"], "GCC 7.2.0");
    assert_eq!(record["probe"], "gcc");
    assert_eq!(record["static_linked"], true);
    assert_eq!(record["byte_order"], "little");
}

#[test]
fn odd_window_size_is_rejected() {
    let file = elf_file(&[(COMMENT, stamps::GCC_7_2_0)]);
    cargo_bin_cmd!("cdetect")
        .arg("--window-size")
        .arg("1001")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be even"));
}

#[test]
fn config_file_is_applied() {
    let config = create_temp_file(br#"{ "window_size": 4096, "margin": 512 }"#);
    let file = elf_file(&[(COMMENT, stamps::GCC_7_2_0)]);
    cargo_bin_cmd!("cdetect")
        .arg("--config")
        .arg(config.path())
        .arg(file.path())
        .assert()
        .success()
        .stdout("GCC 7.2.0\n");
}

#[test]
fn requires_at_least_one_file() {
    cargo_bin_cmd!("cdetect").assert().failure();
}
