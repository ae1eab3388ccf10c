//! Compiles the C wrapper that calls the fixture's exported symbol

#![allow(clippy::print_stdout, reason = "build scripts talk to cargo on stdout")]

use std::path::Path;

fn main() {
    let include = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixture/fx-answer/include");

    cc::Build::new()
        .file("wrappers/call_fixture.c")
        .include(&include)
        .warnings(true)
        .compile("fxcallfixture");

    println!("cargo:rerun-if-changed=wrappers/call_fixture.c");
    println!("cargo:rerun-if-changed={}", include.join("fx_answer.h").display());
}
