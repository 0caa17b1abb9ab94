//! Stamps a build counter and build time into the crate
//!
//! The counter lives in OUT_DIR so incremental builds keep counting without
//! writing into the source tree. SOURCE_DATE_EPOCH pins the build time.

use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let counter = std::env::var_os("OUT_DIR").map(|dir| PathBuf::from(dir).join("build_counter"));
    let build = counter
        .as_ref()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|text| text.trim().parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    if let Some(path) = &counter {
        if let Err(e) = fs::write(path, build.to_string()) {
            println!("cargo:warning=build counter not saved: {}", e);
        }
    }

    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(chrono::Utc::now);

    println!("cargo:rustc-env=WELLNESS_REPORT_BUILD={}", build);
    println!(
        "cargo:rustc-env=WELLNESS_REPORT_BUILT_AT={}",
        built_at.format("%Y-%m-%dT%H:%M:%SZ")
    );
}
