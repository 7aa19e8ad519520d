//! Build metadata for `realtime-metrics info`
//!
//! Exposes `BUILD_TIME` (epoch seconds), `GIT_HASH` and `RUST_VERSION` to
//! `BuildInfo`. Each falls back to a placeholder when the tool is missing.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let build_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    // docs.rs builds in a sandbox without git
    let docs_rs = std::env::var_os("DOCS_RS").is_some();
    let (git_hash, rust_version) = if docs_rs {
        (Some("docs-rs-build".to_string()), Some("stable".to_string()))
    } else {
        let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
        (
            command_output("git", &["rev-parse", "--short", "HEAD"]),
            command_output(&rustc, &["--version"]),
        )
    };

    emit("BUILD_TIME", &build_time.to_string());
    emit("GIT_HASH", git_hash.as_deref().unwrap_or("unknown"));
    emit("RUST_VERSION", rust_version.as_deref().unwrap_or("unknown"));

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
    println!("cargo:rerun-if-env-changed=DOCS_RS");
}

fn emit(name: &str, value: &str) {
    println!("cargo:rustc-env={}={}", name, value);
}

/// Trimmed stdout of a successful command
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|text| !text.is_empty())
}
