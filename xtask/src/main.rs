//! Custom cargo commands for the affinity crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz      - Run every fuzz target for a short while

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Fuzz targets declared in fuzz/Cargo.toml.
const FUZZ_TARGETS: &[&str] = &["topk_ordering", "boost_clamp"];

/// Seconds each fuzz target runs under `cargo xtask fuzz`.
const FUZZ_SECONDS: u32 = 60;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (contracts + tests + clippy + weight table)
  test      Run all Rust tests, with and without default features
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
  fuzz      Run each fuzz target for {FUZZ_SECONDS}s (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("Affinity Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking contract call sites...");
    check_contract_calls()?;
    println!("✓ Contracts wired in\n");

    println!("[2/4] Running Rust tests...");
    test()?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Verifying documented default weights...");
    verify_weight_table()?;
    println!("✓ Weight table aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests, including the sequential (no rayon) build
fn test() -> Result<()> {
    run_cargo(&["test", "--quiet"])?;
    run_cargo(&["test", "--quiet", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run each fuzz target for a bounded time
fn fuzz() -> Result<()> {
    let max_time = format!("-max_total_time={}", FUZZ_SECONDS);
    for target in FUZZ_TARGETS {
        println!("Fuzzing {} for {}s...", target, FUZZ_SECONDS);
        run_cargo(&["+nightly", "fuzz", "run", target, "--", &max_time])?;
    }
    println!("\n✓ No fuzz failures");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Every contract in src/contracts.rs must be called from somewhere else in src/.
fn check_contract_calls() -> Result<()> {
    let root = project_root()?;
    let contracts = std::fs::read_to_string(root.join("src/contracts.rs"))
        .context("Failed to read contracts.rs")?;

    let names: Vec<&str> = contracts
        .lines()
        .filter_map(|line| line.trim().strip_prefix("pub fn "))
        .filter_map(|rest| rest.split('(').next())
        .collect();

    for name in names {
        let output = Command::new("grep")
            .args(["-rl", name, "--include=*.rs", "."])
            .current_dir(root.join("src"))
            .output()
            .context("Failed to run grep")?;
        let callers = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|path| !path.ends_with("contracts.rs"))
            .count();
        if callers == 0 {
            bail!("Contract `{}` is never called outside contracts.rs", name);
        }
    }

    Ok(())
}

/// The weight table in the combiner's module docs must match its constants.
fn verify_weight_table() -> Result<()> {
    let root = project_root()?;
    let combiner = std::fs::read_to_string(root.join("src/scoring/combiner.rs"))
        .context("Failed to read scoring/combiner.rs")?;

    for (label, constant) in [
        ("Organization", "ORGANIZATION_WEIGHT"),
        ("Topics", "TOPICS_WEIGHT"),
        ("Contributors", "CONTRIBUTORS_WEIGHT"),
        ("Vector", "VECTOR_WEIGHT"),
    ] {
        let code = extract_constant(&combiner, constant)
            .with_context(|| format!("Could not find {}", constant))?;
        let documented = extract_doc_row(&combiner, label)
            .with_context(|| format!("Could not find doc row for {}", label))?;

        if (code - documented).abs() > 1e-12 {
            bail!(
                "{} weight mismatch: code says {}, docs say {}",
                label,
                code,
                documented
            );
        }
        println!("  {:<13} {:.2}", label, code);
    }

    Ok(())
}

/// `pub const NAME: f64 = 0.30;` -> 0.30
fn extract_constant(source: &str, name: &str) -> Option<f64> {
    let prefix = format!("pub const {}: f64 =", name);
    source
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.trim().trim_end_matches(';').parse().ok())
}

/// `//! | Organization | 0.30   |` -> 0.30
fn extract_doc_row(source: &str, label: &str) -> Option<f64> {
    source.lines().find_map(|line| {
        let cells: Vec<&str> = line
            .trim_start_matches("//!")
            .split('|')
            .map(str::trim)
            .collect();
        match cells.as_slice() {
            [_, name, value, ..] if *name == label => value.parse().ok(),
            _ => None,
        }
    })
}
