//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                 # Run all scenarios
//!   cargo run --bin test-scenarios -- match/       # Run a category
//!   cargo run --bin test-scenarios -- --verbose    # Show expected/actual on failure

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ballduel::testing::{SCENARIOS_DIR, TestResult, parser::parse_test_file, run_test};

#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
    errors: usize,
}

fn main() -> ExitCode {
    let mut verbose = false;
    let mut filter: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            a if !a.starts_with('-') => filter = Some(a.to_string()),
            _ => {}
        }
    }

    println!("Scenario Tests");
    println!("==============\n");

    let base = Path::new(SCENARIOS_DIR);
    let mut tests = Vec::new();
    collect_scenarios(base, base, filter.as_deref(), &mut tests);
    tests.sort();

    if tests.is_empty() {
        println!("No scenario files found under {}", SCENARIOS_DIR);
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        return ExitCode::FAILURE;
    }

    let mut tally = Tally::default();
    for path in &tests {
        let name = path
            .strip_prefix(base)
            .unwrap_or(path)
            .with_extension("")
            .to_string_lossy()
            .to_string();

        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };
        match &result {
            TestResult::Pass { .. } => tally.passed += 1,
            TestResult::Fail { .. } => tally.failed += 1,
            TestResult::Error { .. } => tally.errors += 1,
        }
        print_result(&name, &result, verbose);
    }

    println!("\n==============");
    println!(
        "Results: {} passed, {} failed, {} errors",
        tally.passed, tally.failed, tally.errors
    );

    if tally.failed > 0 || tally.errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn collect_scenarios(base: &Path, dir: &Path, filter: Option<&str>, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect_scenarios(base, &path, filter, out);
            continue;
        }
        if path.extension().is_none_or(|e| e != "toml") {
            continue;
        }
        let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy().to_string();
        if filter.is_none_or(|f| rel.contains(f)) {
            out.push(path);
        }
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(44usize.saturating_sub(name.len()).max(1));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", name, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
