// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared CLI output helpers. Global flags are published through env vars
//! by `main` so every command can check them.

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("LDSH_QUIET").is_ok()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var("LDSH_JSON").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

/// Print a check result line with symbol and label/value.
pub fn print_check(ok: bool, label: &str, value: &str) {
    let symbol = if ok { "[OK]" } else { "[!!]" };
    println!("{symbol} {label:<10} {value}");
}
