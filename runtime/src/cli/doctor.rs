// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment readiness check.

use crate::cli::output;
use crate::renderer::chromium::find_chromium;
use crate::site;
use anyhow::Result;
use std::path::Path;

/// Report whether a run could succeed here: Chromium present and the
/// working directory writable for the feed file. Always returns Ok.
pub async fn run() -> Result<()> {
    let chromium = find_chromium();
    let writable = dir_writable(Path::new("."));

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "chromium": chromium.as_ref().map(|p| p.display().to_string()),
            "output_dir_writable": writable,
            "ready": chromium.is_some() && writable,
        }));
        return Ok(());
    }

    println!("ldsh-feed doctor");
    println!("================");
    println!();
    println!("OS:   {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
    println!();

    match &chromium {
        Some(path) => output::print_check(true, "Chromium", &path.display().to_string()),
        None => output::print_check(
            false,
            "Chromium",
            "not found; set LDSH_CHROMIUM_PATH or install Chrome",
        ),
    }

    if writable {
        output::print_check(true, "Output", &format!("./{} is writable", site::OUTPUT_FILE));
    } else {
        output::print_check(false, "Output", "current directory is not writable");
    }

    println!();
    if chromium.is_some() && writable {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}

/// Probe by creating and removing a scratch file.
fn dir_writable(dir: &Path) -> bool {
    let probe = dir.join(format!(".ldsh-feed-probe-{}", std::process::id()));
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_writable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(dir_writable(dir.path()));
        assert!(!dir_writable(&dir.path().join("missing")));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
