use crate::constants::{APP_MANIFEST, HOST_CRATES, TARGET};
use anyhow::{Context, Result};
use std::process::Command;

pub fn build_firmware(features: Option<&str>, release: bool) -> Result<()> {
    let mut cargo_build = Command::new("cargo");
    cargo_build
        .arg("build")
        .arg("--no-default-features")
        .arg("--manifest-path")
        .arg(APP_MANIFEST)
        .arg("--target")
        .arg(TARGET);

    if release {
        cargo_build.arg("--release");
    }

    if let Some(features) = features {
        cargo_build.args(["--features", features]);
    }

    let status = cargo_build
        .status()
        .with_context(|| format!("Failed to build {}", APP_MANIFEST))?;

    if !status.success() {
        anyhow::bail!("Build failed for {}", APP_MANIFEST);
    }

    Ok(())
}

/// Run the `no_std` crates' test suites on the host.
pub fn test_host_crates() -> Result<()> {
    for krate in HOST_CRATES {
        println!("Testing {krate}...");
        let status = Command::new("cargo")
            .args(["test", "-p", krate])
            .status()
            .with_context(|| format!("Failed to test {krate}"))?;

        if !status.success() {
            anyhow::bail!("Tests failed for {krate}");
        }
    }

    Ok(())
}
