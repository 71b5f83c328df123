use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::{app_elf, CHIP};

pub fn flash_firmware(
    features: Option<&str>,
    release: bool,
    force: bool,
) -> Result<()> {
    crate::build::build_firmware(features, release)?;

    if force {
        println!("Erasing chip...");
        let mut cmd = Command::new("probe-rs");
        cmd.args(["erase", "--chip", CHIP, "--allow-erase-all"]);
        let status = cmd.status().context("Failed to erase chip")?;
        if !status.success() {
            anyhow::bail!("Failed to erase chip");
        }
    }

    println!("Flashing App...");
    let app_path = app_elf(release);
    let mut cmd = Command::new("probe-rs");
    cmd.args([
        "download",
        "--chip",
        CHIP,
        &app_path,
        "--preverify",
        "--restore-unwritten",
    ]);

    let status = cmd.status().context("Failed to flash application")?;
    if !status.success() {
        anyhow::bail!("Failed to flash application");
    }

    // Download leaves the core halted.
    let status = Command::new("probe-rs")
        .args(["reset", "--chip", CHIP])
        .status()
        .context("Failed to reset target")?;
    if !status.success() {
        anyhow::bail!("Failed to reset target");
    }

    Ok(())
}
