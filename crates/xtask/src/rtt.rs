use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::CHIP;

/// Attach probe-rs to the running board and print RTT output until Ctrl-C.
///
/// `elf` must be the image that is flashed, or defmt frames decode wrong.
pub fn run(elf: &str) -> Result<()> {
    let status = Command::new("probe-rs")
        .args(["attach", "--chip", CHIP, elf])
        .status()
        .with_context(|| format!("could not start probe-rs for {elf}"))?;

    if !status.success() {
        anyhow::bail!("probe-rs exited with {status} while attached to {CHIP}");
    }

    Ok(())
}
