//! Copies `memory.x` next to the build output so the linker finds it from
//! inside the workspace, and stamps the firmware and hardware versions.

use std::{env, fs::File, io::Write, path::PathBuf};

#[derive(Clone, Copy, PartialEq, Default)]
enum HwVersion {
    #[default]
    R1,
    Devkit,
}

impl HwVersion {
    fn as_str(self) -> &'static str {
        match self {
            Self::R1 => "r1",
            Self::Devkit => "devkit",
        }
    }
}

fn linker_data() -> &'static [u8] {
    include_bytes!("memory.x")
}

fn main() {
    let hw_features = [
        (cfg!(feature = "r1"), HwVersion::R1),
        (cfg!(feature = "devkit"), HwVersion::Devkit),
    ];

    let enabled_hw: Vec<HwVersion> = hw_features
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, version)| version)
        .collect();

    if enabled_hw.len() > 1 {
        panic!("At most one hardware feature may be enabled.");
    }

    let hw_ver = enabled_hw.first().copied().unwrap_or_default();

    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(linker_data())
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var("CARGO_FEATURE_DEFMT").is_ok() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Build info. Builds outside a git checkout get "unknown".
    let pkg_version = env!("CARGO_PKG_VERSION");
    let git_hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env=COMMIT_HASH={git_hash}");
    println!("cargo:rustc-env=FW_VERSION={pkg_version}-{git_hash}");
    println!("cargo:rustc-env=HW_VERSION={}", hw_ver.as_str());
}
