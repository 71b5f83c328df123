/// Firmware target triple.
pub const TARGET: &str = "thumbv7em-none-eabihf";
/// probe-rs chip name.
pub const CHIP: &str = "nRF52840_xxAA";

pub const APP_MANIFEST: &str = "crates/relay-app/Cargo.toml";
pub const APP_NAME: &str = "relay-app";

/// Host-testable crates.
pub const HOST_CRATES: &[&str] = &["expander-bus"];

pub fn app_elf(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/{APP_NAME}")
}
