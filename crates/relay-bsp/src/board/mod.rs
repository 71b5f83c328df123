const _ENABLED_FEATURES: u32 = 0
    + if cfg!(feature = "r1") { 1 } else { 0 }
    + if cfg!(feature = "devkit") { 1 } else { 0 };
const _: () = if _ENABLED_FEATURES > 1 {
    panic!("At most one hardware feature may be enabled.");
};

cfg_if::cfg_if! {
    if #[cfg(feature = "devkit")] {
        pub mod devkit;
        pub use devkit::*;
    } else {
        // The r1 controller board is the default target.
        pub mod r1;
        pub use r1::*;
    }
}
