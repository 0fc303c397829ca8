//! Host platform detection.
//!
//! - [`host`] snapshots environment variables and the probe root
//! - [`detection`] identifies the platform family from OS descriptors
//! - [`profile`] runs all probes once and produces a [`PlatformProfile`]

pub mod detection;
pub mod host;
pub mod profile;

pub use detection::{
    detect_kind_lenient, detect_platform, DetectedPlatform, OsRelease, PlatformKind,
    TERMUX_DEFAULT_PREFIX, TERMUX_MARKER,
};
pub use host::HostEnv;
pub use profile::{detect_profile, platform_prefix, PlatformProfile};
