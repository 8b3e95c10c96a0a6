/// Version of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source revision, supplied by the build environment.
pub const REVISION: Option<&str> = option_env!("TABLO_METADATA_REVISION");

pub const BUILD_TIMESTAMP: Option<&str> = option_env!("BUILD_TIMESTAMP");

/// Name of the service whose wire format this crate speaks.
pub const SERVICE: &str = "tablo";
