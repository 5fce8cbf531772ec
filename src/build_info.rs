use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Descriptive build metadata for the running binary.
///
/// Commit, timestamp and release flag are injected at compile time through
/// the `MUXWIRE_BUILD_COMMIT`, `MUXWIRE_BUILD_TIMESTAMP` (unix seconds) and
/// `MUXWIRE_BUILD_RELEASE` environment variables. Missing or unparsable values
/// are reported as absent rather than failing the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit_hash: Option<&'static str>,
    pub timestamp: Option<DateTime<Utc>>,
    pub release: bool,
}

/// Initialized on first access and immutable afterwards.
pub static BUILD_INFO: Lazy<BuildInfo> = Lazy::new(|| {
    BuildInfo::from_parts(
        env!("CARGO_PKG_VERSION"),
        option_env!("MUXWIRE_BUILD_COMMIT"),
        option_env!("MUXWIRE_BUILD_TIMESTAMP"),
        option_env!("MUXWIRE_BUILD_RELEASE"),
    )
});

impl BuildInfo {
    pub fn from_parts(
        version: &'static str,
        commit_hash: Option<&'static str>,
        timestamp: Option<&str>,
        release: Option<&str>,
    ) -> Self {
        Self {
            version,
            commit_hash: commit_hash.filter(|hash| !hash.is_empty()),
            timestamp: timestamp
                .and_then(|secs| secs.trim().parse::<i64>().ok())
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            release: release.is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true")),
        }
    }

    /// Returns the process-wide build descriptor.
    pub fn current() -> &'static BuildInfo {
        &BUILD_INFO
    }
}
