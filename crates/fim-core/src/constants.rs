//! Shared constants for the fim engine.

/// fim version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of hashing threads (0 = rayon default).
pub const DEFAULT_THREADS: usize = 0;

/// Upper bound accepted for `scan.threads`.
pub const MAX_THREADS: usize = 1024;

/// Read buffer used when streaming a file through the hasher.
pub const FINGERPRINT_CHUNK_SIZE: usize = 64 * 1024;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Project config file looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "fim.toml";

/// User config directory under the home directory.
pub const USER_CONFIG_DIR: &str = ".fim";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "FIM_LOG";

/// Filter used when `FIM_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "fim=info";

/// Filter used for `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "fim=debug";
