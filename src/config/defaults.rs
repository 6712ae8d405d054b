// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Base URL of the processing service when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout (in seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Minimum request timeout (in seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Environment
// ==========================================================================

/// Environment variable overriding the service base URL.
pub const ENV_API_URL: &str = "SALES_STUDIO_API_URL";

// Compile-time validation
const _: () = {
    assert!(MIN_TIMEOUT_SECS > 0);
    assert!(MIN_TIMEOUT_SECS <= DEFAULT_TIMEOUT_SECS);
    assert!(DEFAULT_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);
};
