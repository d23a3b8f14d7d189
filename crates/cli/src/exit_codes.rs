//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad source)   |
//! | 10-19   | load             | Script load failures (`--plain` only)    |
//!
//! In the interactive viewer a failed load is shown in a notification and
//! the viewer keeps running, so the load codes are never returned there.

use scriptview_io::LoadError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (terminal setup, draw errors).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unparseable source, no terminal.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Load (10-19)
// =============================================================================

/// Transport failure (DNS, connection refused, TLS).
pub const EXIT_LOAD_NETWORK: u8 = 10;

/// Server answered with a non-success status.
pub const EXIT_LOAD_HTTP: u8 = 11;

/// Body was not a JSON array of line records.
pub const EXIT_LOAD_PARSE: u8 = 12;

/// Local script file could not be read.
pub const EXIT_LOAD_IO: u8 = 13;

/// Map a LoadError to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::Network(_) => EXIT_LOAD_NETWORK,
        LoadError::Http(..) => EXIT_LOAD_HTTP,
        LoadError::Parse(_) => EXIT_LOAD_PARSE,
        LoadError::Io(_) => EXIT_LOAD_IO,
    }
}
