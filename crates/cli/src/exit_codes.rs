//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success, report written                                   |
//! | 1    | General error (unspecified)                               |
//! | 2    | Usage error (bad args, input file not given)              |
//! | 3    | Schema error: key columns not found, no report produced   |
//! | 4    | I/O error: cannot read an input or write the report       |
//! | 5    | Invalid config                                            |
//!
//! Missing rows are not an error: a report with highlighted rows still
//! exits 0.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required inputs.
/// Matches clap's own exit code for argument errors.
pub const EXIT_USAGE: u8 = 2;

/// One or more sources failed column resolution.
pub const EXIT_SCHEMA: u8 = 3;

/// Input could not be read or the report could not be written.
pub const EXIT_IO: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;
