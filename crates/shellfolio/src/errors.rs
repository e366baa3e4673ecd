//! Exit codes for shellfolio

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when a non-interactive command produced an error line
pub const EXIT_COMMAND_FAILED: i32 = 1;

/// Exit code when the config file cannot be read or parsed
pub const EXIT_CONFIG_ERROR: i32 = 78;
