/// Constants used throughout the cyclewatch codebase
// Command separator accepted on the command line
pub const COMMAND_SEPARATOR: &str = "&&";

// Timer defaults, in seconds
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_CYCLE_INTERVAL_SECS: f64 = 5.0;

// Display loop tick, in milliseconds
pub const DISPLAY_TICK_MS: u64 = 10;

// Environment variable names
pub const CYCLEWATCH_INTERVAL_VAR: &str = "CYCLEWATCH_INTERVAL";
pub const CYCLEWATCH_CYCLE_INTERVAL_VAR: &str = "CYCLEWATCH_CYCLE_INTERVAL";
pub const CYCLEWATCH_LOG_FILE_VAR: &str = "CYCLEWATCH_LOG_FILE";
