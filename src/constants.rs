// Frame timing
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const MAX_CATCHUP_TICKS: u32 = 5;

// World units covered by one terminal cell. Cells are roughly twice as tall as wide.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

// Files
pub const APP_NAME: &str = "flappy-owl";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "flappy-owl.log";
pub const LOG_ENV_VAR: &str = "FLAPPY_OWL_LOG";
