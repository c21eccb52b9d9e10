/// Backend statuses at or above this count as checkout errors.
pub const ERROR_STATUS_FLOOR: u16 = 500;

/// Slow-request analysis counts statuses at or above this as failed.
pub const SLOW_FAILURE_STATUS_FLOOR: u16 = 400;

/// Checkout requests slower than this (seconds) are reported as slow.
pub const SLOW_REQUEST_SECS: f64 = 10.0;

pub const TOP_ERROR_URLS: usize = 10;
pub const TOP_URLS_PER_BUCKET: usize = 3;
pub const TOP_ERROR_USER_AGENTS: usize = 10;
pub const BOT_USER_AGENT_SAMPLES: usize = 10;

/// User agents are shortened to this many characters before counting.
pub const USER_AGENT_DISPLAY_CHARS: usize = 80;
pub const BOT_USER_AGENT_DISPLAY_CHARS: usize = 180;
