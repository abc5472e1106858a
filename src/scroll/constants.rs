pub const THROTTLE_WINDOW_MS: u64 = 75;
pub const IDLE_WINDOW_MS: u64 = 250;
