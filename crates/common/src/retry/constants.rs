// Constants for retry module

/// Maximum exponent for exponential backoff calculation to prevent overflow
pub const MAX_BACKOFF_EXPONENT: u32 = 30;

/// Growth factor applied to the delay after each consecutive failure
pub const BACKOFF_MULTIPLIER: u64 = 2;
