/// Reconciliation sweep period (default, can be overridden via env var).
///
/// Doubles as the arming look-ahead: actions expiring within one period of
/// now get a live timer, anything further out waits for a later sweep.
pub const DEFAULT_SWEEP_PERIOD_SECONDS: u64 = 15 * 60;

/// Shortest mute a moderator can issue. Anything below this is almost
/// certainly a typo in the duration string.
pub const MIN_MUTE_SECONDS: u64 = 10;
