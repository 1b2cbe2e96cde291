/// The number of settled rounds shown in the history.
pub const HISTORY_LIMIT: usize = 10;

/// The smallest wager the client will submit, in tokens.
pub const MIN_WAGER: u64 = 10;

/// The value the amount field is reset to after a successful wager.
pub const DEFAULT_WAGER: u64 = 10;

/// The bonus every new wallet is created with, in tokens.
pub const STARTING_BALANCE: u64 = 1_000;

/// The period of the countdown ticker, in milliseconds.
pub const TICK_MS: u64 = 1_000;

/// The pause between a settlement call and the next status poll, in milliseconds.
pub const SETTLEMENT_GRACE_MS: u64 = 3_000;

// ============================================================================
// PAYOUTS
// ============================================================================

/// Red and green pay out twice the stake (stake plus winnings).
pub const RED_GREEN_PAYOUT: u64 = 2;

/// Violet pays out five times the stake.
pub const VIOLET_PAYOUT: u64 = 5;

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Current round, time remaining and recent results.
pub const GAME_STATUS_PATH: &str = "/api/game/status";

/// Forces settlement of the current round.
pub const RUN_ROUND_PATH: &str = "/api/game/run_round";

/// Places a wager on the open round.
pub const PREDICT_PATH: &str = "/api/game/predict";

/// Wallet balance of the logged in user.
pub const BALANCE_PATH: &str = "/api/wallet/balance";

/// Creates an account.
pub const REGISTER_PATH: &str = "/api/register";

/// Starts a session; the response sets the session cookie.
pub const LOGIN_PATH: &str = "/api/login";

/// Ends the session.
pub const LOGOUT_PATH: &str = "/api/logout";

/// Reports whether the session cookie is logged in.
pub const SESSION_PATH: &str = "/api/status";
