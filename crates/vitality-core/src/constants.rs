/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score assigned to a newly tracked relationship.
pub const INITIAL_SCORE: f64 = 50.0;

/// Upper bound of the vitality score.
pub const MAX_SCORE: f64 = 100.0;

/// Lower bound of the vitality score.
pub const MIN_SCORE: f64 = 0.0;

/// Seconds in one day, used for fractional elapsed-day computations.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fallback base points when neither a category nor a legacy type is known.
pub const FALLBACK_BASE_SCORE: f64 = 15.0;

/// Note length (chars) above which an interaction earns one depth point.
pub const NOTE_DEPTH_SHORT: usize = 50;

/// Note length (chars) above which an interaction earns a second depth point.
/// Also the cutoff for counting an interaction as a "deep" weave.
pub const NOTE_DEPTH_LONG: usize = 150;

/// Scope key used for account-wide badges.
pub const GLOBAL_SCOPE_KEY: &str = "global";

