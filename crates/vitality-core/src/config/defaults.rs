//! Default values for every configuration knob.

// --- Decay ---
pub const DEFAULT_INNER_DECAY_RATE: f64 = 2.5;
pub const DEFAULT_CLOSE_DECAY_RATE: f64 = 1.5;
pub const DEFAULT_COMMUNITY_DECAY_RATE: f64 = 0.5;
pub const DEFAULT_INNER_TOLERANCE_DAYS: f64 = 7.0;
pub const DEFAULT_CLOSE_TOLERANCE_DAYS: f64 = 14.0;
pub const DEFAULT_COMMUNITY_TOLERANCE_DAYS: f64 = 21.0;
pub const DEFAULT_GENTLE_DECAY_FACTOR: f64 = 0.5;
pub const DEFAULT_ACCELERATED_DECAY_FACTOR: f64 = 1.5;
pub const DEFAULT_DORMANT_SCORE_THRESHOLD: f64 = 10.0;

// --- Momentum / resilience ---
pub const DEFAULT_MOMENTUM_RESET: f64 = 15.0;
pub const DEFAULT_MOMENTUM_DECAY_PER_DAY: f64 = 1.0;
pub const DEFAULT_MOMENTUM_BONUS: f64 = 1.15;
pub const DEFAULT_RESILIENCE_MIN_RATED: u32 = 5;
pub const DEFAULT_RESILIENCE_POSITIVE_STEP: f64 = 0.008;
pub const DEFAULT_RESILIENCE_NEGATIVE_STEP: f64 = 0.005;

// --- Scoring ---
pub const DEFAULT_QUALITY_MULTIPLIER_FLOOR: f64 = 0.7;
pub const DEFAULT_QUALITY_MULTIPLIER_SPAN: f64 = 0.6;
pub const DEFAULT_DILUTION_RESTORE_FRACTION: f64 = 0.2;
pub const DEFAULT_DILUTION_RESTORE_MIN_QUALITY: u8 = 4;

// --- Pattern learning ---
pub const DEFAULT_PATTERN_MIN_INTERACTIONS: usize = 5;
pub const DEFAULT_PATTERN_MIN_GAPS: usize = 4;
pub const DEFAULT_PATTERN_MAX_CV: f64 = 0.6;
pub const DEFAULT_PATTERN_TOLERANCE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_PATTERN_MIN_TOLERANCE_DAYS: f64 = 2.0;
pub const DEFAULT_PATTERN_MAX_TOLERANCE_DAYS: f64 = 60.0;

// --- Effectiveness learning ---
pub const DEFAULT_MATURATION_DAYS: i64 = 7;
pub const DEFAULT_EFFECTIVENESS_ALPHA: f64 = 0.3;
pub const DEFAULT_EFFECTIVENESS_MIN_OUTCOMES: u32 = 3;
pub const DEFAULT_EFFECTIVENESS_FULL_CONFIDENCE_OUTCOMES: u32 = 10;
pub const DEFAULT_SAMPLE_RATIO_MAX: f64 = 3.0;
pub const DEFAULT_LEARNED_RATIO_MIN: f64 = 0.5;
pub const DEFAULT_LEARNED_RATIO_MAX: f64 = 1.5;
pub const DEFAULT_MIN_EXPECTED_IMPACT: f64 = 0.01;

// --- Reciprocity ---
pub const DEFAULT_RECIPROCITY_MIN_SAMPLES: u32 = 4;
pub const DEFAULT_RECIPROCITY_BALANCED_LOW: f64 = 0.35;
pub const DEFAULT_RECIPROCITY_BALANCED_HIGH: f64 = 0.65;

// --- Queue ---
pub const DEFAULT_QUEUE_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_WORKER_INTERVAL_SECS: u64 = 60;

// --- Storage / observability ---
pub const DEFAULT_DB_PATH: &str = "vitality.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
