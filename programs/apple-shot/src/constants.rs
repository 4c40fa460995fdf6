use anchor_lang::prelude::*;
/// Constants module for the Apple Shot program
///
/// Contains all program-wide tuning values: tokenomics, difficulty
/// curve endpoints, anti-cheat thresholds and PDA seeds.

/// Total number of levels in a run
#[constant]
pub const TOTAL_LEVELS: u8 = 35;

/// Minimum slots between two shots of the same session (~800ms at 400ms/slot)
#[constant]
pub const MIN_SHOT_INTERVAL_SLOTS: u64 = 2;

/// Entry fee per game in base units of the fee mint (default, admin-adjustable)
#[constant]
pub const DEFAULT_FEE_PER_GAME: u64 = 1_000_000;

/// Share of each fee credited to the season prize pool (basis points)
#[constant]
pub const PRIZE_POOL_BPS: u64 = 7_000;

/// Share of each fee credited to the season burn pool (basis points)
#[constant]
pub const BURN_POOL_BPS: u64 = 2_000;

// The operational share is the remainder of the fee after the prize and
// burn cuts, so the three shares always sum to the fee exactly.

/// Number of winner positions per season
#[constant]
pub const MAX_WINNERS: u8 = 3;

/// Prize per position as basis points of the season prize pool (1st/2nd/3rd)
pub const PRIZE_POSITION_BPS: [u64; 3] = [1_000, 600, 400];

/// Every this many season completions the burn pool is flushed
#[constant]
pub const BURN_TRIGGER_COMPLETIONS: u64 = 10;

/// Index of the season created at bootstrap
#[constant]
pub const FIRST_SEASON_INDEX: u64 = 1;

// ========================================
// Difficulty tuning
// ========================================

/// Attempts required before the feedback multiplier kicks in
#[constant]
pub const MIN_SAMPLE_ATTEMPTS: u64 = 20;

/// Success rate above which a level is scaled harder (basis points)
#[constant]
pub const HIGH_WATERMARK_BPS: u16 = 6_500;

/// Success rate below which a level is scaled easier (basis points)
#[constant]
pub const LOW_WATERMARK_BPS: u16 = 2_500;

/// Multiplier applied to over-performing levels (basis points)
#[constant]
pub const HARDER_MULTIPLIER_BPS: u32 = 11_500;

/// Multiplier applied to under-performing levels (basis points)
#[constant]
pub const EASIER_MULTIPLIER_BPS: u32 = 8_500;

/// Neutral multiplier (basis points)
#[constant]
pub const NEUTRAL_MULTIPLIER_BPS: u32 = 10_000;

/// First level with wind
#[constant]
pub const WIND_START_LEVEL: u8 = 3;

/// First level with a moving target
#[constant]
pub const MOVEMENT_START_LEVEL: u8 = 8;

/// First level with obstacles
#[constant]
pub const OBSTACLE_START_LEVEL: u8 = 15;

/// First level with a shot timer
#[constant]
pub const TIME_LIMIT_START_LEVEL: u8 = 22;

/// First level where wind changes mid-flight
#[constant]
pub const WIND_VARIATION_START_LEVEL: u8 = 28;

/// First level with moving obstacles
#[constant]
pub const MOVING_OBSTACLE_START_LEVEL: u8 = 30;

/// Maximum obstacle count at the top of the curve
#[constant]
pub const MAX_OBSTACLES: u8 = 3;

/// Hard floor for the adjusted target size (pixels)
#[constant]
pub const MIN_TARGET_SIZE_PX: u32 = 8;

/// Hard floor for the adjusted time limit (milliseconds)
#[constant]
pub const MIN_TIME_LIMIT_MS: u32 = 3_000;

// ========================================
// Input bounds
// ========================================

/// Minimum username length in bytes
#[constant]
pub const MIN_USERNAME_LEN: usize = 2;

/// Maximum username length in bytes
#[constant]
pub const MAX_USERNAME_LEN: usize = 20;

/// Maximum chat message length in bytes
#[constant]
pub const MAX_CHAT_MESSAGE_LEN: usize = 200;

/// Seeds for PDA derivation

/// Seed for the game config PDA
#[constant]
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed for season PDAs
#[constant]
pub const SEASON_SEED: &[u8] = b"season";

/// Seed for player profile PDAs
#[constant]
pub const PLAYER_SEED: &[u8] = b"player";

/// Seed for game session PDAs
#[constant]
pub const SESSION_SEED: &[u8] = b"session";

/// Seed for the global level stats board PDA
#[constant]
pub const LEVEL_STATS_SEED: &[u8] = b"level_stats";

/// Seed for winner PDAs
#[constant]
pub const WINNER_SEED: &[u8] = b"winner";

/// Seed for burn receipt PDAs
#[constant]
pub const BURN_SEED: &[u8] = b"burn";
