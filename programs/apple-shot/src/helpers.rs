use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::AppleShotError;

/// ========================================
/// Pure Game Logic Helpers
/// ========================================
///
/// Everything in this module is deterministic and side-effect free: the
/// level-difficulty generator, the fee/prize arithmetic, the session hash
/// derivation and the shot-outcome state machine. Instructions call these;
/// off-chain clients can call them too by importing the crate with the
/// `no-entrypoint` feature, which is how level configs are served without
/// a dedicated query surface.

/// Gameplay parameters for one level
///
/// Fractional values are fixed-point: `*_cs` fields are centi-units
/// (hundredths), distances and sizes are whole pixels, the time limit is
/// milliseconds (0 = untimed).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u8,
    pub target_size_px: u32,
    pub distance_px: u32,
    pub has_wind: bool,
    pub wind_speed_cs: u32,
    pub target_moves: bool,
    pub movement_speed_cs: u32,
    pub has_obstacles: bool,
    pub obstacle_count: u8,
    pub time_limit_ms: u32,
    pub arrow_speed_cs: u32,
    pub wind_variation: bool,
    pub moving_obstacles: bool,
}

/// Outcome of one validated shot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Hit below the top level: the session advances by exactly one level
    Advance { next_level: u8 },
    /// Hit on the top level: the run is complete
    Completed,
    /// Miss with lives remaining: same level is retried
    LifeLost { lives_left: u8 },
    /// Miss with no lives left: the run is over
    GameOver,
}

/// Decide what a validated shot does to the session.
///
/// `current_level` has already been checked against the submission, so the
/// only branches left are hit-vs-miss and whether any lives remain.
pub fn resolve_shot(current_level: u8, hit: bool, lives_left: u8) -> ShotOutcome {
    if hit {
        if current_level >= TOTAL_LEVELS {
            ShotOutcome::Completed
        } else {
            ShotOutcome::Advance {
                next_level: current_level + 1,
            }
        }
    } else if lives_left == 0 {
        ShotOutcome::GameOver
    } else {
        ShotOutcome::LifeLost { lives_left }
    }
}

// ========================================
// Difficulty curves
// ========================================

/// Linear interpolation between `a` and `b` with `t` in basis points.
/// Works in both directions (`b` may be smaller than `a`); `t` is clamped
/// to [0, 10000].
fn lerp(a: u32, b: u32, t_bps: u32) -> u32 {
    let t = t_bps.min(10_000) as i64;
    (a as i64 + (b as i64 - a as i64) * t / 10_000) as u32
}

/// Hardness easing curve, a piecewise-linear approximation of t^0.7.
/// Steeper than linear early on, so the first levels already bite.
const EASE_POINTS: [(u32, u32); 6] = [
    (0, 0),
    (1_000, 1_995),
    (3_000, 4_305),
    (5_000, 6_156),
    (7_500, 8_176),
    (10_000, 10_000),
];

/// Map linear progress (bps) through the easing curve (bps).
fn ease_bps(t_bps: u32) -> u32 {
    let t = t_bps.min(10_000);
    for pair in EASE_POINTS.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    10_000
}

/// Progress of `level` through the gated range starting at `start`,
/// in basis points over the remaining levels.
fn gated_progress_bps(level: u8, start: u8) -> u32 {
    ((level - start) as u32) * 10_000 / ((TOTAL_LEVELS - start) as u32)
}

/// Deterministic base configuration for a level.
///
/// Each parameter interpolates between hand-tuned endpoints on either the
/// eased hardness curve or its own gated linear ramp. Rejects levels
/// outside 1..=TOTAL_LEVELS.
pub fn base_level_config(level: u8) -> Result<LevelConfig> {
    require!(
        level >= 1 && level <= TOTAL_LEVELS,
        AppleShotError::InvalidLevel
    );

    // Normalized progress: level 1 -> 0, level 35 -> 10000.
    let t_bps = ((level - 1) as u32) * 10_000 / ((TOTAL_LEVELS - 1) as u32);
    let hardness = ease_bps(t_bps);

    let has_wind = level >= WIND_START_LEVEL;
    let wind_speed_cs = if has_wind {
        lerp(50, 450, gated_progress_bps(level, WIND_START_LEVEL))
    } else {
        0
    };

    let target_moves = level >= MOVEMENT_START_LEVEL;
    let movement_speed_cs = if target_moves {
        lerp(80, 350, gated_progress_bps(level, MOVEMENT_START_LEVEL))
    } else {
        0
    };

    let has_obstacles = level >= OBSTACLE_START_LEVEL;
    let obstacle_count = if has_obstacles {
        MAX_OBSTACLES.min((level - OBSTACLE_START_LEVEL) / 7 + 1)
    } else {
        0
    };

    let time_limit_ms = if level >= TIME_LIMIT_START_LEVEL {
        lerp(10_000, 4_000, gated_progress_bps(level, TIME_LIMIT_START_LEVEL))
    } else {
        0
    };

    Ok(LevelConfig {
        level,
        target_size_px: lerp(32, 10, hardness),
        distance_px: lerp(350, 550, hardness),
        has_wind,
        wind_speed_cs,
        target_moves,
        movement_speed_cs,
        has_obstacles,
        obstacle_count,
        time_limit_ms,
        arrow_speed_cs: lerp(1_300, 700, hardness),
        wind_variation: level >= WIND_VARIATION_START_LEVEL,
        moving_obstacles: level >= MOVING_OBSTACLE_START_LEVEL,
    })
}

/// Closed-loop difficulty multiplier from global aggregates.
///
/// Neutral until the level has a meaningful sample; then levels the crowd
/// clears too easily get harder and levels that stonewall get easier.
pub fn difficulty_multiplier_bps(attempts: u64, success_rate_bps: u16) -> u32 {
    if attempts <= MIN_SAMPLE_ATTEMPTS {
        NEUTRAL_MULTIPLIER_BPS
    } else if success_rate_bps > HIGH_WATERMARK_BPS {
        HARDER_MULTIPLIER_BPS
    } else if success_rate_bps < LOW_WATERMARK_BPS {
        EASIER_MULTIPLIER_BPS
    } else {
        NEUTRAL_MULTIPLIER_BPS
    }
}

/// Base configuration with the feedback multiplier applied.
///
/// Harder means: smaller target (floor 8px), longer distance, faster wind
/// and movement, shorter timer (floor 3s), slower arrow. Easier is the
/// same scaling in reverse. This only reads aggregates; it never writes.
pub fn adjusted_level_config(
    level: u8,
    attempts: u64,
    success_rate_bps: u16,
) -> Result<LevelConfig> {
    let base = base_level_config(level)?;
    let mult = difficulty_multiplier_bps(attempts, success_rate_bps);
    if mult == NEUTRAL_MULTIPLIER_BPS {
        return Ok(base);
    }

    let time_limit_ms = if base.time_limit_ms > 0 {
        MIN_TIME_LIMIT_MS.max(base.time_limit_ms * 10_000 / mult)
    } else {
        0
    };

    Ok(LevelConfig {
        target_size_px: MIN_TARGET_SIZE_PX.max(base.target_size_px * 10_000 / mult),
        distance_px: base.distance_px * mult / 10_000,
        wind_speed_cs: base.wind_speed_cs * mult / 10_000,
        movement_speed_cs: base.movement_speed_cs * mult / 10_000,
        time_limit_ms,
        arrow_speed_cs: base.arrow_speed_cs * 10_000 / mult,
        ..base
    })
}

// ========================================
// Money math
// ========================================

/// Split an entry fee into (prize, burn, operational) shares.
///
/// Prize and burn take their basis-point cuts; operational takes the
/// remainder, so the three always sum to the fee exactly.
pub fn fee_split(fee: u64) -> (u64, u64, u64) {
    let prize = (fee as u128 * PRIZE_POOL_BPS as u128 / 10_000) as u64;
    let burn = (fee as u128 * BURN_POOL_BPS as u128 / 10_000) as u64;
    let operational = fee - prize - burn;
    (prize, burn, operational)
}

/// Prize for a winner position as a cut of the current pool.
pub fn prize_for_position(pool: u64, position: u8) -> Result<u64> {
    require!(
        position >= 1 && position <= MAX_WINNERS,
        AppleShotError::InvalidWinnerPosition
    );
    let bps = PRIZE_POSITION_BPS[(position - 1) as usize];
    Ok((pool as u128 * bps as u128 / 10_000) as u64)
}

// ========================================
// Session hash
// ========================================

/// Derive the per-session capability hash.
///
/// Blake3 over the player, authority, season, start slot and per-player
/// session index. Every shot submission must present this value alongside
/// the session account; a caller who cannot produce it cannot drive the
/// session even if they can read the rest of the submission.
pub fn derive_session_hash(
    player: &Pubkey,
    authority: &Pubkey,
    season: &Pubkey,
    slot: u64,
    session_index: u64,
) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(player.as_ref());
    hasher.update(authority.as_ref());
    hasher.update(season.as_ref());
    hasher.update(&slot.to_le_bytes());
    hasher.update(&session_index.to_le_bytes());
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_levels() -> impl Iterator<Item = LevelConfig> {
        (1..=TOTAL_LEVELS).map(|l| base_level_config(l).unwrap())
    }

    #[test]
    fn rejects_out_of_range_levels() {
        assert!(base_level_config(0).is_err());
        assert!(base_level_config(TOTAL_LEVELS + 1).is_err());
        assert!(base_level_config(1).is_ok());
        assert!(base_level_config(TOTAL_LEVELS).is_ok());
    }

    #[test]
    fn ease_curve_is_monotonic_and_anchored() {
        assert_eq!(ease_bps(0), 0);
        assert_eq!(ease_bps(10_000), 10_000);
        let mut prev = 0;
        for t in (0..=10_000).step_by(100) {
            let y = ease_bps(t);
            assert!(y >= prev, "ease regressed at t={}", t);
            prev = y;
        }
        // Steeper than linear in the early game.
        assert!(ease_bps(1_000) > 1_000);
        assert!(ease_bps(3_000) > 3_000);
    }

    #[test]
    fn hardness_parameters_are_monotonic_across_levels() {
        let configs: Vec<_> = all_levels().collect();
        for pair in configs.windows(2) {
            assert!(pair[1].target_size_px <= pair[0].target_size_px);
            assert!(pair[1].distance_px >= pair[0].distance_px);
            assert!(pair[1].arrow_speed_cs <= pair[0].arrow_speed_cs);
            assert!(pair[1].wind_speed_cs >= pair[0].wind_speed_cs);
            assert!(pair[1].movement_speed_cs >= pair[0].movement_speed_cs);
            assert!(pair[1].obstacle_count >= pair[0].obstacle_count);
        }
    }

    #[test]
    fn endpoint_values_match_tuning() {
        let first = base_level_config(1).unwrap();
        assert_eq!(first.target_size_px, 32);
        assert_eq!(first.distance_px, 350);
        assert_eq!(first.arrow_speed_cs, 1_300);

        let last = base_level_config(TOTAL_LEVELS).unwrap();
        assert_eq!(last.target_size_px, 10);
        assert_eq!(last.distance_px, 550);
        assert_eq!(last.arrow_speed_cs, 700);
        assert_eq!(last.wind_speed_cs, 450);
        assert_eq!(last.movement_speed_cs, 350);
        assert_eq!(last.time_limit_ms, 4_000);
        assert_eq!(last.obstacle_count, MAX_OBSTACLES);
    }

    #[test]
    fn feature_gates_activate_at_their_levels() {
        let before = base_level_config(WIND_START_LEVEL - 1).unwrap();
        assert!(!before.has_wind);
        assert_eq!(before.wind_speed_cs, 0);
        let at = base_level_config(WIND_START_LEVEL).unwrap();
        assert!(at.has_wind);
        assert_eq!(at.wind_speed_cs, 50);

        assert!(!base_level_config(MOVEMENT_START_LEVEL - 1).unwrap().target_moves);
        assert!(base_level_config(MOVEMENT_START_LEVEL).unwrap().target_moves);

        assert!(!base_level_config(OBSTACLE_START_LEVEL - 1).unwrap().has_obstacles);
        let obstacles = base_level_config(OBSTACLE_START_LEVEL).unwrap();
        assert!(obstacles.has_obstacles);
        assert_eq!(obstacles.obstacle_count, 1);

        assert_eq!(base_level_config(TIME_LIMIT_START_LEVEL - 1).unwrap().time_limit_ms, 0);
        assert_eq!(
            base_level_config(TIME_LIMIT_START_LEVEL).unwrap().time_limit_ms,
            10_000
        );

        assert!(!base_level_config(WIND_VARIATION_START_LEVEL - 1).unwrap().wind_variation);
        assert!(base_level_config(WIND_VARIATION_START_LEVEL).unwrap().wind_variation);

        assert!(!base_level_config(MOVING_OBSTACLE_START_LEVEL - 1).unwrap().moving_obstacles);
        assert!(base_level_config(MOVING_OBSTACLE_START_LEVEL).unwrap().moving_obstacles);
    }

    #[test]
    fn multiplier_needs_a_sample_before_adjusting() {
        assert_eq!(difficulty_multiplier_bps(0, 9_000), NEUTRAL_MULTIPLIER_BPS);
        assert_eq!(
            difficulty_multiplier_bps(MIN_SAMPLE_ATTEMPTS, 9_000),
            NEUTRAL_MULTIPLIER_BPS
        );
        assert_eq!(
            difficulty_multiplier_bps(MIN_SAMPLE_ATTEMPTS + 1, 9_000),
            HARDER_MULTIPLIER_BPS
        );
        assert_eq!(
            difficulty_multiplier_bps(MIN_SAMPLE_ATTEMPTS + 1, 1_000),
            EASIER_MULTIPLIER_BPS
        );
        assert_eq!(
            difficulty_multiplier_bps(MIN_SAMPLE_ATTEMPTS + 1, 5_000),
            NEUTRAL_MULTIPLIER_BPS
        );
    }

    #[test]
    fn harder_multiplier_scales_in_the_harder_direction() {
        let base = base_level_config(25).unwrap();
        let harder = adjusted_level_config(25, 100, 9_000).unwrap();
        assert!(harder.target_size_px < base.target_size_px);
        assert!(harder.distance_px > base.distance_px);
        assert!(harder.wind_speed_cs > base.wind_speed_cs);
        assert!(harder.time_limit_ms < base.time_limit_ms);
        assert!(harder.arrow_speed_cs < base.arrow_speed_cs);

        let easier = adjusted_level_config(25, 100, 1_000).unwrap();
        assert!(easier.target_size_px > base.target_size_px);
        assert!(easier.distance_px < base.distance_px);
        assert!(easier.time_limit_ms > base.time_limit_ms);
    }

    #[test]
    fn adjusted_config_respects_floors() {
        // Level 35 target is already 10px; the harder multiplier would push
        // it to 8.69 -> clamped to the 8px floor.
        let hardest = adjusted_level_config(TOTAL_LEVELS, 100, 9_000).unwrap();
        assert_eq!(hardest.target_size_px, MIN_TARGET_SIZE_PX);
        // Level 35 timer is 4000ms; harder would push it under 3478 -> floor.
        assert!(hardest.time_limit_ms >= MIN_TIME_LIMIT_MS);
        // Untimed levels stay untimed no matter the multiplier.
        let early = adjusted_level_config(5, 100, 9_000).unwrap();
        assert_eq!(early.time_limit_ms, 0);
    }

    #[test]
    fn neutral_multiplier_returns_base_unchanged() {
        let base = base_level_config(12).unwrap();
        let adjusted = adjusted_level_config(12, 5, 9_000).unwrap();
        assert_eq!(base, adjusted);
    }

    #[test]
    fn fee_split_shares_sum_to_the_fee() {
        let (prize, burn, operational) = fee_split(DEFAULT_FEE_PER_GAME);
        assert_eq!(prize, 700_000);
        assert_eq!(burn, 200_000);
        assert_eq!(operational, 100_000);
        assert_eq!(prize + burn + operational, DEFAULT_FEE_PER_GAME);

        // Remainder lands in operational on awkward fees.
        let (p, b, o) = fee_split(3);
        assert_eq!(p + b + o, 3);
    }

    #[test]
    fn position_prizes_take_their_pool_cut() {
        assert_eq!(prize_for_position(1_000_000, 1).unwrap(), 100_000);
        assert_eq!(prize_for_position(1_000_000, 2).unwrap(), 60_000);
        assert_eq!(prize_for_position(1_000_000, 3).unwrap(), 40_000);
        assert!(prize_for_position(1_000_000, 0).is_err());
        assert!(prize_for_position(1_000_000, MAX_WINNERS + 1).is_err());
    }

    #[test]
    fn shot_outcomes_follow_the_state_machine() {
        assert_eq!(
            resolve_shot(1, true, 3),
            ShotOutcome::Advance { next_level: 2 }
        );
        assert_eq!(
            resolve_shot(TOTAL_LEVELS - 1, true, 3),
            ShotOutcome::Advance {
                next_level: TOTAL_LEVELS
            }
        );
        assert_eq!(resolve_shot(TOTAL_LEVELS, true, 0), ShotOutcome::Completed);
        assert_eq!(
            resolve_shot(34, false, 2),
            ShotOutcome::LifeLost { lives_left: 2 }
        );
        assert_eq!(resolve_shot(34, false, 0), ShotOutcome::GameOver);
    }

    #[test]
    fn session_hash_is_deterministic_and_input_sensitive() {
        let player = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let season = Pubkey::new_unique();

        let a = derive_session_hash(&player, &authority, &season, 100, 0);
        let b = derive_session_hash(&player, &authority, &season, 100, 0);
        assert_eq!(a, b);

        assert_ne!(a, derive_session_hash(&player, &authority, &season, 101, 0));
        assert_ne!(a, derive_session_hash(&player, &authority, &season, 100, 1));
        assert_ne!(
            a,
            derive_session_hash(&Pubkey::new_unique(), &authority, &season, 100, 0)
        );
    }
}
