/// States module for the Apple Shot program
///
/// Contains all account structures and their implementations used to store
/// program state on-chain.
use anchor_lang::prelude::*;

use crate::constants::*;

/// Lifecycle of a prize-accounting season
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum SeasonStatus {
    /// Accepting sessions; winner positions still open
    Active,
    /// Winner quota filled; terminal
    Finished,
}

/// Main state account for the game
///
/// Singleton PDA holding the admin key, the fee configuration, the pointer
/// to the active season and the global feed counters.
#[account]
#[derive(InitSpace)]
pub struct GameConfig {
    /// Public key of the admin who controls the game
    pub admin: Pubkey,
    /// SPL mint all fees and prizes are denominated in
    pub fee_mint: Pubkey,
    /// Token vault (ATA owned by this PDA) that holds pools and prizes
    pub fee_vault: Pubkey,
    /// Entry fee per game in base units of the fee mint
    pub fee_per_game: u64,
    /// Whether new games are paused (admin control)
    pub paused: bool,
    /// Index of the single active season
    pub active_season: u64,
    /// Number of seasons created so far
    pub season_count: u64,
    /// Operational share of collected fees, claimable by the admin
    pub operational_pool: u64,
    /// Lifetime fees collected across all seasons
    pub total_fees_collected: u64,
    /// Lifetime amount burned across all seasons
    pub total_burned: u64,
    /// Monotonic sequence for chat messages
    pub chat_count: u64,
    /// Monotonic sequence for activity feed entries
    pub activity_count: u64,
    /// PDA bump seed for this account
    pub bump: u8,
}

impl GameConfig {
    /// Claim the next activity feed sequence number
    pub fn next_activity_seq(&mut self) -> u64 {
        let seq = self.activity_count;
        self.activity_count += 1;
        seq
    }

    /// Claim the next chat sequence number
    pub fn next_chat_seq(&mut self) -> u64 {
        let seq = self.chat_count;
        self.chat_count += 1;
        seq
    }
}

/// A prize-accounting epoch
///
/// Exactly one season is `Active` at any time; `GameConfig.active_season`
/// points at it and only changes in the instruction that finishes the
/// previous season and creates its successor.
#[account]
#[derive(InitSpace)]
pub struct Season {
    /// 1-based season index (also the PDA seed)
    pub index: u64,
    /// Active or Finished
    pub status: SeasonStatus,
    /// Prize pool in fee-mint base units; debited as positions are awarded
    pub prize_pool: u64,
    /// Burn pool in fee-mint base units; flushed on the completion trigger
    pub burn_pool: u64,
    /// Total fees collected during this season
    pub total_fees: u64,
    /// Completed runs settled against this season
    pub total_completions: u64,
    /// Winner positions awarded so far (0..=MAX_WINNERS)
    pub winner_count: u8,
    /// Season start timestamp
    pub started_at: i64,
    /// Season finish timestamp (0 while active)
    pub finished_at: i64,
    /// PDA bump seed for this account
    pub bump: u8,
}

/// Registered player identity and aggregate stats
///
/// Seeded by the username, which makes usernames globally unique. The
/// username and controlling authority never change after creation; the
/// payout wallet may be updated.
#[account]
#[derive(InitSpace)]
pub struct PlayerProfile {
    /// Wallet that signs for this player
    pub authority: Pubkey,
    /// Wallet prizes are paid out to (may differ from the authority)
    pub payout_wallet: Pubkey,
    /// Display name, 2-20 bytes
    #[max_len(MAX_USERNAME_LEN)]
    pub username: String,
    /// Registration timestamp (0 means the account was never initialized)
    pub created_at: i64,
    /// Sessions started by this player (also the next session PDA seed)
    pub session_count: u64,
    /// Games played, for all-time leaderboards
    pub games_played: u64,
    /// Highest level ever reached
    pub best_level: u8,
    /// Full 35-level completions
    pub total_completions: u64,
    /// PDA bump seed for this account
    pub bump: u8,
}

/// One play-through of the 35 levels
///
/// Created by `start_game`, mutated only by `submit_shot` until it is
/// finished, then settled once by `settle_completion`.
#[account]
#[derive(InitSpace)]
pub struct GameSession {
    /// Player profile this session belongs to
    pub player: Pubkey,
    /// Signing wallet, cached from the profile at start
    pub authority: Pubkey,
    /// Season this session's fee was credited to
    pub season: Pubkey,
    /// Per-player session index (also the PDA seed)
    pub index: u64,
    /// Capability presented with every shot submission
    pub session_hash: [u8; 32],
    /// Current level, 1-based; advances by exactly 1 per validated hit
    pub current_level: u8,
    /// Shots taken
    pub total_shots: u32,
    /// Hits landed
    pub total_hits: u32,
    /// Shots missed
    pub total_misses: u32,
    /// Set when level 35 is cleared; terminal
    pub completed: bool,
    /// Set once the completion has gone through prize accounting
    pub prize_settled: bool,
    /// Fee paid at start, in fee-mint base units
    pub fee_paid: u64,
    /// Session start timestamp
    pub started_at: i64,
    /// Session end timestamp; 0 while the run is in play
    pub finished_at: i64,
    /// Slot of the most recent shot (0 before the first shot)
    pub last_shot_slot: u64,
    /// PDA bump seed for this account
    pub bump: u8,
}

impl GameSession {
    /// A session is over once a finish timestamp is set, whether it ended
    /// in completion or in a spent miss.
    pub fn is_over(&self) -> bool {
        self.finished_at != 0
    }
}

/// Global per-level aggregate stats, one fixed row per level
///
/// Zero-copy: the board is a single account with all 35 rows pre-seeded
/// (zeroed) at bootstrap, so every level row exists from the first shot.
#[account(zero_copy)]
pub struct LevelStatsBoard {
    pub entries: [LevelStats; TOTAL_LEVELS as usize],
}

impl LevelStatsBoard {
    pub const LEN: usize = (TOTAL_LEVELS as usize) * LevelStats::LEN;
}

/// One row of the level stats board
#[zero_copy]
pub struct LevelStats {
    /// Shots ever submitted at this level
    pub attempts: u64,
    /// Hits ever landed at this level
    pub successes: u64,
    /// successes / attempts in basis points, recomputed on every shot
    pub success_rate_bps: u16,
    pub _padding: [u8; 6],
}

impl LevelStats {
    pub const LEN: usize = 8 + 8 + 2 + 6;

    /// Fold one shot into the aggregate and refresh the rolling rate.
    pub fn record_attempt(&mut self, hit: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if hit {
            self.successes = self.successes.saturating_add(1);
        }
        self.success_rate_bps = (self.successes.saturating_mul(10_000) / self.attempts) as u16;
    }
}

/// A season winner position
///
/// The PDA is seeded by (season, position), which makes each position
/// unique per season and the award at-most-once.
#[account]
#[derive(InitSpace)]
pub struct Winner {
    /// Season the position was won in
    pub season: Pubkey,
    /// Winning player profile
    pub player: Pubkey,
    /// The completed session
    pub session: Pubkey,
    /// Position, 1..=MAX_WINNERS
    pub position: u8,
    /// Awarded amount in fee-mint base units
    pub prize_amount: u64,
    /// Whether the prize has been transferred out of the vault
    pub claimed: bool,
    /// Award timestamp
    pub awarded_at: i64,
    /// PDA bump seed for this account
    pub bump: u8,
}

/// Immutable record of a burn-pool flush
///
/// Keyed by (season, triggering completion count); the PDA doubles as the
/// at-most-once guard for the flush.
#[account]
#[derive(InitSpace)]
pub struct BurnReceipt {
    /// Season whose burn pool was flushed
    pub season: Pubkey,
    /// Amount burned, in fee-mint base units
    pub amount: u64,
    /// Completion count that triggered the flush
    pub trigger_completions: u64,
    /// Flush timestamp
    pub burned_at: i64,
    /// PDA bump seed for this account
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_attempt_tracks_incremental_ratio() {
        let mut row = LevelStats {
            attempts: 0,
            successes: 0,
            success_rate_bps: 0,
            _padding: [0; 6],
        };

        row.record_attempt(true);
        assert_eq!(row.attempts, 1);
        assert_eq!(row.successes, 1);
        assert_eq!(row.success_rate_bps, 10_000);

        row.record_attempt(false);
        assert_eq!(row.attempts, 2);
        assert_eq!(row.successes, 1);
        assert_eq!(row.success_rate_bps, 5_000);

        row.record_attempt(false);
        assert_eq!(row.success_rate_bps, 3_333);
    }

    #[test]
    fn feed_sequences_are_monotonic_and_independent() {
        let mut config = GameConfig {
            admin: Pubkey::default(),
            fee_mint: Pubkey::default(),
            fee_vault: Pubkey::default(),
            fee_per_game: DEFAULT_FEE_PER_GAME,
            paused: false,
            active_season: FIRST_SEASON_INDEX,
            season_count: 1,
            operational_pool: 0,
            total_fees_collected: 0,
            total_burned: 0,
            chat_count: 0,
            activity_count: 0,
            bump: 255,
        };

        assert_eq!(config.next_activity_seq(), 0);
        assert_eq!(config.next_activity_seq(), 1);
        assert_eq!(config.next_chat_seq(), 0);
        assert_eq!(config.next_activity_seq(), 2);
        assert_eq!(config.next_chat_seq(), 1);
    }
}
