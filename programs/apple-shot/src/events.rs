/// Events module for the Apple Shot program
/// Contains all event structures that are emitted by the program instructions
/// for off-chain tracking and monitoring.
///
/// Events that belong to the activity feed carry a monotonic `seq` taken
/// from `GameConfig.activity_count`, so clients can poll "everything after
/// cursor" exactly as they would an append-only table. Chat messages use
/// the separate `chat_count` sequence.
use anchor_lang::prelude::*;

/// Emitted when the game is initialized
#[event]
pub struct GameInitialized {
    pub admin: Pubkey,
    pub fee_mint: Pubkey,
    pub fee_per_game: u64,
}

/// Emitted when a new season opens
#[event]
pub struct SeasonStarted {
    pub season: Pubkey,
    pub index: u64,
    pub carried_over_pool: u64,
}

/// Emitted when a season's winner quota fills and it closes
#[event]
pub struct SeasonFinished {
    pub season: Pubkey,
    pub index: u64,
    pub carry_over: u64,
    pub total_completions: u64,
}

/// Emitted when a player registers or re-registers
#[event]
pub struct PlayerRegistered {
    pub player: Pubkey,
    pub authority: Pubkey,
    pub username: String,
}

/// Emitted when a player changes their payout wallet
#[event]
pub struct PayoutWalletUpdated {
    pub player: Pubkey,
    pub payout_wallet: Pubkey,
}

/// Emitted when a paid session is created
#[event]
pub struct GameStarted {
    pub session: Pubkey,
    pub player: Pubkey,
    pub season: Pubkey,
    pub fee: u64,
    pub prize_pool_add: u64,
    pub burn_pool_add: u64,
}

/// Activity: a level was cleared and the session advanced
#[event]
pub struct LevelPassed {
    pub seq: u64,
    pub session: Pubkey,
    pub username: String,
    pub level: u8,
    pub next_level: u8,
}

/// Activity: a miss that cost a life but not the run
#[event]
pub struct LifeLost {
    pub seq: u64,
    pub session: Pubkey,
    pub username: String,
    pub level: u8,
    pub lives_left: u8,
}

/// Activity: a miss with no lives left ended the run
#[event]
pub struct GameOver {
    pub seq: u64,
    pub session: Pubkey,
    pub username: String,
    pub level: u8,
}

/// Activity: all 35 levels cleared
#[event]
pub struct RunCompleted {
    pub seq: u64,
    pub session: Pubkey,
    pub username: String,
    pub total_shots: u32,
    pub total_hits: u32,
}

/// Activity: a winner position was awarded
#[event]
pub struct PrizeAwarded {
    pub seq: u64,
    pub season: Pubkey,
    pub player: Pubkey,
    pub username: String,
    pub position: u8,
    pub amount: u64,
}

/// Activity: the season burn pool was flushed and burned
#[event]
pub struct BurnFlushed {
    pub seq: u64,
    pub season: Pubkey,
    pub amount: u64,
    pub trigger_completions: u64,
}

/// Emitted when a winner transfers their prize out of the vault
#[event]
pub struct PrizeClaimed {
    pub winner: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
}

/// A chat message; `seq` comes from the chat sequence
#[event]
pub struct ChatPosted {
    pub seq: u64,
    pub player: Pubkey,
    pub username: String,
    pub message: String,
}

/// Emitted when the admin pauses or unpauses new games
#[event]
pub struct GamePauseToggled {
    pub admin: Pubkey,
    pub paused: bool,
}

/// Emitted when the admin changes the entry fee
#[event]
pub struct FeeUpdated {
    pub admin: Pubkey,
    pub fee_per_game: u64,
}

/// Emitted when admin privileges are transferred
#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

/// Emitted when the admin withdraws from the operational pool
#[event]
pub struct OperationalFeesClaimed {
    pub admin: Pubkey,
    pub amount: u64,
}
