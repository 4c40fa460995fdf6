//! Apple Shot Program
//!
//! A Solana program implementing the Apple Shot archery game:
//! - Players register a unique username and start paid sessions that walk
//!   35 levels of procedurally scaled difficulty
//! - Entry fees split 70/20/10 into a seasonal prize pool, a burn pool and
//!   an operational pool
//! - Full completions claim positional prizes (10%/6%/4% of the pool);
//!   the third winner closes the season and rolls the remainder forward
//! - Every tenth completion burns the season's burn pool out of the vault
//! - Global per-level hit rates feed back into the difficulty curves
//!
//! The program supports admin controls for pausing and fee tuning, and
//! emits sequence-numbered events for the chat and activity feeds.

#![allow(deprecated)]
#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod states;

use contexts::*;

declare_id!("Be68Q3UsQgto7NNL42B5knLj41J3eV5Y8QWNPqqUZ9Yk");

#[program]
pub mod apple_shot {
    use super::*;

    // ========================================
    // Admin Instructions
    // ========================================

    /// Bootstrap the game: config, stats board, first season, fee vault
    pub fn initialize(ctx: Context<Initialize>, fee_per_game: u64) -> Result<()> {
        instructions::admin::initialize(ctx, fee_per_game)
    }

    /// Pause or unpause new games
    pub fn set_paused(ctx: Context<AdminAction>, paused: bool) -> Result<()> {
        instructions::admin::set_paused(ctx, paused)
    }

    /// Change the entry fee for future sessions
    pub fn update_fee(ctx: Context<AdminAction>, fee_per_game: u64) -> Result<()> {
        instructions::admin::update_fee(ctx, fee_per_game)
    }

    /// Transfer admin privileges to a new wallet
    pub fn transfer_admin(ctx: Context<AdminAction>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    /// Withdraw from the operational fee pool
    pub fn claim_operational_fees(ctx: Context<ClaimOperationalFees>, amount: u64) -> Result<()> {
        instructions::admin::claim_operational_fees(ctx, amount)
    }

    // ========================================
    // User Instructions
    // ========================================

    /// Register a player under a globally unique username
    pub fn register_player(
        ctx: Context<RegisterPlayer>,
        username: String,
        payout_wallet: Pubkey,
    ) -> Result<()> {
        instructions::user::register_player(ctx, username, payout_wallet)
    }

    /// Update the wallet prizes are paid out to
    pub fn update_payout_wallet(
        ctx: Context<UpdatePayoutWallet>,
        payout_wallet: Pubkey,
    ) -> Result<()> {
        instructions::user::update_payout_wallet(ctx, payout_wallet)
    }

    /// Pay the entry fee and start a session at level 1
    pub fn start_game(ctx: Context<StartGame>) -> Result<()> {
        instructions::user::start_game(ctx)
    }

    /// Submit one shot result against a live session
    pub fn submit_shot(
        ctx: Context<SubmitShot>,
        session_hash: [u8; 32],
        level: u8,
        hit: bool,
        lives_left: u8,
    ) -> Result<()> {
        instructions::user::submit_shot(ctx, session_hash, level, hit, lives_left)
    }

    /// Run prize accounting for a completed session
    pub fn settle_completion(ctx: Context<SettleCompletion>) -> Result<()> {
        instructions::user::settle_completion(ctx)
    }

    /// Withdraw an awarded prize from the vault
    pub fn claim_prize(ctx: Context<ClaimPrize>) -> Result<()> {
        instructions::user::claim_prize(ctx)
    }

    /// Post a chat message into the event feed
    pub fn post_chat_message(ctx: Context<PostChatMessage>, message: String) -> Result<()> {
        instructions::user::post_chat_message(ctx, message)
    }
}
