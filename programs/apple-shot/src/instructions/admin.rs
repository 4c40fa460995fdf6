use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::{constants::*, contexts::*, errors::AppleShotError, events::*, states::SeasonStatus};

/// ========================================
/// Admin Instructions
/// ========================================

/// Bootstrap the game
///
/// Creates the config singleton, the zeroed 35-row level stats board, the
/// first active season and the fee vault, and records the fee mint. From
/// this point exactly one active season exists at all times.
///
/// Args:
/// - ctx: Context containing config, level_stats, season, fee mint and vault
/// - fee_per_game: Entry fee in base units of the fee mint
///
/// Returns: Result indicating success or failure
pub fn initialize(ctx: Context<Initialize>, fee_per_game: u64) -> Result<()> {
    require!(fee_per_game > 0, AppleShotError::InvalidFee);
    let clock = Clock::get()?;

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.fee_mint = ctx.accounts.fee_mint.key();
    config.fee_vault = ctx.accounts.fee_vault.key();
    config.fee_per_game = fee_per_game;
    config.paused = false;
    config.active_season = FIRST_SEASON_INDEX;
    config.season_count = FIRST_SEASON_INDEX;
    config.operational_pool = 0;
    config.total_fees_collected = 0;
    config.total_burned = 0;
    config.chat_count = 0;
    config.activity_count = 0;
    config.bump = ctx.bumps.config;

    // Pre-seed the stats board: load_init zeroes every level row, so all
    // 35 rows exist before the first shot is ever recorded.
    ctx.accounts.level_stats.load_init()?;

    let season = &mut ctx.accounts.season;
    season.index = FIRST_SEASON_INDEX;
    season.status = SeasonStatus::Active;
    season.prize_pool = 0;
    season.burn_pool = 0;
    season.total_fees = 0;
    season.total_completions = 0;
    season.winner_count = 0;
    season.started_at = clock.unix_timestamp;
    season.finished_at = 0;
    season.bump = ctx.bumps.season;

    emit!(GameInitialized {
        admin: config.admin,
        fee_mint: config.fee_mint,
        fee_per_game,
    });
    emit!(SeasonStarted {
        season: season.key(),
        index: FIRST_SEASON_INDEX,
        carried_over_pool: 0,
    });
    Ok(())
}

/// Pause or unpause new games
///
/// Only gates `start_game`; sessions already in flight keep playing and
/// settling.
///
/// Args:
/// - ctx: Context containing config and the admin signer
/// - paused: New pause state
///
/// Returns: Result indicating success or failure
pub fn set_paused(ctx: Context<AdminAction>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.paused = paused;

    emit!(GamePauseToggled {
        admin: ctx.accounts.admin.key(),
        paused,
    });
    Ok(())
}

/// Change the entry fee
///
/// Applies to sessions started after this instruction; running sessions
/// keep the fee they paid.
///
/// Args:
/// - ctx: Context containing config and the admin signer
/// - fee_per_game: New fee in base units of the fee mint, nonzero
///
/// Returns: Result indicating success or failure
pub fn update_fee(ctx: Context<AdminAction>, fee_per_game: u64) -> Result<()> {
    require!(fee_per_game > 0, AppleShotError::InvalidFee);

    let config = &mut ctx.accounts.config;
    config.fee_per_game = fee_per_game;

    emit!(FeeUpdated {
        admin: ctx.accounts.admin.key(),
        fee_per_game,
    });
    Ok(())
}

/// Transfer admin privileges to a new wallet
///
/// Args:
/// - ctx: Context containing config and the current admin signer
/// - new_admin: Public key of the new admin
///
/// Returns: Result indicating success or failure
pub fn transfer_admin(ctx: Context<AdminAction>, new_admin: Pubkey) -> Result<()> {
    require!(
        new_admin != Pubkey::default() && new_admin != ctx.accounts.config.admin,
        AppleShotError::InvalidAdmin
    );

    let previous_admin = ctx.accounts.config.admin;
    let config = &mut ctx.accounts.config;
    config.admin = new_admin;

    emit!(AdminTransferred {
        previous_admin,
        new_admin,
    });
    Ok(())
}

/// Withdraw from the operational fee pool
///
/// The operational share (the fee remainder after the prize and burn cuts)
/// accumulates on the config; this moves part of it out of the vault to an
/// admin-chosen token account. The prize and burn compartments are
/// untouchable through this path because the withdrawal is bounded by the
/// operational pool alone.
///
/// Args:
/// - ctx: Context containing config, vault, recipient and the admin signer
/// - amount: Amount to withdraw, bounded by the operational pool
///
/// Returns: Result indicating success or failure
pub fn claim_operational_fees(ctx: Context<ClaimOperationalFees>, amount: u64) -> Result<()> {
    require!(
        amount > 0 && amount <= ctx.accounts.config.operational_pool,
        AppleShotError::InsufficientOperationalFees
    );

    let config_bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.fee_vault.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    let config = &mut ctx.accounts.config;
    config.operational_pool = config
        .operational_pool
        .checked_sub(amount)
        .ok_or(AppleShotError::NumericOverflow)?;

    emit!(OperationalFeesClaimed {
        admin: ctx.accounts.admin.key(),
        amount,
    });
    Ok(())
}
