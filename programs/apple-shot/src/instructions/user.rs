use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Transfer};

use crate::{
    constants::*, contexts::*, errors::AppleShotError, events::*, helpers::*, states::SeasonStatus,
};

/// ========================================
/// User Instructions
/// ========================================

/// Register a player or re-open an existing registration
///
/// The profile PDA is seeded by the username, which makes names globally
/// unique without a registry scan. A registration race resolves in favor
/// of whoever lands first; the loser's retry finds the existing profile
/// and either gets it back (same wallet, payout address refreshed) or
/// fails with `UsernameTaken`.
///
/// Args:
/// - ctx: Context containing the player profile PDA and the authority
/// - username: Display name, 2-20 bytes, no surrounding whitespace
/// - payout_wallet: Wallet prizes are paid to; default pubkey keeps the
///   current one (or the authority on first registration)
///
/// Returns: Result indicating success or failure
pub fn register_player(
    ctx: Context<RegisterPlayer>,
    username: String,
    payout_wallet: Pubkey,
) -> Result<()> {
    require!(
        username.len() >= MIN_USERNAME_LEN
            && username.len() <= MAX_USERNAME_LEN
            && username.trim().len() == username.len(),
        AppleShotError::InvalidUsername
    );

    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();
    let player = &mut ctx.accounts.player;

    if player.created_at == 0 {
        // Fresh registration.
        player.authority = authority;
        player.payout_wallet = if payout_wallet != Pubkey::default() {
            payout_wallet
        } else {
            authority
        };
        player.username = username.clone();
        player.created_at = clock.unix_timestamp;
        player.session_count = 0;
        player.games_played = 0;
        player.best_level = 0;
        player.total_completions = 0;
        player.bump = ctx.bumps.player;
    } else {
        // The name exists: identity is immutable, so only the owning
        // wallet may re-register, and doing so refreshes the payout
        // address.
        require!(player.authority == authority, AppleShotError::UsernameTaken);
        if payout_wallet != Pubkey::default() {
            player.payout_wallet = payout_wallet;
        }
    }

    emit!(PlayerRegistered {
        player: player.key(),
        authority: player.authority,
        username,
    });
    Ok(())
}

/// Update the payout wallet of a registered player
///
/// Args:
/// - ctx: Context containing the player profile and its authority
/// - payout_wallet: New payout wallet
///
/// Returns: Result indicating success or failure
pub fn update_payout_wallet(ctx: Context<UpdatePayoutWallet>, payout_wallet: Pubkey) -> Result<()> {
    require!(
        payout_wallet != Pubkey::default(),
        AppleShotError::InvalidPayoutWallet
    );

    let player = &mut ctx.accounts.player;
    player.payout_wallet = payout_wallet;

    emit!(PayoutWalletUpdated {
        player: player.key(),
        payout_wallet,
    });
    Ok(())
}

/// Start a paid game session
///
/// Process:
/// 1. Check the game is not paused and the season is active
/// 2. Pull the entry fee from the player into the vault
/// 3. Credit the season pools 70/20 and the operational pool with the rest
/// 4. Create the session at level 1 with its capability hash
///
/// Args:
/// - ctx: Context containing config, active season, player, new session
///   and the fee transfer accounts
///
/// Returns: Result indicating success or failure
pub fn start_game(ctx: Context<StartGame>) -> Result<()> {
    let clock = Clock::get()?;

    // ============ GAME VALIDATIONS ============
    require!(!ctx.accounts.config.paused, AppleShotError::GamePaused);
    require!(
        ctx.accounts.season.status == SeasonStatus::Active,
        AppleShotError::SeasonNotActive
    );

    let fee = ctx.accounts.config.fee_per_game;
    let season_key = ctx.accounts.season.key();
    let player_key = ctx.accounts.player.key();
    let authority_key = ctx.accounts.authority.key();

    // ============ FEE PROCESSING ============
    // The full fee lands in the vault; the split below is bookkeeping on
    // the season and config compartments.
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.player_token_account.to_account_info(),
                to: ctx.accounts.fee_vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        fee,
    )?;

    let (prize_add, burn_add, operational_add) = fee_split(fee);

    let season = &mut ctx.accounts.season;
    season.prize_pool = season
        .prize_pool
        .checked_add(prize_add)
        .ok_or(AppleShotError::NumericOverflow)?;
    season.burn_pool = season
        .burn_pool
        .checked_add(burn_add)
        .ok_or(AppleShotError::NumericOverflow)?;
    season.total_fees = season
        .total_fees
        .checked_add(fee)
        .ok_or(AppleShotError::NumericOverflow)?;

    let config = &mut ctx.accounts.config;
    config.operational_pool = config
        .operational_pool
        .checked_add(operational_add)
        .ok_or(AppleShotError::NumericOverflow)?;
    config.total_fees_collected = config
        .total_fees_collected
        .checked_add(fee)
        .ok_or(AppleShotError::NumericOverflow)?;

    // ============ SESSION SETUP ============
    let player = &mut ctx.accounts.player;
    let session = &mut ctx.accounts.session;
    session.player = player_key;
    session.authority = authority_key;
    session.season = season_key;
    session.index = player.session_count;
    session.session_hash = derive_session_hash(
        &player_key,
        &authority_key,
        &season_key,
        clock.slot,
        player.session_count,
    );
    session.current_level = 1;
    session.total_shots = 0;
    session.total_hits = 0;
    session.total_misses = 0;
    session.completed = false;
    session.prize_settled = false;
    session.fee_paid = fee;
    session.started_at = clock.unix_timestamp;
    session.finished_at = 0;
    session.last_shot_slot = 0;
    session.bump = ctx.bumps.session;

    player.session_count += 1;
    player.games_played += 1;

    emit!(GameStarted {
        session: session.key(),
        player: player_key,
        season: season_key,
        fee,
        prize_pool_add: prize_add,
        burn_pool_add: burn_add,
    });
    Ok(())
}

/// Submit the outcome of one shot
///
/// Process:
/// 1. Validate the capability hash and that the session is still live
/// 2. Validate the submitted level against the session (no skips, no
///    replays) and the anti-automation shot interval
/// 3. Fold the shot into the global level stats, hit or miss
/// 4. Advance, retry or finish the session per the outcome
///
/// A hit on level 35 marks the run completed; prize accounting runs in
/// `settle_completion`, which creates the winner and burn records.
///
/// Args:
/// - ctx: Context containing config, stats board, session and player
/// - session_hash: Capability issued by `start_game`
/// - level: Level this shot was taken at; must match the session
/// - hit: Whether the apple was hit
/// - lives_left: Lives remaining after a miss; 0 ends the run
///
/// Returns: Result indicating success or failure
pub fn submit_shot(
    ctx: Context<SubmitShot>,
    session_hash: [u8; 32],
    level: u8,
    hit: bool,
    lives_left: u8,
) -> Result<()> {
    let clock = Clock::get()?;
    let session = &mut ctx.accounts.session;

    // ============ SESSION VALIDATIONS ============
    require!(
        session.session_hash == session_hash,
        AppleShotError::InvalidSessionHash
    );
    require!(!session.completed, AppleShotError::SessionAlreadyCompleted);
    require!(!session.is_over(), AppleShotError::SessionOver);
    require!(
        level >= 1 && level <= TOTAL_LEVELS,
        AppleShotError::InvalidLevel
    );
    require!(session.current_level == level, AppleShotError::WrongLevel);

    // ============ ANTI-CHEAT ============
    // Per-session rate limit: two shots may never land closer together
    // than the minimum interval.
    if session.last_shot_slot != 0 {
        require!(
            clock.slot.saturating_sub(session.last_shot_slot) >= MIN_SHOT_INTERVAL_SLOTS,
            AppleShotError::ShotTooFast
        );
    }

    // ============ GLOBAL STATS ============
    // Every validated shot counts toward the level's aggregate, hit or
    // miss, before the session branches.
    {
        let mut board = ctx.accounts.level_stats.load_mut()?;
        board.entries[(level - 1) as usize].record_attempt(hit);
    }

    session.total_shots += 1;
    session.last_shot_slot = clock.slot;

    let session_key = session.key();
    let player = &mut ctx.accounts.player;
    let config = &mut ctx.accounts.config;

    // ============ OUTCOME ============
    match resolve_shot(level, hit, lives_left) {
        ShotOutcome::Advance { next_level } => {
            session.total_hits += 1;
            session.current_level = next_level;
            player.best_level = player.best_level.max(level);

            emit!(LevelPassed {
                seq: config.next_activity_seq(),
                session: session_key,
                username: player.username.clone(),
                level,
                next_level,
            });
        }
        ShotOutcome::Completed => {
            session.total_hits += 1;
            session.completed = true;
            session.finished_at = clock.unix_timestamp;
            player.best_level = player.best_level.max(level);
            player.total_completions += 1;

            emit!(RunCompleted {
                seq: config.next_activity_seq(),
                session: session_key,
                username: player.username.clone(),
                total_shots: session.total_shots,
                total_hits: session.total_hits,
            });
        }
        ShotOutcome::LifeLost { lives_left } => {
            session.total_misses += 1;

            emit!(LifeLost {
                seq: config.next_activity_seq(),
                session: session_key,
                username: player.username.clone(),
                level,
                lives_left,
            });
        }
        ShotOutcome::GameOver => {
            session.total_misses += 1;
            session.finished_at = clock.unix_timestamp;

            emit!(GameOver {
                seq: config.next_activity_seq(),
                session: session_key,
                username: player.username.clone(),
                level,
            });
        }
    }
    Ok(())
}

/// Settle a completed run through prize accounting
///
/// Permissionless crank, kept out of the shot path because the award,
/// rollover and burn branches each create accounts. Runs exactly once per
/// completion (`prize_settled` flag); the winner and burn records are PDAs
/// keyed by position and completion count, so neither can be written twice
/// even under concurrent cranking.
///
/// Process:
/// 1. Count the completion on the session's own season
/// 2. While positions are open: award the next one a 10/6/4% cut of the
///    prize pool and debit the pool by the award
/// 3. When position 3 fills: finish the season and open its successor
///    seeded with the remaining pool
/// 4. When the completion count hits the burn trigger: burn the entire
///    burn pool out of the vault and write the receipt
///
/// Args:
/// - ctx: Context containing config, session, player, season, the
///   conditional winner/next-season/burn-receipt accounts and the vault
///
/// Returns: Result indicating success or failure
pub fn settle_completion(ctx: Context<SettleCompletion>) -> Result<()> {
    let clock = Clock::get()?;
    let season_key = ctx.accounts.season.key();
    let session_key = ctx.accounts.session.key();
    let player_key = ctx.accounts.player.key();
    let config_bump = ctx.accounts.config.bump;

    // ============ SETTLEMENT VALIDATIONS ============
    let session = &mut ctx.accounts.session;
    require!(session.completed, AppleShotError::SessionNotCompleted);
    require!(
        !session.prize_settled,
        AppleShotError::CompletionAlreadySettled
    );

    let season = &mut ctx.accounts.season;
    season.total_completions += 1;

    // ============ WINNER AWARD ============
    if season.winner_count < MAX_WINNERS {
        let winner = ctx
            .accounts
            .winner
            .as_mut()
            .ok_or(AppleShotError::WinnerAccountMissing)?;

        let position = season.winner_count + 1;
        let prize = prize_for_position(season.prize_pool, position)?;
        // The pool is debited at award time; what remains after the third
        // award is exactly what carries over.
        season.prize_pool = season
            .prize_pool
            .checked_sub(prize)
            .ok_or(AppleShotError::NumericOverflow)?;
        season.winner_count = position;

        winner.season = season_key;
        winner.player = player_key;
        winner.session = session_key;
        winner.position = position;
        winner.prize_amount = prize;
        winner.claimed = false;
        winner.awarded_at = clock.unix_timestamp;
        winner.bump = ctx.bumps.winner.ok_or(AppleShotError::BumpMissing)?;

        emit!(PrizeAwarded {
            seq: ctx.accounts.config.next_activity_seq(),
            season: season_key,
            player: player_key,
            username: ctx.accounts.player.username.clone(),
            position,
            amount: prize,
        });

        // ============ SEASON END ============
        if position == MAX_WINNERS {
            let next = ctx
                .accounts
                .next_season
                .as_mut()
                .ok_or(AppleShotError::NextSeasonAccountMissing)?;

            let carry_over = season.prize_pool;
            season.prize_pool = 0;
            season.status = SeasonStatus::Finished;
            season.finished_at = clock.unix_timestamp;

            let config = &mut ctx.accounts.config;
            let next_index = config.season_count + 1;
            config.season_count = next_index;
            config.active_season = next_index;

            next.index = next_index;
            next.status = SeasonStatus::Active;
            next.prize_pool = carry_over;
            next.burn_pool = 0;
            next.total_fees = 0;
            next.total_completions = 0;
            next.winner_count = 0;
            next.started_at = clock.unix_timestamp;
            next.finished_at = 0;
            next.bump = ctx.bumps.next_season.ok_or(AppleShotError::BumpMissing)?;

            emit!(SeasonFinished {
                season: season_key,
                index: season.index,
                carry_over,
                total_completions: season.total_completions,
            });
            emit!(SeasonStarted {
                season: next.key(),
                index: next_index,
                carried_over_pool: carry_over,
            });
        } else {
            require!(
                ctx.accounts.next_season.is_none(),
                AppleShotError::SeasonNotEnding
            );
        }
    } else {
        // Quota filled (a run that outlived its season): the completion
        // still counts, but there is nothing to award.
        require!(
            ctx.accounts.winner.is_none(),
            AppleShotError::NoWinnerSlotOpen
        );
        require!(
            ctx.accounts.next_season.is_none(),
            AppleShotError::SeasonNotEnding
        );
    }

    // ============ BURN TRIGGER ============
    let burn_due =
        season.total_completions % BURN_TRIGGER_COMPLETIONS == 0 && season.burn_pool > 0;
    if burn_due {
        let amount = season.burn_pool;

        let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
        token::burn(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Burn {
                    mint: ctx.accounts.fee_mint.to_account_info(),
                    from: ctx.accounts.fee_vault.to_account_info(),
                    authority: ctx.accounts.config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;

        season.burn_pool = 0;

        let receipt = ctx
            .accounts
            .burn_receipt
            .as_mut()
            .ok_or(AppleShotError::BurnReceiptAccountMissing)?;
        receipt.season = season_key;
        receipt.amount = amount;
        receipt.trigger_completions = season.total_completions;
        receipt.burned_at = clock.unix_timestamp;
        receipt.bump = ctx.bumps.burn_receipt.ok_or(AppleShotError::BumpMissing)?;

        let config = &mut ctx.accounts.config;
        config.total_burned = config
            .total_burned
            .checked_add(amount)
            .ok_or(AppleShotError::NumericOverflow)?;

        emit!(BurnFlushed {
            seq: ctx.accounts.config.next_activity_seq(),
            season: season_key,
            amount,
            trigger_completions: season.total_completions,
        });
    } else {
        require!(
            ctx.accounts.burn_receipt.is_none(),
            AppleShotError::BurnNotDue
        );
    }

    session.prize_settled = true;
    Ok(())
}

/// Withdraw an awarded prize from the vault
///
/// Only the winning player's authority can claim, and only once; the
/// tokens go to an account owned by the profile's payout wallet.
///
/// Args:
/// - ctx: Context containing config, winner record, player, vault and the
///   destination token account
///
/// Returns: Result indicating success or failure
pub fn claim_prize(ctx: Context<ClaimPrize>) -> Result<()> {
    require!(
        !ctx.accounts.winner.claimed,
        AppleShotError::PrizeAlreadyClaimed
    );

    let amount = ctx.accounts.winner.prize_amount;
    if amount > 0 {
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
    }

    let winner = &mut ctx.accounts.winner;
    winner.claimed = true;

    emit!(PrizeClaimed {
        winner: winner.key(),
        player: winner.player,
        amount,
    });
    Ok(())
}

/// Post a chat message
///
/// Registered players only. Messages live in the event stream with a
/// monotonic sequence number, so clients poll them exactly like an
/// append-only table ("everything after my cursor").
///
/// Args:
/// - ctx: Context containing config, the player profile and its authority
/// - message: Message text, 1-200 bytes after trimming
///
/// Returns: Result indicating success or failure
pub fn post_chat_message(ctx: Context<PostChatMessage>, message: String) -> Result<()> {
    let trimmed = message.trim();
    require!(
        !trimmed.is_empty() && trimmed.len() <= MAX_CHAT_MESSAGE_LEN,
        AppleShotError::InvalidChatMessage
    );

    let seq = ctx.accounts.config.next_chat_seq();

    emit!(ChatPosted {
        seq,
        player: ctx.accounts.player.key(),
        username: ctx.accounts.player.username.clone(),
        message: trimmed.to_string(),
    });
    Ok(())
}
