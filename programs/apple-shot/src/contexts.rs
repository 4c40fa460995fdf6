use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::AppleShotError;
use crate::states::*;

/// ========================================
/// Account Structs
/// ========================================

/// Accounts required for bootstrapping the game
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The game config singleton (PDA)
    #[account(
        init,
        payer = admin,
        space = 8 + GameConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// The global level stats board, pre-seeded with all 35 zeroed rows
    #[account(
        init,
        payer = admin,
        space = 8 + LevelStatsBoard::LEN,
        seeds = [LEVEL_STATS_SEED],
        bump
    )]
    pub level_stats: AccountLoader<'info, LevelStatsBoard>,
    /// The first season, created active
    #[account(
        init,
        payer = admin,
        space = 8 + Season::INIT_SPACE,
        seeds = [SEASON_SEED, FIRST_SEASON_INDEX.to_le_bytes().as_ref()],
        bump
    )]
    pub season: Account<'info, Season>,
    /// The SPL mint fees and prizes are denominated in
    pub fee_mint: Account<'info, Mint>,
    /// Token vault holding all pools, owned by the config PDA
    #[account(
        init,
        payer = admin,
        associated_token::mint = fee_mint,
        associated_token::authority = config
    )]
    pub fee_vault: Account<'info, TokenAccount>,
    /// The admin account that will own the game
    #[account(mut)]
    pub admin: Signer<'info>,
    /// Token program for vault creation
    pub token_program: Program<'info, Token>,
    /// Associated token program for vault creation
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for admin-only config mutations
/// (pause, fee update, admin transfer)
#[derive(Accounts)]
pub struct AdminAction<'info> {
    /// The game config (must be owned by the signing admin)
    #[account(
        mut,
        has_one = admin,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// Current admin
    pub admin: Signer<'info>,
}

/// Accounts required for withdrawing operational fees
#[derive(Accounts)]
pub struct ClaimOperationalFees<'info> {
    /// The game config (must be owned by the signing admin)
    #[account(
        mut,
        has_one = admin,
        has_one = fee_vault,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// The vault the operational share is withdrawn from
    #[account(mut)]
    pub fee_vault: Account<'info, TokenAccount>,
    /// Destination token account, same mint as the vault
    #[account(mut, token::mint = config.fee_mint)]
    pub recipient: Account<'info, TokenAccount>,
    /// Current admin
    pub admin: Signer<'info>,
    /// Token program for the withdrawal transfer
    pub token_program: Program<'info, Token>,
}

/// Accounts required for registering a player
///
/// The profile PDA is seeded by the username, so a taken name fails PDA
/// derivation for everyone but its owner. `init_if_needed` lets a lost
/// duplicate-registration race resolve to the existing profile instead of
/// failing.
#[derive(Accounts)]
#[instruction(username: String)]
pub struct RegisterPlayer<'info> {
    /// The player profile to create or re-open (PDA)
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + PlayerProfile::INIT_SPACE,
        seeds = [PLAYER_SEED, username.as_bytes()],
        bump
    )]
    pub player: Account<'info, PlayerProfile>,
    /// The wallet that will control this player
    #[account(mut)]
    pub authority: Signer<'info>,
    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for updating a payout wallet
#[derive(Accounts)]
pub struct UpdatePayoutWallet<'info> {
    /// The player profile to update
    #[account(mut, has_one = authority)]
    pub player: Account<'info, PlayerProfile>,
    /// The player's controlling wallet
    pub authority: Signer<'info>,
}

/// Accounts required for starting a paid game session
#[derive(Accounts)]
pub struct StartGame<'info> {
    /// The game config
    #[account(
        mut,
        has_one = fee_vault,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// The active season the fee is credited to; the seed pins it to
    /// `config.active_season`
    #[account(
        mut,
        seeds = [SEASON_SEED, config.active_season.to_le_bytes().as_ref()],
        bump
    )]
    pub season: Account<'info, Season>,
    /// The registered player starting the session
    #[account(mut, has_one = authority)]
    pub player: Account<'info, PlayerProfile>,
    /// The new session (PDA keyed by the player's session counter)
    #[account(
        init,
        payer = authority,
        space = 8 + GameSession::INIT_SPACE,
        seeds = [SESSION_SEED, player.key().as_ref(), player.session_count.to_le_bytes().as_ref()],
        bump
    )]
    pub session: Account<'info, GameSession>,
    /// The player's token account the fee is pulled from
    #[account(mut, token::mint = config.fee_mint, token::authority = authority)]
    pub player_token_account: Account<'info, TokenAccount>,
    /// The vault the fee lands in
    #[account(mut)]
    pub fee_vault: Account<'info, TokenAccount>,
    /// The player's controlling wallet, pays the fee and the rent
    #[account(mut)]
    pub authority: Signer<'info>,
    /// Token program for the fee transfer
    pub token_program: Program<'info, Token>,
    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for submitting a shot result
#[derive(Accounts)]
pub struct SubmitShot<'info> {
    /// The game config (activity feed sequence)
    #[account(mut, seeds = [CONFIG_SEED], bump)]
    pub config: Account<'info, GameConfig>,
    /// The global level stats board
    #[account(mut, seeds = [LEVEL_STATS_SEED], bump)]
    pub level_stats: AccountLoader<'info, LevelStatsBoard>,
    /// The session being played; must belong to the signer
    #[account(mut, has_one = player, has_one = authority)]
    pub session: Account<'info, GameSession>,
    /// The owning player profile
    #[account(mut)]
    pub player: Account<'info, PlayerProfile>,
    /// The session's controlling wallet
    pub authority: Signer<'info>,
}

/// Accounts required for settling a completed run
///
/// Permissionless: any caller may crank a completion through prize
/// accounting. The three optional accounts are required exactly when their
/// branch fires — a winner while positions are open, the successor season
/// on the settle that fills position 3, a burn receipt when the completion
/// count trips the burn trigger. The handler rejects a missing-but-needed
/// or present-but-unneeded account, which reverts any eager `init`.
#[derive(Accounts)]
pub struct SettleCompletion<'info> {
    /// The game config
    #[account(
        mut,
        has_one = fee_mint,
        has_one = fee_vault,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// The completed, not-yet-settled session
    #[account(mut, has_one = player, has_one = season @ AppleShotError::SeasonMismatch)]
    pub session: Account<'info, GameSession>,
    /// The session's player profile
    #[account(mut)]
    pub player: Account<'info, PlayerProfile>,
    /// The session's own season (completions count here even if it has
    /// since finished)
    #[account(mut)]
    pub season: Account<'info, Season>,
    /// Winner record for the next open position
    #[account(
        init,
        payer = caller,
        space = 8 + Winner::INIT_SPACE,
        seeds = [WINNER_SEED, season.key().as_ref(), &[season.winner_count + 1]],
        bump
    )]
    pub winner: Option<Account<'info, Winner>>,
    /// The successor season, created active when this season ends
    #[account(
        init,
        payer = caller,
        space = 8 + Season::INIT_SPACE,
        seeds = [SEASON_SEED, (config.season_count + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub next_season: Option<Account<'info, Season>>,
    /// Receipt for a burn-pool flush triggered by this completion
    #[account(
        init,
        payer = caller,
        space = 8 + BurnReceipt::INIT_SPACE,
        seeds = [BURN_SEED, season.key().as_ref(), (season.total_completions + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub burn_receipt: Option<Account<'info, BurnReceipt>>,
    /// The fee mint, writable for the burn
    #[account(mut)]
    pub fee_mint: Account<'info, Mint>,
    /// The vault burned tokens leave from
    #[account(mut)]
    pub fee_vault: Account<'info, TokenAccount>,
    /// Whoever cranks the settlement; pays rent for created records
    #[account(mut)]
    pub caller: Signer<'info>,
    /// Token program for the burn
    pub token_program: Program<'info, Token>,
    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for a winner to withdraw their prize
#[derive(Accounts)]
pub struct ClaimPrize<'info> {
    /// The game config
    #[account(
        has_one = fee_vault,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, GameConfig>,
    /// The winner record being claimed
    #[account(mut, has_one = player)]
    pub winner: Account<'info, Winner>,
    /// The winning player profile; its authority must sign
    #[account(has_one = authority)]
    pub player: Account<'info, PlayerProfile>,
    /// The vault the prize is paid from
    #[account(mut)]
    pub fee_vault: Account<'info, TokenAccount>,
    /// Destination token account owned by the profile's payout wallet
    #[account(mut, token::mint = config.fee_mint, token::authority = player.payout_wallet)]
    pub recipient: Account<'info, TokenAccount>,
    /// The player's controlling wallet
    pub authority: Signer<'info>,
    /// Token program for the payout transfer
    pub token_program: Program<'info, Token>,
}

/// Accounts required for posting a chat message
#[derive(Accounts)]
pub struct PostChatMessage<'info> {
    /// The game config (chat sequence)
    #[account(mut, seeds = [CONFIG_SEED], bump)]
    pub config: Account<'info, GameConfig>,
    /// The registered player posting the message
    #[account(has_one = authority)]
    pub player: Account<'info, PlayerProfile>,
    /// The player's controlling wallet
    pub authority: Signer<'info>,
}
