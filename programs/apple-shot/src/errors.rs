/// Error definitions for the Apple Shot program
///
/// Contains all custom error types that can be returned by the program instructions.
use anchor_lang::prelude::*;

/// Custom error codes for the apple shot program
#[error_code]
pub enum AppleShotError {
    #[msg("Level number is out of range.")]
    InvalidLevel,
    #[msg("The game is currently paused by the admin.")]
    GamePaused,
    #[msg("The referenced season is not the active one.")]
    SeasonNotActive,
    #[msg("The season account does not match the session's season.")]
    SeasonMismatch,
    #[msg("Username must be 2-20 characters.")]
    InvalidUsername,
    #[msg("This username is already registered to a different wallet.")]
    UsernameTaken,
    #[msg("The presented session hash does not match this session.")]
    InvalidSessionHash,
    #[msg("This session has already been completed.")]
    SessionAlreadyCompleted,
    #[msg("This session is over and accepts no further shots.")]
    SessionOver,
    #[msg("The submitted level does not match the session's current level.")]
    WrongLevel,
    #[msg("Shots must be at least two slots apart.")]
    ShotTooFast,
    #[msg("The session has not been completed yet.")]
    SessionNotCompleted,
    #[msg("This completion has already been settled.")]
    CompletionAlreadySettled,
    #[msg("A winner account is required to settle this completion.")]
    WinnerAccountMissing,
    #[msg("No winner position is open; do not pass a winner account.")]
    NoWinnerSlotOpen,
    #[msg("A season account for the next season is required to end this one.")]
    NextSeasonAccountMissing,
    #[msg("The season is not ending; do not pass a next-season account.")]
    SeasonNotEnding,
    #[msg("A burn receipt account is required to flush the burn pool.")]
    BurnReceiptAccountMissing,
    #[msg("No burn is due; do not pass a burn receipt account.")]
    BurnNotDue,
    #[msg("This prize has already been claimed.")]
    PrizeAlreadyClaimed,
    #[msg("Chat message must be 1-200 characters.")]
    InvalidChatMessage,
    #[msg("Fee must be greater than zero.")]
    InvalidFee,
    #[msg("Amount exceeds the operational fee pool.")]
    InsufficientOperationalFees,
    #[msg("The new admin key is invalid.")]
    InvalidAdmin,
    #[msg("The payout wallet key is invalid.")]
    InvalidPayoutWallet,
    #[msg("Winner position must be 1-3.")]
    InvalidWinnerPosition,
    #[msg("Arithmetic overflow in pool accounting.")]
    NumericOverflow,
    #[msg("Missing PDA bump for an expected account.")]
    BumpMissing,
}
