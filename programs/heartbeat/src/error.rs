use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("amount is zero, below the minimum deposit or below the protocol fee")]
    InvalidAmount,
    #[msg("commitment is perished or empty")]
    InactiveAccount,
    #[msg("no active deposit found for check-in")]
    NoActiveCommitment,
    #[msg("insufficient funds to withdraw")]
    InsufficientFunds,
    #[msg("cannot check in again before the cooldown elapses")]
    CooldownViolation,
    #[msg("liveness check can only be invoked by the program itself")]
    UnauthorizedCaller,
    #[msg("invalid escrow configuration")]
    InvalidConfig,
    #[msg("vault does not hold enough spendable lamports")]
    VaultUnderfunded,
    #[msg("no liveness check is armed for this participant")]
    ScheduleNotArmed,
    #[msg("scheduled call was superseded by a newer one")]
    StaleSchedule,
    #[msg("scheduled call is not yet executable")]
    ScheduleNotDue,
    #[msg("scheduled call validity window has passed")]
    ScheduleExpired,
    #[msg("a liveness check is still pending")]
    SchedulePending,
    #[msg("arithmetic overflow")]
    MathOverflow,
}
