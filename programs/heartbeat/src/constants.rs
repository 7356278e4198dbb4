use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const COMMITMENT_SEED: &[u8] = b"commitment";

#[constant]
pub const SCHEDULED_CHECK_SEED: &[u8] = b"scheduled_check";

/// Seed of the PDA this program signs with when it calls itself.
#[constant]
pub const PROGRAM_SIGNER_SEED: &[u8] = b"program_signer";

// defaults used when a deployment doesn't override them
pub const DEFAULT_GRACE_PERIOD: i64 = 24 * 60 * 60; // 24 hours in seconds
pub const DEFAULT_REQUIRED_CHECKINS: u64 = 100;
pub const DEFAULT_MIN_DEPOSIT: u64 = 5_000_000_000; // 5 SOL in lamports
pub const DEFAULT_PROTOCOL_FEE: u64 = 100_000_000; // 0.1 SOL, taken out of every deposit
pub const DEFAULT_CHECKIN_COOLDOWN: i64 = 60;
pub const DEFAULT_SCHEDULE_SLACK: i64 = 300; // execution window after the deadline
