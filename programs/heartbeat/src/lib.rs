pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod machine;
pub mod scheduler;
pub mod state;
pub mod treasury;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("GxE7Lkj3z1Kepdmrjwu4RZYxPWnryKv2c98P7cKcwV89");

#[program]
pub mod heartbeat {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: EscrowParams) -> Result<()> {
        instructions::initialize(ctx, params)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    pub fn check_in(ctx: Context<CheckIn>) -> Result<()> {
        instructions::check_in(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    // self-invoked only, see execute_scheduled_check
    pub fn liveness_check(ctx: Context<LivenessCheck>, participant: Pubkey) -> Result<()> {
        instructions::liveness_check(ctx, participant)
    }

    pub fn execute_scheduled_check(
        ctx: Context<ExecuteScheduledCheck>,
        participant: Pubkey,
        handle: u64,
    ) -> Result<()> {
        instructions::execute_scheduled_check(ctx, participant, handle)
    }

    pub fn rearm_liveness_check(ctx: Context<RearmLivenessCheck>, participant: Pubkey) -> Result<()> {
        instructions::rearm_liveness_check(ctx, participant)
    }

    pub fn get_status(ctx: Context<GetStatus>, participant: Pubkey) -> Result<CommitmentStatus> {
        instructions::get_status(ctx, participant)
    }
}
