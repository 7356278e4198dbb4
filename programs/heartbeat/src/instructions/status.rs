use anchor_lang::prelude::*;
use crate::constants::*;
use crate::ledger;
use crate::state::*;

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct GetStatus<'info> {
    /// CHECK: may not exist; missing accounts read as an absent commitment
    #[account(
        seeds = [COMMITMENT_SEED, participant.as_ref()],
        bump
    )]
    pub commitment: UncheckedAccount<'info>,

    /// CHECK: may not exist
    #[account(
        seeds = [SCHEDULED_CHECK_SEED, participant.as_ref()],
        bump
    )]
    pub scheduled_check: UncheckedAccount<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommitmentStatus {
    pub participant: Pubkey,
    pub balance: u64,
    pub last_checkin_time: i64,
    pub checkin_count: u64,
    pub active: bool,
    pub state: CommitmentState,
    pub next_check: Option<ScheduleRequest>,
}

impl CommitmentStatus {
    pub fn new(record: &CommitmentRecord, check: Option<&ScheduledCheck>) -> Self {
        Self {
            participant: record.participant,
            balance: record.balance,
            last_checkin_time: record.last_checkin_time,
            checkin_count: record.checkin_count,
            active: record.active,
            state: record.state(),
            next_check: check.and_then(ScheduledCheck::pending_request),
        }
    }
}

pub fn get_status(ctx: Context<GetStatus>, participant: Pubkey) -> Result<CommitmentStatus> {
    let record = ledger::get(&ctx.accounts.commitment, participant)?;
    let check = ledger::load::<ScheduledCheck>(&ctx.accounts.scheduled_check)?;
    Ok(CommitmentStatus::new(&record, check.as_ref()))
}
