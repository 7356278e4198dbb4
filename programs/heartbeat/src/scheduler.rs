use anchor_lang::prelude::*;

use crate::error::EscrowError;
use crate::events::{LivenessCheckArmed, LivenessCheckCancelled};
use crate::machine::{LivenessOutcome, WithdrawOutcome};
use crate::state::*;

// next check for a participant last active at `last_checkin_time`
pub fn plan(last_checkin_time: i64, policy: &Policy) -> Result<ScheduleRequest> {
    let deadline = last_checkin_time
        .checked_add(policy.grace_period)
        .ok_or(EscrowError::MathOverflow)?;
    window(deadline, deadline, policy.schedule_slack)
}

// lapsed window nobody executed; reopens at the deadline or now, whichever is later
pub fn plan_recovery(
    record: &CommitmentRecord,
    check: &ScheduledCheck,
    policy: &Policy,
    now: i64,
) -> Result<ScheduleRequest> {
    require!(record.active, EscrowError::InactiveAccount);
    require!(record.balance > 0, EscrowError::NoActiveCommitment);
    require!(!check.is_pending(now), EscrowError::SchedulePending);

    let deadline = record.deadline(policy.grace_period)?;
    window(deadline, deadline.max(now), policy.schedule_slack)
}

fn window(deadline: i64, earliest: i64, slack: i64) -> Result<ScheduleRequest> {
    let latest = earliest
        .checked_add(slack)
        .ok_or(EscrowError::MathOverflow)?;
    Ok(ScheduleRequest {
        deadline,
        earliest,
        latest,
    })
}

pub fn ensure_self_invoked(caller: &Pubkey, is_signer: bool, program_signer: &Pubkey) -> Result<()> {
    require!(is_signer, EscrowError::UnauthorizedCaller);
    require_keys_eq!(*caller, *program_signer, EscrowError::UnauthorizedCaller);
    Ok(())
}

// the call that ran is spent whatever the verdict, only the living get a new one
pub fn apply_liveness(
    check: &mut ScheduledCheck,
    outcome: &LivenessOutcome,
) -> Result<Option<ArmReceipt>> {
    check.consume();
    match outcome {
        LivenessOutcome::Alive { schedule } => Ok(Some(check.arm(*schedule)?)),
        LivenessOutcome::Dormant | LivenessOutcome::Perished { .. } => Ok(None),
    }
}

// a purged commitment must not leave a call behind
pub fn apply_withdrawal(check: &mut ScheduledCheck, outcome: &WithdrawOutcome) -> Option<u64> {
    if outcome.purge {
        check.cancel()
    } else {
        None
    }
}

pub fn announce(participant: Pubkey, request: ScheduleRequest, receipt: ArmReceipt) {
    if let Some(handle) = receipt.cancelled {
        emit!(LivenessCheckCancelled {
            participant,
            handle,
        });
    }

    msg!(
        "liveness check {} armed for {} at {}..={}",
        receipt.handle,
        participant,
        request.earliest,
        request.latest
    );
    emit!(LivenessCheckArmed {
        participant,
        handle: receipt.handle,
        deadline: request.deadline,
        earliest: request.earliest,
        latest: request.latest,
    });
}

pub fn arm_and_announce(
    check: &mut ScheduledCheck,
    participant: Pubkey,
    request: ScheduleRequest,
) -> Result<()> {
    let receipt = check.arm(request)?;
    announce(participant, request, receipt);
    Ok(())
}
