use anchor_lang::prelude::*;

use crate::error::EscrowError;
use crate::scheduler;
use crate::state::{CommitmentRecord, Policy, ScheduleRequest};
use crate::treasury;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
    pub opened: bool,
    pub schedule: ScheduleRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub schedule: ScheduleRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LivenessOutcome {
    Dormant,
    Alive { schedule: ScheduleRequest },
    Perished { forfeited: u64 }, // whole balance, goes to the donation address
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawOutcome {
    pub paid: u64,
    pub completed: bool,
    pub purge: bool, // record was reset, close the account
}

// validates before touching the record, so a failed transition leaves it as it was
pub fn deposit(
    record: &mut CommitmentRecord,
    policy: &Policy,
    gross: u64,
    now: i64,
) -> Result<DepositOutcome> {
    require_gte!(gross, policy.min_deposit, EscrowError::InvalidAmount);
    let net = treasury::net_of_fee(gross, policy.protocol_fee)?;

    let opened = record.is_pristine();
    if !opened {
        require!(record.active, EscrowError::InactiveAccount);
    }
    let checkin_count = if opened { 0 } else { record.checkin_count };

    let balance = record.balance.checked_add(net).ok_or(EscrowError::MathOverflow)?;
    let checkin_count = checkin_count.checked_add(1).ok_or(EscrowError::MathOverflow)?;
    let schedule = scheduler::plan(now, policy)?;

    record.active = true;
    record.balance = balance;
    record.last_checkin_time = now;
    record.checkin_count = checkin_count;

    Ok(DepositOutcome {
        gross,
        fee: policy.protocol_fee,
        net,
        opened,
        schedule,
    })
}

pub fn check_in(record: &mut CommitmentRecord, policy: &Policy, now: i64) -> Result<CheckInOutcome> {
    require!(record.active, EscrowError::InactiveAccount);
    require!(record.balance > 0, EscrowError::NoActiveCommitment);

    let not_before = record
        .last_checkin_time
        .checked_add(policy.checkin_cooldown)
        .ok_or(EscrowError::MathOverflow)?;
    require_gte!(now, not_before, EscrowError::CooldownViolation);

    let checkin_count = record
        .checkin_count
        .checked_add(1)
        .ok_or(EscrowError::MathOverflow)?;
    let schedule = scheduler::plan(now, policy)?;

    record.last_checkin_time = now;
    record.checkin_count = checkin_count;

    Ok(CheckInOutcome { schedule })
}

pub fn liveness_check(
    record: &mut CommitmentRecord,
    policy: &Policy,
    now: i64,
) -> Result<LivenessOutcome> {
    if !record.active || record.balance == 0 {
        return Ok(LivenessOutcome::Dormant);
    }

    if now > record.deadline(policy.grace_period)? {
        let forfeited = record.balance;
        record.active = false;
        record.balance = 0;
        return Ok(LivenessOutcome::Perished { forfeited });
    }

    Ok(LivenessOutcome::Alive {
        schedule: scheduler::plan(record.last_checkin_time, policy)?,
    })
}

pub fn withdraw(
    record: &mut CommitmentRecord,
    policy: &Policy,
    amount: u64,
) -> Result<WithdrawOutcome> {
    require!(record.active, EscrowError::InactiveAccount);
    require!(amount > 0, EscrowError::InvalidAmount);
    require_gte!(record.balance, amount, EscrowError::InsufficientFunds);

    // once the commitment is fulfilled any withdrawal empties the account
    if record.checkin_count >= policy.required_checkins {
        let paid = record.balance;
        record.reset();
        return Ok(WithdrawOutcome {
            paid,
            completed: true,
            purge: true,
        });
    }

    record.balance -= amount;
    let purge = record.balance == 0;
    if purge {
        record.reset();
    }

    Ok(WithdrawOutcome {
        paid: amount,
        completed: false,
        purge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;
    const HOUR: i64 = 60 * 60;

    fn policy() -> Policy {
        Policy::default()
    }

    fn funded(policy: &Policy) -> CommitmentRecord {
        let mut record = CommitmentRecord::vacant(Pubkey::new_unique());
        deposit(&mut record, policy, 5_000_000_000, T0).unwrap();
        record
    }

    #[test]
    fn first_deposit_opens_commitment_net_of_fee() {
        let policy = policy();
        let mut record = CommitmentRecord::vacant(Pubkey::new_unique());

        let outcome = deposit(&mut record, &policy, 5_000_000_000, T0).unwrap();

        assert!(outcome.opened);
        assert_eq!(outcome.fee, 100_000_000);
        assert_eq!(outcome.net, 4_900_000_000);
        assert_eq!(record.balance, 4_900_000_000);
        assert_eq!(record.checkin_count, 1);
        assert_eq!(record.last_checkin_time, T0);
        assert!(record.active);
        assert_eq!(outcome.schedule.deadline, T0 + 24 * HOUR);
    }

    #[test]
    fn deposit_below_minimum_is_rejected() {
        let policy = policy();
        let mut record = CommitmentRecord::vacant(Pubkey::new_unique());
        let before = record.clone();

        let err = deposit(&mut record, &policy, policy.min_deposit - 1, T0).unwrap_err();

        assert_eq!(err, EscrowError::InvalidAmount.into());
        assert_eq!(record, before);
    }

    #[test]
    fn repeat_deposit_accumulates_and_counts_as_checkin() {
        let policy = policy();
        let mut record = funded(&policy);

        // deposits are not subject to the check-in cooldown
        let outcome = deposit(&mut record, &policy, 6_000_000_000, T0 + 1).unwrap();

        assert!(!outcome.opened);
        assert_eq!(record.balance, 4_900_000_000 + 5_900_000_000);
        assert_eq!(record.checkin_count, 2);
        assert_eq!(record.last_checkin_time, T0 + 1);
    }

    #[test]
    fn perished_account_rejects_deposit() {
        let policy = policy();
        let mut record = funded(&policy);
        liveness_check(&mut record, &policy, T0 + 25 * HOUR).unwrap();
        let tombstone = record.clone();

        let err = deposit(&mut record, &policy, 5_000_000_000, T0 + 26 * HOUR).unwrap_err();

        assert_eq!(err, EscrowError::InactiveAccount.into());
        assert_eq!(record, tombstone);
    }

    #[test]
    fn check_in_respects_cooldown() {
        let policy = policy();
        let mut record = funded(&policy);

        let err = check_in(&mut record, &policy, T0 + policy.checkin_cooldown - 1).unwrap_err();
        assert_eq!(err, EscrowError::CooldownViolation.into());
        assert_eq!(record.checkin_count, 1);

        let later = T0 + policy.checkin_cooldown;
        let outcome = check_in(&mut record, &policy, later).unwrap();
        assert_eq!(record.checkin_count, 2);
        assert_eq!(record.last_checkin_time, later);
        assert_eq!(outcome.schedule, scheduler::plan(later, &policy).unwrap());
    }

    #[test]
    fn check_in_without_commitment_fails() {
        let policy = policy();
        let mut record = CommitmentRecord::vacant(Pubkey::new_unique());
        assert_eq!(
            check_in(&mut record, &policy, T0).unwrap_err(),
            EscrowError::InactiveAccount.into()
        );

        let mut empty = CommitmentRecord {
            active: true,
            ..CommitmentRecord::default()
        };
        assert_eq!(
            check_in(&mut empty, &policy, T0).unwrap_err(),
            EscrowError::NoActiveCommitment.into()
        );
    }

    #[test]
    fn liveness_before_deadline_rearms_from_last_checkin() {
        let policy = policy();
        let mut record = funded(&policy);
        let before = record.clone();

        let outcome = liveness_check(&mut record, &policy, T0 + 24 * HOUR).unwrap();

        assert_eq!(
            outcome,
            LivenessOutcome::Alive {
                schedule: scheduler::plan(T0, &policy).unwrap()
            }
        );
        assert_eq!(record, before);
    }

    #[test]
    fn liveness_after_deadline_forfeits_everything() {
        let policy = policy();
        let mut record = funded(&policy);

        let outcome = liveness_check(&mut record, &policy, T0 + 24 * HOUR + 1).unwrap();

        assert_eq!(
            outcome,
            LivenessOutcome::Perished {
                forfeited: 4_900_000_000
            }
        );
        assert!(!record.active);
        assert_eq!(record.balance, 0);
        assert_eq!(record.checkin_count, 1);
    }

    #[test]
    fn liveness_on_tombstone_is_idempotent() {
        let policy = policy();
        let mut record = funded(&policy);
        liveness_check(&mut record, &policy, T0 + 48 * HOUR).unwrap();
        let tombstone = record.clone();

        for _ in 0..2 {
            let outcome = liveness_check(&mut record, &policy, T0 + 96 * HOUR).unwrap();
            assert_eq!(outcome, LivenessOutcome::Dormant);
            assert_eq!(record, tombstone);
        }
    }

    #[test]
    fn overdraw_is_rejected() {
        let policy = policy();
        let mut record = funded(&policy);
        let balance = record.balance;

        let err = withdraw(&mut record, &policy, balance + 1).unwrap_err();

        assert_eq!(err, EscrowError::InsufficientFunds.into());
        assert_eq!(record.balance, 4_900_000_000);
    }

    #[test]
    fn zero_withdrawal_is_rejected() {
        let policy = policy();
        let mut record = funded(&policy);
        assert_eq!(
            withdraw(&mut record, &policy, 0).unwrap_err(),
            EscrowError::InvalidAmount.into()
        );
    }

    #[test]
    fn partial_withdrawal_keeps_commitment_active() {
        let policy = policy();
        let mut record = funded(&policy);

        let outcome = withdraw(&mut record, &policy, 900_000_000).unwrap();

        assert_eq!(
            outcome,
            WithdrawOutcome {
                paid: 900_000_000,
                completed: false,
                purge: false
            }
        );
        assert_eq!(record.balance, 4_000_000_000);
        assert_eq!(record.checkin_count, 1);
        assert!(record.active);
    }

    #[test]
    fn draining_balance_purges_record() {
        let policy = policy();
        let mut record = funded(&policy);
        let participant = record.participant;

        let outcome = withdraw(&mut record, &policy, 4_900_000_000).unwrap();

        assert!(outcome.purge);
        assert!(!outcome.completed);
        assert_eq!(record, CommitmentRecord::vacant(participant));
    }

    #[test]
    fn completed_commitment_pays_full_balance_whatever_was_requested() {
        let policy = policy();
        let mut record = funded(&policy);
        record.checkin_count = policy.required_checkins;
        let balance = record.balance;

        let outcome = withdraw(&mut record, &policy, 1).unwrap();

        assert_eq!(outcome.paid, balance);
        assert!(outcome.completed);
        assert!(outcome.purge);
        assert!(record.is_pristine());
    }

    #[test]
    fn settled_participant_can_open_again() {
        let policy = policy();
        let mut record = funded(&policy);
        let balance = record.balance;
        withdraw(&mut record, &policy, balance).unwrap();

        let outcome = deposit(&mut record, &policy, 5_000_000_000, T0 + HOUR).unwrap();

        assert!(outcome.opened);
        assert_eq!(record.checkin_count, 1);
    }
}
