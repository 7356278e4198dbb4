use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::constants::*;
use crate::events::*;
use crate::state::*;
use crate::{ledger, machine, scheduler, treasury, utils};
//deposit, check_in, withdraw

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init_if_needed,
        payer = participant,
        space = CommitmentRecord::SPACE,
        seeds = [COMMITMENT_SEED, participant.key().as_ref()],
        bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    #[account(
        init_if_needed,
        payer = participant,
        space = ScheduledCheck::SPACE,
        seeds = [SCHEDULED_CHECK_SEED, participant.key().as_ref()],
        bump
    )]
    pub scheduled_check: Account<'info, ScheduledCheck>,

    /// CHECK: only receives lamports, pinned to the configured treasury
    #[account(mut, address = config.treasury)]
    pub treasury: UncheckedAccount<'info>,

    #[account(mut)]
    pub participant: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = utils::now()?;
    let policy = ctx.accounts.config.policy;
    let participant = ctx.accounts.participant.key();

    let commitment = &mut ctx.accounts.commitment;
    commitment.bind(participant, ctx.bumps.commitment);
    let outcome = machine::deposit(commitment, &policy, amount, now)?;

    //move the gross amount into the vault, the fee leaves it again right away
    let cpi_accounts = Transfer {
        from: ctx.accounts.participant.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.system_program.to_account_info(), cpi_accounts);
    system_program::transfer(cpi_ctx, outcome.gross)?;

    let net = treasury::collect_protocol_fee(
        &mut ctx.accounts.vault,
        &ctx.accounts.treasury.to_account_info(),
        participant,
        outcome.gross,
        outcome.fee,
    )?;

    let check = &mut ctx.accounts.scheduled_check;
    check.bind(participant, ctx.bumps.scheduled_check);
    scheduler::arm_and_announce(check, participant, outcome.schedule)?;

    let commitment = &ctx.accounts.commitment;
    msg!(
        "deposit/check-in: {} deposited {} lamports, total {}, check-ins {}",
        participant,
        net,
        commitment.balance,
        commitment.checkin_count
    );
    emit!(Deposited {
        participant,
        gross: outcome.gross,
        net,
        balance: commitment.balance,
        checkin_count: commitment.checkin_count,
        opened: outcome.opened,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CheckIn<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, EscrowConfig>,

    // absent records read as default and are rejected by the state machine
    #[account(
        init_if_needed,
        payer = participant,
        space = CommitmentRecord::SPACE,
        seeds = [COMMITMENT_SEED, participant.key().as_ref()],
        bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    #[account(
        init_if_needed,
        payer = participant,
        space = ScheduledCheck::SPACE,
        seeds = [SCHEDULED_CHECK_SEED, participant.key().as_ref()],
        bump
    )]
    pub scheduled_check: Account<'info, ScheduledCheck>,

    #[account(mut)]
    pub participant: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn check_in(ctx: Context<CheckIn>) -> Result<()> {
    let now = utils::now()?;
    let policy = ctx.accounts.config.policy;
    let participant = ctx.accounts.participant.key();

    let commitment = &mut ctx.accounts.commitment;
    commitment.bind(participant, ctx.bumps.commitment);
    let outcome = machine::check_in(commitment, &policy, now)?;
    let checkin_count = commitment.checkin_count;

    let check = &mut ctx.accounts.scheduled_check;
    check.bind(participant, ctx.bumps.scheduled_check);
    scheduler::arm_and_announce(check, participant, outcome.schedule)?;

    msg!("check-in: {} checked in, count {}", participant, checkin_count);
    emit!(CheckedIn {
        participant,
        checkin_count,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init_if_needed,
        payer = participant,
        space = CommitmentRecord::SPACE,
        seeds = [COMMITMENT_SEED, participant.key().as_ref()],
        bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    #[account(
        init_if_needed,
        payer = participant,
        space = ScheduledCheck::SPACE,
        seeds = [SCHEDULED_CHECK_SEED, participant.key().as_ref()],
        bump
    )]
    pub scheduled_check: Account<'info, ScheduledCheck>,

    #[account(mut)]
    pub participant: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let policy = ctx.accounts.config.policy;
    let participant = ctx.accounts.participant.key();

    let commitment = &mut ctx.accounts.commitment;
    commitment.bind(participant, ctx.bumps.commitment);
    let outcome = machine::withdraw(commitment, &policy, amount)?;

    treasury::payout(
        &mut ctx.accounts.vault,
        &ctx.accounts.participant.to_account_info(),
        outcome.paid,
    )?;
    emit!(Withdrawn {
        participant,
        requested: amount,
        paid: outcome.paid,
        completed: outcome.completed,
    });

    if !outcome.purge {
        msg!(
            "withdraw: {} withdrew {} lamports, remaining {}",
            participant,
            outcome.paid,
            ctx.accounts.commitment.balance
        );
        return Ok(());
    }

    //commitment is over, drop the pending check and clear the record
    let check = &mut ctx.accounts.scheduled_check;
    check.bind(participant, ctx.bumps.scheduled_check);
    if let Some(handle) = scheduler::apply_withdrawal(check, &outcome) {
        emit!(LivenessCheckCancelled {
            participant,
            handle,
        });
    }
    ledger::remove(
        &mut ctx.accounts.commitment,
        ctx.accounts.participant.to_account_info(),
    )?;

    msg!(
        "withdraw: {} withdrew {} lamports, account cleared",
        participant,
        outcome.paid
    );
    emit!(CommitmentSettled {
        participant,
        completed: outcome.completed,
    });

    Ok(())
}
