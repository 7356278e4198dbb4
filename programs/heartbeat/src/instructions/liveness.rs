use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::InstructionData;
use crate::constants::*;
use crate::error::*;
use crate::events::*;
use crate::machine::{self, LivenessOutcome};
use crate::program::Heartbeat;
use crate::state::*;
use crate::{ledger, scheduler, treasury, utils};

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct LivenessCheck<'info> {
    /// CHECK: must be the program signer PDA, verified in the handler so that
    /// any other caller gets `UnauthorizedCaller`
    pub caller: UncheckedAccount<'info>,

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
        mut,
        seeds = [COMMITMENT_SEED, participant.as_ref()],
        bump = commitment.bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    #[account(
        mut,
        seeds = [SCHEDULED_CHECK_SEED, participant.as_ref()],
        bump = scheduled_check.bump
    )]
    pub scheduled_check: Account<'info, ScheduledCheck>,

    /// CHECK: only receives lamports, pinned to the configured donation address
    #[account(mut, address = config.donation)]
    pub donation: UncheckedAccount<'info>,
}

pub fn liveness_check(ctx: Context<LivenessCheck>, participant: Pubkey) -> Result<()> {
    let caller = &ctx.accounts.caller;
    scheduler::ensure_self_invoked(caller.key, caller.is_signer, &ctx.accounts.config.program_signer)?;

    let now = utils::now()?;
    let policy = ctx.accounts.config.policy;

    let outcome = machine::liveness_check(&mut ctx.accounts.commitment, &policy, now)?;
    let receipt = scheduler::apply_liveness(&mut ctx.accounts.scheduled_check, &outcome)?;

    let verdict = match outcome {
        LivenessOutcome::Dormant => {
            msg!("check and perish: no action for {}", participant);
            Verdict::Dormant
        }
        LivenessOutcome::Alive { schedule } => {
            msg!("check and perish: {} is still alive, rescheduling", participant);
            if let Some(receipt) = receipt {
                scheduler::announce(participant, schedule, receipt);
            }
            Verdict::Alive
        }
        LivenessOutcome::Perished { forfeited } => {
            treasury::forfeit(
                &mut ctx.accounts.vault,
                &ctx.accounts.donation.to_account_info(),
                participant,
                forfeited,
            )?;
            Verdict::Perished
        }
    };

    emit!(LivenessEvaluated {
        participant,
        verdict,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct ExecuteScheduledCheck<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, EscrowConfig>,

    /// CHECK: this is a PDA that acts as the program's own identity, it signs
    /// the self-invocation below and holds no data
    #[account(
        seeds = [PROGRAM_SIGNER_SEED],
        bump = config.signer_bump
    )]
    pub program_signer: UncheckedAccount<'info>,

    // handed to liveness_check untouched, it validates and writes them
    /// CHECK: validated by liveness_check
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: validated by liveness_check
    #[account(mut)]
    pub commitment: UncheckedAccount<'info>,

    /// CHECK: deserialized in the handler to check the handle and window
    #[account(
        mut,
        seeds = [SCHEDULED_CHECK_SEED, participant.as_ref()],
        bump
    )]
    pub scheduled_check: UncheckedAccount<'info>,

    /// CHECK: validated by liveness_check
    #[account(mut)]
    pub donation: UncheckedAccount<'info>,

    pub executor: Signer<'info>,
    pub heartbeat_program: Program<'info, Heartbeat>,
}

pub fn execute_scheduled_check(
    ctx: Context<ExecuteScheduledCheck>,
    participant: Pubkey,
    handle: u64,
) -> Result<()> {
    let now = utils::now()?;
    {
        let check = ledger::load::<ScheduledCheck>(&ctx.accounts.scheduled_check)?
            .ok_or(EscrowError::ScheduleNotArmed)?;
        check.ensure_executable(handle, now)?;
    }

    msg!(
        "executing liveness check {} for {} on behalf of {}",
        handle,
        participant,
        ctx.accounts.executor.key()
    );

    let accounts = &ctx.accounts;
    let ix = liveness_check_instruction(
        accounts.program_signer.key(),
        accounts.config.key(),
        accounts.vault.key(),
        accounts.commitment.key(),
        accounts.scheduled_check.key(),
        accounts.donation.key(),
        participant,
    );

    let bump = [accounts.config.signer_bump];
    let seeds = &[PROGRAM_SIGNER_SEED, &bump[..]];
    let signer = &[&seeds[..]];

    invoke_signed(
        &ix,
        &[
            accounts.program_signer.to_account_info(),
            accounts.config.to_account_info(),
            accounts.vault.to_account_info(),
            accounts.commitment.to_account_info(),
            accounts.scheduled_check.to_account_info(),
            accounts.donation.to_account_info(),
            accounts.heartbeat_program.to_account_info(),
        ],
        signer,
    )?;
    Ok(())
}

// liveness_check addressed to this program, with the program signer PDA as
// its signing caller
pub fn liveness_check_instruction(
    program_signer: Pubkey,
    config: Pubkey,
    vault: Pubkey,
    commitment: Pubkey,
    scheduled_check: Pubkey,
    donation: Pubkey,
    participant: Pubkey,
) -> Instruction {
    let mut metas = crate::accounts::LivenessCheck {
        caller: program_signer,
        config,
        vault,
        commitment,
        scheduled_check,
        donation,
    }
    .to_account_metas(None);
    metas[0].is_signer = true;

    Instruction {
        program_id: crate::ID,
        accounts: metas,
        data: crate::instruction::LivenessCheck { participant }.data(),
    }
}

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct RearmLivenessCheck<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        seeds = [COMMITMENT_SEED, participant.as_ref()],
        bump = commitment.bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    #[account(
        mut,
        seeds = [SCHEDULED_CHECK_SEED, participant.as_ref()],
        bump = scheduled_check.bump
    )]
    pub scheduled_check: Account<'info, ScheduledCheck>,

    pub keeper: Signer<'info>,
}

pub fn rearm_liveness_check(ctx: Context<RearmLivenessCheck>, participant: Pubkey) -> Result<()> {
    let now = utils::now()?;
    let policy = ctx.accounts.config.policy;

    let request = scheduler::plan_recovery(
        &ctx.accounts.commitment,
        &ctx.accounts.scheduled_check,
        &policy,
        now,
    )?;

    msg!(
        "{} re-arming lapsed liveness check for {}",
        ctx.accounts.keeper.key(),
        participant
    );
    scheduler::arm_and_announce(&mut ctx.accounts.scheduled_check, participant, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Discriminator;

    #[test]
    fn self_invocation_is_signed_by_program_signer() {
        let (program_signer, _) = Pubkey::find_program_address(&[PROGRAM_SIGNER_SEED], &crate::ID);
        let participant = Pubkey::new_unique();
        let commitment = Pubkey::new_unique();
        let scheduled_check = Pubkey::new_unique();
        let donation = Pubkey::new_unique();

        let ix = liveness_check_instruction(
            program_signer,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            commitment,
            scheduled_check,
            donation,
            participant,
        );

        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.accounts.len(), 6);

        let caller = &ix.accounts[0];
        assert_eq!(caller.pubkey, program_signer);
        assert!(caller.is_signer);
        assert!(!caller.is_writable);

        // only the caller signs; the ledger accounts are written, never signed
        for meta in &ix.accounts[1..] {
            assert!(!meta.is_signer);
        }
        for (meta, key) in ix.accounts[3..].iter().zip([commitment, scheduled_check, donation]) {
            assert_eq!(meta.pubkey, key);
            assert!(meta.is_writable);
        }
    }

    #[test]
    fn self_invocation_targets_liveness_check_with_participant() {
        let participant = Pubkey::new_unique();
        let ix = liveness_check_instruction(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            participant,
        );

        let discriminator = crate::instruction::LivenessCheck::DISCRIMINATOR;
        assert!(ix.data.starts_with(discriminator));
        assert_eq!(&ix.data[discriminator.len()..], participant.as_ref());
    }
}
