use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::events::EscrowInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = EscrowConfig::SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        init,
        payer = authority,
        space = Vault::SPACE,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: this is a PDA that only serves as the program's own signing identity
    /// for scheduled liveness checks, it never holds data
    #[account(
        seeds = [PROGRAM_SIGNER_SEED],
        bump
    )]
    pub program_signer: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn initialize(ctx: Context<Initialize>, params: EscrowParams) -> Result<()> {
    params.policy.validate()?;
    require_keys_neq!(params.donation, Pubkey::default(), EscrowError::InvalidConfig);
    require_keys_neq!(params.treasury, Pubkey::default(), EscrowError::InvalidConfig);

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.donation = params.donation;
    config.treasury = params.treasury;
    config.program_signer = ctx.accounts.program_signer.key();
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.vault;
    config.signer_bump = ctx.bumps.program_signer;
    config.policy = params.policy;

    let vault = &mut ctx.accounts.vault;
    vault.bump = ctx.bumps.vault;
    vault.total_escrowed = 0;
    vault.total_fees = 0;
    vault.total_forfeited = 0;
    vault.total_paid_out = 0;

    emit!(EscrowInitialized {
        authority: config.authority,
        donation: config.donation,
        treasury: config.treasury,
    });

    Ok(())
}
