use anchor_lang::prelude::*;

use crate::error::EscrowError;
use crate::events::{Forfeited, ProtocolFeeCollected};
use crate::state::Vault;

pub fn net_of_fee(gross: u64, fee: u64) -> Result<u64> {
    gross
        .checked_sub(fee)
        .ok_or_else(|| error!(EscrowError::InvalidAmount))
}

// the vault may never drop below its rent-exempt floor
pub fn ensure_spendable(lamports: u64, floor: u64, amount: u64) -> Result<()> {
    let spendable = lamports.saturating_sub(floor);
    require_gte!(spendable, amount, EscrowError::VaultUnderfunded);
    Ok(())
}

fn release<'info>(vault: &AccountInfo<'info>, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let floor = Rent::get()?.minimum_balance(vault.data_len());
    ensure_spendable(vault.lamports(), floor, amount)?;

    vault.sub_lamports(amount)?;
    to.add_lamports(amount)?;
    Ok(())
}

// gross is already in the vault, only the fee leaves it
pub fn collect_protocol_fee<'info>(
    vault: &mut Account<'info, Vault>,
    treasury: &AccountInfo<'info>,
    participant: Pubkey,
    gross: u64,
    fee: u64,
) -> Result<u64> {
    let net = net_of_fee(gross, fee)?;
    release(&vault.to_account_info(), treasury, fee)?;
    vault.record_deposit(net, fee)?;

    msg!("protocol fee collected: {} lamports sent to {}", fee, treasury.key());
    emit!(ProtocolFeeCollected {
        participant,
        treasury: treasury.key(),
        amount: fee,
    });
    Ok(net)
}

pub fn forfeit<'info>(
    vault: &mut Account<'info, Vault>,
    donation: &AccountInfo<'info>,
    participant: Pubkey,
    amount: u64,
) -> Result<()> {
    release(&vault.to_account_info(), donation, amount)?;
    vault.record_forfeit(amount)?;

    msg!("PERISHED: {} lamports of {} donated to {}", amount, participant, donation.key());
    emit!(Forfeited {
        participant,
        donation: donation.key(),
        amount,
    });
    Ok(())
}

pub fn payout<'info>(
    vault: &mut Account<'info, Vault>,
    recipient: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    release(&vault.to_account_info(), recipient, amount)?;
    vault.record_payout(amount)
}
