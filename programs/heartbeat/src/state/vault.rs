use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// Program-owned account holding every escrowed lamport.
#[account]
#[derive(InitSpace, Default)]
pub struct Vault {
    pub bump: u8,
    pub total_escrowed: u64,
    pub total_fees: u64,
    pub total_forfeited: u64,
    pub total_paid_out: u64,
}

impl Vault {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn record_deposit(&mut self, net: u64, fee: u64) -> Result<()> {
        self.total_escrowed = self
            .total_escrowed
            .checked_add(net)
            .ok_or(EscrowError::MathOverflow)?;
        self.total_fees = self.total_fees.checked_add(fee).ok_or(EscrowError::MathOverflow)?;
        Ok(())
    }

    pub fn record_forfeit(&mut self, amount: u64) -> Result<()> {
        self.release_escrow(amount)?;
        self.total_forfeited = self
            .total_forfeited
            .checked_add(amount)
            .ok_or(EscrowError::MathOverflow)?;
        Ok(())
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.release_escrow(amount)?;
        self.total_paid_out = self
            .total_paid_out
            .checked_add(amount)
            .ok_or(EscrowError::MathOverflow)?;
        Ok(())
    }

    fn release_escrow(&mut self, amount: u64) -> Result<()> {
        self.total_escrowed = self
            .total_escrowed
            .checked_sub(amount)
            .ok_or(EscrowError::VaultUnderfunded)?;
        Ok(())
    }
}
