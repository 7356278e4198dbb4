use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::EscrowError;

/// Rules of the escrow, fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy {
    pub min_deposit: u64,
    pub protocol_fee: u64,
    pub grace_period: i64,
    pub checkin_cooldown: i64,
    pub required_checkins: u64,
    pub schedule_slack: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_deposit: DEFAULT_MIN_DEPOSIT,
            protocol_fee: DEFAULT_PROTOCOL_FEE,
            grace_period: DEFAULT_GRACE_PERIOD,
            checkin_cooldown: DEFAULT_CHECKIN_COOLDOWN,
            required_checkins: DEFAULT_REQUIRED_CHECKINS,
            schedule_slack: DEFAULT_SCHEDULE_SLACK,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Result<()> {
        // every qualifying deposit must leave something after the fee
        require!(self.min_deposit > self.protocol_fee, EscrowError::InvalidConfig);
        require!(self.grace_period > 0, EscrowError::InvalidConfig);
        require!(
            self.checkin_cooldown >= 0 && self.checkin_cooldown < self.grace_period,
            EscrowError::InvalidConfig
        );
        require!(self.required_checkins > 0, EscrowError::InvalidConfig);
        require!(self.schedule_slack >= 0, EscrowError::InvalidConfig);
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct EscrowParams {
    pub donation: Pubkey,
    pub treasury: Pubkey,
    pub policy: Policy,
}

#[account]
#[derive(InitSpace)]
pub struct EscrowConfig {
    pub authority: Pubkey,
    pub donation: Pubkey,  // receives forfeited balances
    pub treasury: Pubkey,  // receives protocol fees
    pub program_signer: Pubkey,
    pub bump: u8,
    pub vault_bump: u8,
    pub signer_bump: u8,
    pub policy: Policy,
}

impl EscrowConfig {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert!(Policy::default().validate().is_ok());
    }

    #[test]
    fn fee_must_stay_below_minimum_deposit() {
        let policy = Policy {
            protocol_fee: DEFAULT_MIN_DEPOSIT,
            ..Policy::default()
        };
        assert_eq!(policy.validate().unwrap_err(), EscrowError::InvalidConfig.into());
    }

    #[test]
    fn cooldown_must_fit_inside_grace_period() {
        let policy = Policy {
            checkin_cooldown: DEFAULT_GRACE_PERIOD,
            ..Policy::default()
        };
        assert!(policy.validate().is_err());

        let policy = Policy {
            checkin_cooldown: -1,
            ..Policy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn zero_required_checkins_rejected() {
        let policy = Policy {
            required_checkins: 0,
            ..Policy::default()
        };
        assert!(policy.validate().is_err());
    }
}
