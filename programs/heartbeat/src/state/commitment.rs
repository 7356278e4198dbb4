use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// Escrow position of one participant.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct CommitmentRecord {
    pub participant: Pubkey,
    pub bump: u8,
    pub balance: u64,
    pub last_checkin_time: i64,
    pub checkin_count: u64,
    pub active: bool,  // false once perished or settled
}

// settled records are purged, so they read back as Absent
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitmentState {
    Absent,
    Active,
    Perished,
}

impl CommitmentRecord {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn vacant(participant: Pubkey) -> Self {
        Self {
            participant,
            ..Self::default()
        }
    }

    // stamps owner and bump onto an account created by init_if_needed
    pub fn bind(&mut self, participant: Pubkey, bump: u8) {
        if self.participant == Pubkey::default() {
            self.participant = participant;
            self.bump = bump;
        }
    }

    pub fn has_history(&self) -> bool {
        self.checkin_count > 0 || self.last_checkin_time > 0
    }

    pub fn is_pristine(&self) -> bool {
        !self.active && self.balance == 0 && !self.has_history()
    }

    pub fn state(&self) -> CommitmentState {
        if self.active {
            CommitmentState::Active
        } else if self.has_history() {
            CommitmentState::Perished
        } else {
            CommitmentState::Absent
        }
    }

    pub fn deadline(&self, grace_period: i64) -> Result<i64> {
        self.last_checkin_time
            .checked_add(grace_period)
            .ok_or_else(|| error!(EscrowError::MathOverflow))
    }

    pub fn reset(&mut self) {
        *self = Self::vacant(self.participant);
    }
}
