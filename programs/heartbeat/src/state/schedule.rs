use anchor_lang::prelude::*;

use crate::error::EscrowError;

// pending self-invoked liveness check of one participant, arming bumps the
// handle so a superseded call can never run
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct ScheduledCheck {
    pub participant: Pubkey,
    pub bump: u8,
    pub handle: u64,
    pub deadline: i64,
    pub earliest: i64,
    pub latest: i64,
    pub armed: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub deadline: i64,
    pub earliest: i64,
    pub latest: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmReceipt {
    pub handle: u64,
    pub cancelled: Option<u64>,
}

impl ScheduledCheck {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    // stamps owner and bump onto an account created by init_if_needed
    pub fn bind(&mut self, participant: Pubkey, bump: u8) {
        if self.participant == Pubkey::default() {
            self.participant = participant;
            self.bump = bump;
        }
    }

    // nothing pending is fine, the call may already have fired
    pub fn cancel(&mut self) -> Option<u64> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        Some(self.handle)
    }

    pub fn arm(&mut self, request: ScheduleRequest) -> Result<ArmReceipt> {
        let handle = self.handle.checked_add(1).ok_or(EscrowError::MathOverflow)?;
        let cancelled = self.cancel();

        self.handle = handle;
        self.deadline = request.deadline;
        self.earliest = request.earliest;
        self.latest = request.latest;
        self.armed = true;

        Ok(ArmReceipt { handle, cancelled })
    }

    // the pending call has fired
    pub fn consume(&mut self) {
        self.armed = false;
    }

    pub fn is_pending(&self, now: i64) -> bool {
        self.armed && now <= self.latest
    }

    pub fn pending_request(&self) -> Option<ScheduleRequest> {
        self.armed.then_some(ScheduleRequest {
            deadline: self.deadline,
            earliest: self.earliest,
            latest: self.latest,
        })
    }

    pub fn ensure_executable(&self, handle: u64, now: i64) -> Result<()> {
        require!(self.armed, EscrowError::ScheduleNotArmed);
        require!(handle == self.handle, EscrowError::StaleSchedule);
        require!(now >= self.earliest, EscrowError::ScheduleNotDue);
        require!(now <= self.latest, EscrowError::ScheduleExpired);
        Ok(())
    }
}
