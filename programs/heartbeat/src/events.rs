use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Dormant,
    Alive,
    Perished,
}

#[event]
pub struct EscrowInitialized {
    pub authority: Pubkey,
    pub donation: Pubkey,
    pub treasury: Pubkey,
}

#[event]
pub struct ProtocolFeeCollected {
    pub participant: Pubkey,
    pub treasury: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Deposited {
    pub participant: Pubkey,
    pub gross: u64,
    pub net: u64,
    pub balance: u64,
    pub checkin_count: u64,
    pub opened: bool,
    pub timestamp: i64,
}

#[event]
pub struct CheckedIn {
    pub participant: Pubkey,
    pub checkin_count: u64,
    pub timestamp: i64,
}

#[event]
pub struct LivenessCheckArmed {
    pub participant: Pubkey,
    pub handle: u64,
    pub deadline: i64,
    pub earliest: i64,
    pub latest: i64,
}

#[event]
pub struct LivenessCheckCancelled {
    pub participant: Pubkey,
    pub handle: u64,
}

#[event]
pub struct LivenessEvaluated {
    pub participant: Pubkey,
    pub verdict: Verdict,
    pub timestamp: i64,
}

#[event]
pub struct Forfeited {
    pub participant: Pubkey,
    pub donation: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Withdrawn {
    pub participant: Pubkey,
    pub requested: u64,
    pub paid: u64,
    pub completed: bool,
}

#[event]
pub struct CommitmentSettled {
    pub participant: Pubkey,
    pub completed: bool,
}
