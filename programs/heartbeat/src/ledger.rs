use anchor_lang::prelude::*;

use crate::state::CommitmentRecord;

// `None` when the account was never created or has been closed
pub fn load<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

// a missing participant reads as the zero-valued record
pub fn get(info: &AccountInfo, participant: Pubkey) -> Result<CommitmentRecord> {
    Ok(load::<CommitmentRecord>(info)?.unwrap_or_else(|| CommitmentRecord::vacant(participant)))
}

pub fn remove<'info>(
    record: &mut Account<'info, CommitmentRecord>,
    refund_to: AccountInfo<'info>,
) -> Result<()> {
    record.reset();
    record.close(refund_to)
}
