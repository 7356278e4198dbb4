use anchor_lang::prelude::*;

// current cluster time in unix seconds
pub fn now() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}
