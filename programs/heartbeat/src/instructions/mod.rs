pub mod initialize;
pub use initialize::*;

pub mod commitment;
pub use commitment::*;

pub mod liveness;
pub use liveness::*;

pub mod status;
pub use status::*;
