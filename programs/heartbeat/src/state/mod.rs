pub mod config;
pub use config::*;

pub mod vault;
pub use vault::*;

pub mod commitment;
pub use commitment::*;

pub mod schedule;
pub use schedule::*;
