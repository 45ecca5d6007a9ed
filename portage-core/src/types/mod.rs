/// Assembled transfer calls
mod transfer;

pub use transfer::*;
