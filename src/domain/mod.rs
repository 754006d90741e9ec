pub mod bet;
pub mod odds;

pub use bet::*;
pub use odds::Odds;
