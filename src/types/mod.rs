pub mod balance;
pub mod chart;
pub mod deposit;
pub mod wallet;

pub use balance::*;
pub use chart::*;
pub use deposit::*;
pub use wallet::*;
