pub mod balance;
pub mod habits;
pub mod progress;
pub mod streak;
