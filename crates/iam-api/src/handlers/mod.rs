pub mod health;
pub mod slash;
