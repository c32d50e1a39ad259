pub mod card;
pub mod common;
