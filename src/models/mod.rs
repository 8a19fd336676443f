pub mod common;
pub mod event;
pub mod fight;
pub mod fighter;
pub mod prediction;
pub mod user;
