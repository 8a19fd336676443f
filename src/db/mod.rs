pub mod event_queries;
pub mod fight_queries;
pub mod fighter_queries;
pub mod helpers;
pub mod prediction_queries;
pub mod user_queries;
