pub mod backend_health_handler;
pub mod event_handler;
pub mod fight_handler;
pub mod fighter_handler;
pub mod prediction_handler;
pub mod user_handler;
