use actix_web::web;

pub mod backend_health;
pub mod events;
pub mod fighters;
pub mod fights;
pub mod predictions;
pub mod users;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::welcome)
        .service(backend_health::backend_health);

    cfg.service(
        web::scope("/fighters")
            .service(fighters::list_fighters)
            .service(fighters::create_fighter)
            .service(fighters::get_fighter)
            .service(fighters::update_fighter)
    );
    cfg.service(
        web::scope("/fights")
            .service(fights::create_fight)
            .service(fights::get_fight_summary)
            .service(fights::get_fight)
    );
    cfg.service(
        web::scope("/events")
            .service(events::search_event_fights)
            .service(events::create_event)
            .service(events::get_event)
    );
    // Literal paths are registered before /{user_id}
    cfg.service(
        web::scope("/users")
            .service(users::search_users)
            .service(users::register)
            .service(users::login)
            .service(users::delete_user)
            .service(users::update_username)
            .service(users::update_password)
            .service(users::get_username)
    );
    cfg.service(
        web::scope("/predictions")
            .service(predictions::get_prediction_counts)
            .service(predictions::add_prediction)
    );
}
