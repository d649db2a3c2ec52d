pub mod graphql_handler;
pub mod health;
pub mod search_handler;

use actix_web::web;

use crate::auth::PasscodeMiddleware;

pub use health::{health_check, health_check_live};
pub use search_handler::{run_search, session_quota};

/// Mounts every route. `/api` and `/graphql` sit behind the passcode gate.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(
            web::scope("/api")
                .wrap(PasscodeMiddleware)
                .service(run_search)
                .service(session_quota),
        )
        .service(
            web::resource("/graphql")
                .route(web::post().to(graphql_handler::graphql))
                .wrap(PasscodeMiddleware),
        );
}
