//! Module used to serve the routes of the API. Each submodule is specific
//! for a route segment.

use actix_web::web::JsonConfig;
use actix_web::{Scope, web};

use self::module::module_scope;
use self::professor::professor_scope;
use self::rating::rating_scope;
use self::user::user_scope;

pub mod module;
pub mod professor;
pub mod rating;
pub mod user;

/// Returns the scope of all the routes of the API.
pub fn api_route() -> Scope {
    let json_config = JsonConfig::default().limit(1024 * 16);

    web::scope("")
        .app_data(json_config)
        .service(user_scope())
        .service(professor_scope())
        .service(rating_scope())
        .service(module_scope())
}
