//! The module rating API library that the program uses.
//!
//! The content of this library is only made for the API program.

mod auth;
mod cached;
mod env;
mod error;
mod http;
mod must;
mod utils;

pub mod configure;

pub use auth::AuthGuard;
pub use env::*;
pub use error::*;
pub use http::api_route;
pub use utils::Res;
