//! The main crate of the module rating service.
//!
//! This crate is used by all the services related to the API. It contains
//! environment setup functions, the store operations on the entities, the
//! rating submission and average computations, and the cache invalidation
//! port of the read responses.
//!
//! If you wish to see the crate of the server program itself, take a look
//! at the [`rating_api`](../rating_api_lib/index.html) package.

#![warn(missing_docs)]

mod env;
mod pool;

pub mod cache;
pub mod error;
pub mod module;
pub mod must;
pub mod professor;
pub mod rating;
pub mod user;

/// The Redis pool type.
pub type RedisPool = deadpool_redis::Pool;
/// The type of a Redis connection.
pub type RedisConnection = deadpool_redis::Connection;

pub use env::*;
pub use pool::*;

use rand::Rng as _;

/// Returns a randomly-generated string with the `len` length. It contains alphanumeric characters.
pub fn gen_random_str(len: usize) -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .map(char::from)
        .take(len)
        .collect()
}
