//! This module contains the cache invalidation port of the service, and the
//! Redis keys constructors of the cached read responses.
//!
//! The list and average responses of the API are cached under string keys.
//! When a rating is written, the keys bound to the affected professor and
//! module, and the global listings, must be purged. The rating submission
//! receives the purging side through the [`CacheInvalidator`] port, so it can
//! be checked with a recording implementation instead of a live Redis.

use core::fmt;
use std::future::Future;
use std::sync::Mutex;

use deadpool_redis::redis::{AsyncCommands as _, RedisWrite, ToRedisArgs};
use mkenv::prelude::*;

use crate::RedisPool;
use crate::error::RatingsResult;

const V1_KEY_PREFIX: &str = "v1";

const V1_PROFESSOR_KEY_PREFIX: &str = "professor";
const V1_MODULE_KEY_PREFIX: &str = "module";
const V1_PROFESSORS_LIST: &str = "professors";
const V1_MODULE_INSTANCES_LIST: &str = "module-instances";

macro_rules! create_key {
    (
        $(#[$($attr:tt)*])*
        struct $name:ident = $fn_name:ident $({
            $(
                $(#[$($field_attr:tt)*])*
                $field:ident: $field_ty:ty
            ),* $(,)?
        })?$(;$semicolon:tt)?
        |$self:ident, $f:ident| $fmt_expr:expr
    ) => {
        #[doc = concat!("The `", stringify!($name), "` Redis key.")]
        $(#[$($attr)*])*
        #[derive(Debug)]
        pub struct $name $({
            $(
                $(#[$($field_attr)*])*
                pub $field: $field_ty
            ),*
        })?$($semicolon)?

        #[doc = concat!("The constructor of the `", stringify!($name), "` Redis key.")]
        #[inline(always)]
        pub fn $fn_name($($($field: $field_ty),*)?) -> $name {
            $name { $($($field),*)? }
        }

        impl ToRedisArgs for $name {
            #[inline(always)]
            fn write_redis_args<W>(&self, out: &mut W)
            where
                W: ?Sized + RedisWrite,
            {
                out.write_arg_fmt(self);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&$self, $f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $fmt_expr
            }
        }
    }
}

create_key! {
    ///
    /// This key points to the cached detail response of a professor, with its
    /// average rating.
    struct ProfessorKey = professor_key {
        /// The professor ID.
        professor_id: String,
    }
    |self, f| write!(
        f,
        "{V1_KEY_PREFIX}:{V1_PROFESSOR_KEY_PREFIX}:{}",
        self.professor_id
    )
}

create_key! {
    ///
    /// This key points to a Redis HASH holding the cached in-module average
    /// responses of a module, one field per professor. Purging the key purges
    /// the averages of every professor in the module at once.
    struct ModuleKey = module_key {
        /// The module code.
        module_code: String,
    }
    |self, f| write!(
        f,
        "{V1_KEY_PREFIX}:{V1_MODULE_KEY_PREFIX}:{}",
        self.module_code
    )
}

create_key! {
    ///
    /// This key points to the cached response of the professor list.
    struct ProfessorsListKey = professors_list_key;;
    |self, f| write!(f, "{V1_KEY_PREFIX}:{V1_PROFESSORS_LIST}")
}

create_key! {
    ///
    /// This key points to the cached response of the module instance list.
    struct ModuleInstancesListKey = module_instances_list_key;;
    |self, f| write!(f, "{V1_KEY_PREFIX}:{V1_MODULE_INSTANCES_LIST}")
}

/// Returns the cache keys affected by a rating submission for the provided
/// professor and module.
pub fn affected_keys(professor_id: &str, module_code: &str) -> Vec<String> {
    vec![
        professor_key(professor_id.to_owned()).to_string(),
        module_key(module_code.to_owned()).to_string(),
        professors_list_key().to_string(),
        module_instances_list_key().to_string(),
    ]
}

/// The cache invalidation port used by the rating submission.
///
/// Implementors purge the cached responses bound to the provided keys. The
/// submission treats a failed invalidation as a degraded cache, never as a
/// failed write.
pub trait CacheInvalidator {
    /// Purges the cached responses bound to the provided keys.
    fn invalidate(&self, keys: Vec<String>) -> impl Future<Output = RatingsResult> + Send;
}

/// The Redis-backed cache of the read responses.
#[derive(Clone)]
pub struct RedisCache {
    pool: RedisPool,
}

impl RedisCache {
    /// Returns a new cache using the provided Redis pool.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Returns the cached value stored at the provided key, if any.
    pub async fn get<K>(&self, key: K) -> RatingsResult<Option<String>>
    where
        K: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.pool.get().await?;
        let value = conn.get(key).await?;
        Ok(value)
    }

    /// Stores a value at the provided key, with the configured TTL.
    pub async fn set<K>(&self, key: K, value: String) -> RatingsResult
    where
        K: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.pool.get().await?;
        let _: () = conn.set_ex(key, value, crate::env().cache_ttl.get()).await?;
        Ok(())
    }

    /// Returns the cached value stored in the hash at the provided key and field, if any.
    pub async fn hget<K>(&self, key: K, field: &str) -> RatingsResult<Option<String>>
    where
        K: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.pool.get().await?;
        let value = conn.hget(key, field).await?;
        Ok(value)
    }

    /// Stores a value in the hash at the provided key and field, refreshing the
    /// TTL of the whole hash.
    pub async fn hset<K>(&self, key: K, field: &str, value: String) -> RatingsResult
    where
        K: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.pool.get().await?;
        let _: () = conn.hset(&key, field, value).await?;
        let _: () = conn
            .expire(&key, crate::env().cache_ttl.get() as i64)
            .await?;
        Ok(())
    }
}

impl CacheInvalidator for RedisCache {
    async fn invalidate(&self, keys: Vec<String>) -> RatingsResult {
        let mut conn = self.pool.get().await?;
        let _: () = conn.del(keys).await?;
        Ok(())
    }
}

/// An invalidator that records the purged keys instead of touching any cache.
///
/// This is used by tests to check the keys affected by a write.
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    keys: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    /// Returns the keys invalidated so far.
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl CacheInvalidator for RecordingInvalidator {
    async fn invalidate(&self, keys: Vec<String>) -> RatingsResult {
        self.keys.lock().unwrap().extend(keys);
        Ok(())
    }
}
