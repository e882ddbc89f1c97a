//! Best-effort caching of the read responses.
//!
//! The list and average handlers store their serialized body in Redis, under
//! the keys of [`ratings_lib::cache`], and serve it back until a rating
//! submission purges it. A cache failure is never surfaced to the caller:
//! the handler logs it and falls back to the store.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use deadpool_redis::redis::ToRedisArgs;
use ratings_lib::cache::RedisCache;
use serde::Serialize;

fn json_body(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// Returns the cached response stored at the provided key, if any.
pub async fn lookup<K>(cache: &RedisCache, key: K) -> Option<HttpResponse>
where
    K: ToRedisArgs + Send + Sync,
{
    match cache.get(key).await {
        Ok(Some(body)) => Some(json_body(body)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("failed to read cached response: {e}");
            None
        }
    }
}

/// Returns the cached response stored in the hash at the provided key and field, if any.
pub async fn lookup_field<K>(cache: &RedisCache, key: K, field: &str) -> Option<HttpResponse>
where
    K: ToRedisArgs + Send + Sync,
{
    match cache.hget(key, field).await {
        Ok(Some(body)) => Some(json_body(body)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("failed to read cached response: {e}");
            None
        }
    }
}

/// Serializes the body, stores it at the provided key, and returns the response.
///
/// A failed store is logged and the response is returned anyway.
pub async fn store<K, T>(cache: &RedisCache, key: K, body: &T) -> HttpResponse
where
    K: ToRedisArgs + Send + Sync,
    T: Serialize,
{
    match serde_json::to_string(body) {
        Ok(serialized) => {
            if let Err(e) = cache.set(key, serialized.clone()).await {
                tracing::warn!("failed to store cached response: {e}");
            }
            json_body(serialized)
        }
        Err(e) => {
            tracing::warn!("failed to serialize response for caching: {e}");
            HttpResponse::Ok().json(body)
        }
    }
}

/// Serializes the body, stores it in the hash at the provided key and field,
/// and returns the response.
///
/// A failed store is logged and the response is returned anyway.
pub async fn store_field<K, T>(cache: &RedisCache, key: K, field: &str, body: &T) -> HttpResponse
where
    K: ToRedisArgs + Send + Sync,
    T: Serialize,
{
    match serde_json::to_string(body) {
        Ok(serialized) => {
            if let Err(e) = cache.hset(key, field, serialized.clone()).await {
                tracing::warn!("failed to store cached response: {e}");
            }
            json_body(serialized)
        }
        Err(e) => {
            tracing::warn!("failed to serialize response for caching: {e}");
            HttpResponse::Ok().json(body)
        }
    }
}
