//! The authentication system.
//!
//! It is used by the console client and any other consumer of the API to
//! authenticate the ratings of the users.
//!
//! When a user logs in with their credentials, the system generates a random
//! token, stores its sha256 digest in the `auth_tokens` table, and replies
//! with the token. A user holds at most one token: logging in again replaces
//! the stored digest.
//!
//! For every API route that requires authentication, the system retrieves the
//! `UserLogin` and `Authorization` headers provided with the request, hashes
//! the presented token, and compares it with the stored digest. Stored tokens
//! also carry their issue date, checked against the configured time-to-live.
//!
//! Routes that only read the module catalog or the professor averages don't
//! use this system at all: they are open. The visibility policy of a route is
//! simply whether its handler extracts an [`AuthGuard`].

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use entity::auth_tokens;
use mkenv::prelude::*;
use ratings_lib::{Database, gen_random_str, must as lib_must};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait as _};
use sha256::digest;
use tracing_actix_web::RequestId;

use crate::error::{
    FitRequestId as _, RatingsErrorKind, RatingsResponse, RatingsResult, RatingsResultExt as _,
};
use crate::must;
use crate::utils::Res;

/// The length of the issued tokens.
const TOKEN_LEN: usize = 32;

/// Generates, stores, and returns a new authentication token for the provided user.
///
/// The token is stored hashed. A user logging in again gets a fresh token
/// replacing the previous one.
pub async fn gen_token_for<C: ConnectionTrait>(conn: &C, user_id: u32) -> RatingsResult<String> {
    let token = gen_random_str(TOKEN_LEN);

    let auth_token = auth_tokens::ActiveModel {
        user_id: Set(user_id),
        token_hash: Set(digest(&*token)),
        created_at: Set(chrono::Utc::now().naive_utc()),
    };

    auth_tokens::Entity::insert(auth_token)
        .on_conflict(
            OnConflict::column(auth_tokens::Column::UserId)
                .update_columns([
                    auth_tokens::Column::TokenHash,
                    auth_tokens::Column::CreatedAt,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await
        .with_api_err()?;

    Ok(token)
}

/// Checks for a successful authentication for the user with its login and token.
///
/// # Returns
///
/// * If the login is unknown, or the token is missing, doesn't match the
///   stored one, or has expired, it returns an `Unauthorized` error
/// * Otherwise, it returns the ID of the authenticated user
pub async fn check_auth_for<C: ConnectionTrait>(
    conn: &C,
    login: &str,
    token: Option<&str>,
) -> RatingsResult<u32> {
    let Some(token) = token else {
        return Err(RatingsErrorKind::Unauthorized);
    };

    let user = match lib_must::have_user(conn, login).await {
        Ok(user) => user,
        Err(ratings_lib::error::RatingsError::UserNotFound(_)) => {
            return Err(RatingsErrorKind::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };

    let stored = auth_tokens::Entity::find_by_id(user.id)
        .one(conn)
        .await
        .with_api_err()?;

    let Some(stored) = stored else {
        return Err(RatingsErrorKind::Unauthorized);
    };

    if stored.token_hash != digest(token) {
        return Err(RatingsErrorKind::Unauthorized);
    }

    let ttl = chrono::Duration::seconds(ratings_lib::env().token_ttl.get());
    if chrono::Utc::now().naive_utc() > stored.created_at + ttl {
        return Err(RatingsErrorKind::Unauthorized);
    }

    Ok(user.id)
}

struct ExtAuthHeaders {
    user_login: Option<String>,
    authorization: Option<String>,
}

fn ext_auth_headers(req: &HttpRequest) -> ExtAuthHeaders {
    fn ext_header(req: &HttpRequest, header: &str) -> Option<String> {
        req.headers()
            .get(header)
            .and_then(|h| h.to_str().map(str::to_owned).ok())
    }

    ExtAuthHeaders {
        user_login: ext_header(req, "UserLogin"),
        authorization: ext_header(req, "Authorization"),
    }
}

/// The guard of the owner-scoped routes.
///
/// Extracting it checks the `UserLogin` and `Authorization` headers of the
/// request against the stored token of the user. Routes without this guard
/// are open reads.
pub struct AuthGuard {
    /// The ID of the authenticated user.
    pub user_id: u32,
    /// The login of the authenticated user.
    pub login: String,
}

impl FromRequest for AuthGuard {
    type Error = crate::TracedError;

    type Future = Pin<Box<dyn Future<Output = RatingsResponse<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        async fn check(
            request_id: RequestId,
            db: Database,
            login: Option<String>,
            token: Option<String>,
        ) -> RatingsResponse<AuthGuard> {
            let Some(login) = login else {
                return Err(RatingsErrorKind::Unauthorized).fit(request_id);
            };

            let user_id = check_auth_for(&db.sql_conn, &login, token.as_deref())
                .await
                .fit(request_id)?;

            Ok(AuthGuard { user_id, login })
        }

        let req_id = must::have_request_id(req);
        let Res(db) = must::have_db(req);
        let ExtAuthHeaders {
            user_login,
            authorization,
        } = ext_auth_headers(req);

        Box::pin(check(req_id, db, user_login, authorization))
    }
}
