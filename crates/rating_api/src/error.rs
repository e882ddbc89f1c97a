use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};
use tracing_actix_web::RequestId;

#[derive(thiserror::Error, Debug)]
#[repr(i32)] // i32 to be used with clients that don't support unsigned integers
#[rustfmt::skip]
pub enum RatingsErrorKind {
    // Caution: when creating a new error, you must ensure its code isn't
    // in conflict with another one in `ratings_lib::RatingsError`.

    // --------
    // --- Internal server errors
    // --------

    #[error(transparent)]
    IOError(#[from] std::io::Error) = 101,

    // ...Errors from ratings_lib

    #[error("unknown error: {0}")]
    Unknown(String) = 105,

    // --------
    // --- Authentication errors
    // --------

    #[error("unauthorized")]
    Unauthorized = 201,
    #[error("invalid credentials")]
    InvalidCredentials = 202,

    // --------
    // --- Logical errors
    // --------

    #[error("not found")]
    EndpointNotFound = 301,
    #[error("missing field `{0}`")]
    MissingField(&'static str) = 302,

    // ...Errors from ratings_lib

    #[error(transparent)]
    Lib(#[from] ratings_lib::error::RatingsError),
}

#[derive(serde::Serialize)]
pub struct RatingsErrorKindResponse {
    pub r#type: i32,
    pub message: String,
}

impl actix_web::ResponseError for RatingsErrorKind {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let (r#type, status_code) = self.get_err_type_and_status_code();
        let mut res = HttpResponse::build(status_code);

        let message = self.to_string();
        res.extensions_mut().insert(Some(RatingsErrorKindResponse {
            r#type,
            message: message.clone(),
        }));

        res.json(RatingsErrorKindResponse { r#type, message })
    }
}

impl RatingsErrorKind {
    pub fn get_err_type_and_status_code(&self) -> (i32, StatusCode) {
        use RatingsErrorKind as E;
        use StatusCode as S;
        use ratings_lib::error::RatingsError as LE;

        match self {
            E::IOError(_) => (101, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Db(_)) => (102, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Redis(_)) => (103, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Pool(_)) => (104, S::INTERNAL_SERVER_ERROR),
            E::Unknown(_) => (105, S::INTERNAL_SERVER_ERROR),

            E::Unauthorized => (201, S::UNAUTHORIZED),
            E::InvalidCredentials => (202, S::UNAUTHORIZED),

            E::EndpointNotFound => (301, S::NOT_FOUND),
            E::MissingField(_) => (302, S::BAD_REQUEST),
            E::Lib(LE::InvalidScore(_)) => (303, S::BAD_REQUEST),
            E::Lib(LE::UserNotFound(_)) => (304, S::NOT_FOUND),
            E::Lib(LE::ProfessorNotFound(_)) => (305, S::NOT_FOUND),
            E::Lib(LE::ModuleNotFound(_)) => (306, S::NOT_FOUND),
            E::Lib(LE::ModuleInstanceNotFound(_, _, _)) => (307, S::NOT_FOUND),
            E::Lib(LE::ProfessorAlreadyExists(_)) => (308, S::CONFLICT),
            E::Lib(LE::ModuleAlreadyExists(_)) => (309, S::CONFLICT),
            E::Lib(LE::ModuleInstanceAlreadyExists(_, _, _)) => (310, S::CONFLICT),
            E::Lib(LE::UsernameAlreadyExists(_)) => (311, S::CONFLICT),
        }
    }
}

impl From<sea_orm::DbErr> for RatingsErrorKind {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Lib(value.into())
    }
}

#[derive(Debug)]
pub struct TracedError {
    pub status_code: Option<StatusCode>,
    pub r#type: Option<i32>,
    pub request_id: RequestId,
    pub error: actix_web::Error,
}

impl fmt::Display for TracedError {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for TracedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl TracedError {
    fn to_err_res(&self, r#type: i32) -> ErrorResponse {
        ErrorResponse {
            request_id: self.request_id.to_string(),
            r#type,
            message: self.error.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
}

impl actix_web::ResponseError for TracedError {
    fn error_response(&self) -> HttpResponse {
        let r#type = self.r#type.unwrap_or(105);
        let status_code = self
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        HttpResponse::build(status_code).json(self.to_err_res(r#type))
    }
}

pub type RatingsResult<T> = Result<T, RatingsErrorKind>;

/// The result type of the route handlers: the error carries the ID of the
/// failed request, so the response can embed it.
pub type RatingsResponse<T> = Result<T, TracedError>;

/// Attaches the request ID to the error of a result, to fit it in a
/// [`RatingsResponse`].
pub trait FitRequestId<T, E> {
    fn fit(self, request_id: RequestId) -> RatingsResponse<T>;
}

impl<T, E> FitRequestId<T, E> for Result<T, E>
where
    RatingsErrorKind: From<E>,
{
    fn fit(self, request_id: RequestId) -> RatingsResponse<T> {
        self.map_err(|e| {
            let error = RatingsErrorKind::from(e);
            let (r#type, status_code) = error.get_err_type_and_status_code();
            TracedError {
                status_code: Some(status_code),
                r#type: Some(r#type),
                request_id,
                error: error.into(),
            }
        })
    }
}

/// Converts a `Result<T, E>` in which `E` is convertible to [`ratings_lib::error::RatingsError`]
/// into a [`RatingsResult<T>`].
pub trait RatingsResultExt<T> {
    fn with_api_err(self) -> RatingsResult<T>;
}

impl<T, E> RatingsResultExt<T> for Result<T, E>
where
    ratings_lib::error::RatingsError: From<E>,
{
    fn with_api_err(self) -> RatingsResult<T> {
        self.map_err(ratings_lib::error::RatingsError::from)
            .map_err(Into::into)
    }
}
