use actix_web::{Responder, web};
use ratings_lib::Database;
use tracing_actix_web::{DefaultRootSpanBuilder, RequestId, RootSpanBuilder};

use crate::{FitRequestId as _, RatingsErrorKind, RatingsResponse};

/// The actix route handler for the Not Found response.
async fn not_found(req_id: RequestId) -> RatingsResponse<impl Responder> {
    Err::<String, _>(RatingsErrorKind::EndpointNotFound).fit(req_id)
}

pub struct CustomRootSpanBuilder;

impl RootSpanBuilder for CustomRootSpanBuilder {
    fn on_request_start(request: &actix_web::dev::ServiceRequest) -> tracing::Span {
        tracing_actix_web::root_span!(request)
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<actix_web::dev::ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Registers the routes and the shared data of the API on the provided service config.
pub fn configure(cfg: &mut web::ServiceConfig, db: Database) {
    cfg.app_data(db)
        .service(crate::api_route())
        .default_service(web::to(not_found));
}
