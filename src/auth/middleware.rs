use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

/// Route guard for the protected scope: requests without an
/// authenticated session are redirected to /login. Per-dashboard role
/// checks happen in the handlers.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let authenticated = session.get::<i64>("user_id").unwrap_or(None).is_some();

    if !authenticated {
        let redirect = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(redirect).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
