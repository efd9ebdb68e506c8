use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use errata_core::{REQUEST_ID_HEADER, RequestContext};

/// Middleware that attaches a `RequestContext` to the incoming request
///
/// The caller's request id, if any, is echoed on the response.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let context = RequestContext::from_parts(&parts);
    let request_id = parts.headers.get(REQUEST_ID_HEADER).cloned();

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Some(request_id) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    }

    response
}
