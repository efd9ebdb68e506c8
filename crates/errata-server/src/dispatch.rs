use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use errata_core::{BufferedResponse, RequestContext};
use errata_dispatch::Dispatcher;

use crate::HandlerError;

/// Middleware that renders handler errors through the dispatcher
///
/// Responses without a [`HandlerError`] extension pass through untouched.
pub async fn dispatch_middleware(State(dispatcher): State<Arc<Dispatcher>>, request: Request, next: Next) -> Response {
    let context = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let mut response = next.run(request).await;

    let Some(handler_error) = response.extensions_mut().remove::<HandlerError>() else {
        return response;
    };

    let mut buffered = BufferedResponse::new();
    dispatcher.dispatch(&context, &mut buffered, handler_error.error());

    buffered.into_http().map(Body::from)
}
