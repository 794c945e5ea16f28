//! Session resolution middleware.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Resolves the session cookie and stores the
/// [`CurrentSession`](crate::application::services::CurrentSession) in the
/// request extensions.
///
/// Requests without a valid cookie proceed as anonymous. Handlers extract the
/// session with `Extension<CurrentSession>`.
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the session store fails.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::session;
///
/// let app = Router::new()
///     .route("/", get(session_status_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // HTTP/2 clients may split cookies over several headers.
    let cookies = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");

    let cookie_header = (!cookies.is_empty()).then_some(cookies.as_str());
    let session = st.sessions.resolve(cookie_header).await?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
