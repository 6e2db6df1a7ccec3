//! JSON error bodies
//!
//! Every error response leaves the server as `{"error": "<message>"}`,
//! whether it came from a handler's `StatusError` or from routing itself.

use salvo::{
    http::ResBody,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

fn default_message(code: StatusCode) -> String {
    match code {
        StatusCode::NOT_FOUND => "Not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    }
}

/// Catcher hoop rewriting error responses into [`ErrorResponse`] bodies.
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let code = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !code.is_client_error() && !code.is_server_error() {
        return;
    }

    let error = match res.take_body() {
        ResBody::Error(status_error) if status_error.code == code => {
            brief_or_default(&status_error.brief, code)
        }
        _ => default_message(code),
    };

    res.status_code(code);
    res.render(Json(ErrorResponse { error }));

    ctrl.skip_rest();
}

/// `StatusError` constructors fill `brief` with a generic sentence; those are
/// replaced with the shorter defaults.
fn brief_or_default(brief: &str, code: StatusCode) -> String {
    let generic = match code {
        StatusCode::NOT_FOUND => StatusError::not_found().brief,
        StatusCode::METHOD_NOT_ALLOWED => StatusError::method_not_allowed().brief,
        StatusCode::INTERNAL_SERVER_ERROR => StatusError::internal_server_error().brief,
        _ => String::new(),
    };

    if brief.trim().is_empty() || brief == generic {
        default_message(code)
    } else {
        brief.to_string()
    }
}
