//! Admin token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::warn;

use crate::state::State;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let Some(expected) = state.admin_token.as_ref() else {
        warn!("admin request rejected: ADMIN_API_TOKEN is not configured");

        res.render(StatusError::unauthorized().brief("Unauthorized"));
        ctrl.skip_rest();

        return;
    };

    let authorized = extract_bearer_token(req).is_some_and(|token| expected.matches(token));

    if !authorized {
        res.render(StatusError::unauthorized().brief("Unauthorized"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        catcher::Catcher,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use gallery_app::domain::orders::MockOrdersService;

    use crate::{
        errors::{ErrorResponse, json_errors},
        state::AdminToken,
        test_helpers::{TEST_ADMIN_TOKEN, admin_orders_service, strict_app},
    };

    use super::*;

    #[salvo::handler]
    async fn secret(res: &mut Response) {
        res.render("admin only");
    }

    fn make_service() -> Service {
        admin_orders_service(MockOrdersService::new(), Router::with_path("admin").get(secret))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut res = TestClient::get("http://example.com/admin")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "Unauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_token_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, "Bearer nope", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, format!("Basic {TEST_ADMIN_TOKEN}"), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_passes_through() -> TestResult {
        let mut res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admin only");

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_token_rejects_everything() -> TestResult {
        let state = State::from_app_context(strict_app(), AdminToken::from_config(None));

        let service = Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .push(Router::with_path("admin").get(secret)),
        )
        .catcher(Catcher::default().hoop(json_errors));

        let res = TestClient::get("http://example.com/admin")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"), true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
