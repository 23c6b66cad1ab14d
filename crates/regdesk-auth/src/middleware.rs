//! Actix-web route guard middleware
//!
//! Runs the `RouteGuard` in front of every request and answers redirects
//! itself; allowed requests continue to the wrapped service untouched.

use crate::credentials::CredentialExtractor;
use crate::guard::RouteGuard;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures::future::{ready, LocalBoxFuture, Ready};
use regdesk_core::models::AuthDecision;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Middleware factory, registered with `App::wrap`
///
/// # Examples
///
/// ```no_run
/// use actix_web::App;
/// use regdesk_auth::{CredentialExtractor, RouteGuard, RouteGuardMiddleware};
/// use regdesk_core::config::GuardPolicyConfig;
/// use std::sync::Arc;
///
/// let guard = Arc::new(RouteGuard::from_config(&[GuardPolicyConfig::customer()])?);
/// let credentials = Arc::new(CredentialExtractor::presence("token", "isAdmin"));
/// let app = App::new().wrap(RouteGuardMiddleware::new(guard, credentials));
/// # Ok::<(), regdesk_core::AppError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteGuardMiddleware {
    guard: Arc<RouteGuard>,
    credentials: Arc<CredentialExtractor>,
}

impl RouteGuardMiddleware {
    pub fn new(guard: Arc<RouteGuard>, credentials: Arc<CredentialExtractor>) -> Self {
        Self { guard, credentials }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardService {
            service: Rc::new(service),
            guard: self.guard.clone(),
            credentials: self.credentials.clone(),
        }))
    }
}

/// Per-worker service produced by `RouteGuardMiddleware`
pub struct RouteGuardService<S> {
    service: Rc<S>,
    guard: Arc<RouteGuard>,
    credentials: Arc<CredentialExtractor>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let route_request = self.credentials.route_request(req.request());

        match self.guard.decide(&route_request) {
            AuthDecision::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            AuthDecision::RedirectTo(location) => {
                debug!(
                    path = %route_request.path,
                    has_token = route_request.has_token,
                    location = %location,
                    "Redirecting request"
                );

                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish()
                    .map_into_right_body();
                Box::pin(ready(Ok(req.into_response(response))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtService;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use regdesk_core::config::GuardPolicyConfig;
    use regdesk_core::models::UserRole;

    fn default_guard() -> Arc<RouteGuard> {
        Arc::new(
            RouteGuard::from_config(&[GuardPolicyConfig::customer(), GuardPolicyConfig::admin()])
                .unwrap(),
        )
    }

    fn location(resp: &ServiceResponse<impl actix_web::body::MessageBody>) -> Option<String> {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    macro_rules! guarded_app {
        ($credentials:expr) => {
            test::init_service(
                App::new()
                    .wrap(RouteGuardMiddleware::new(default_guard(), Arc::new($credentials)))
                    .default_service(web::to(|| async { "page" })),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_dashboard_redirects_to_login() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get().uri("/dashboard/profile").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/auth"));
    }

    #[actix_web::test]
    async fn test_token_cookie_allows_dashboard() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get()
            .uri("/dashboard/profile")
            .cookie(Cookie::new("token", "abc123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "page");
    }

    #[actix_web::test]
    async fn test_signed_in_user_bounced_from_login() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get()
            .uri("/auth")
            .cookie(Cookie::new("token", "abc123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/dashboard"));
    }

    #[actix_web::test]
    async fn test_admin_flag_must_be_true() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get()
            .uri("/admin/dashboard")
            .cookie(Cookie::new("token", "abc123"))
            .cookie(Cookie::new("isAdmin", "false"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp).as_deref(), Some("/admin/login"));

        let req = test::TestRequest::get()
            .uri("/admin/dashboard")
            .cookie(Cookie::new("token", "abc123"))
            .cookie(Cookie::new("isAdmin", "true"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unrelated_cookie_garbage_keeps_token() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header((header::COOKIE, "garbage; token=abc123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/admin/dashboard")
            .insert_header((header::COOKIE, "token=abc123; isAdmin=true; consent"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(location(&resp), None);
    }

    #[actix_web::test]
    async fn test_malformed_cookie_values_count_as_absent() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header((header::COOKIE, "token="))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/auth"));

        let req = test::TestRequest::get()
            .uri("/admin/users")
            .insert_header((header::COOKIE, "token=abc123; isAdmin=TRUE"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/admin/login"));
    }

    #[actix_web::test]
    async fn test_jwt_mode_end_to_end() {
        let jwt = Arc::new(JwtService::new("middleware-test-secret", 3600));
        let admin_token = jwt.issue_for("ops", UserRole::Admin).unwrap();
        let app = guarded_app!(CredentialExtractor::jwt("token", jwt.clone()));

        let req = test::TestRequest::get()
            .uri("/admin/login")
            .cookie(Cookie::new("token", admin_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp).as_deref(), Some("/admin/dashboard"));

        let req = test::TestRequest::get()
            .uri("/admin/dashboard")
            .cookie(Cookie::new("token", "forged"))
            .cookie(Cookie::new("isAdmin", "true"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp).as_deref(), Some("/admin/login"));
    }

    #[actix_web::test]
    async fn test_public_page_passes_through() {
        let app = guarded_app!(CredentialExtractor::presence("token", "isAdmin"));

        let req = test::TestRequest::get().uri("/dashboardX").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
