use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{bearer_token, Claims};
use crate::error::{messages, AppError};
use crate::services::AuthService;

/// Rejects requests without a valid bearer token before they reach the wrapped service.
///
/// A missing token yields 401 and a token that fails verification yields 403. On
/// success the verified `Claims` are stored in the request extensions for the
/// `AuthenticatedUser` extractor.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let auth = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| AppError::InternalServerError("AuthService is not registered".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized(messages::UNAUTHORIZED.into()))?;

    auth.validate(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKeys;
    use crate::db;
    use crate::models::User;
    use crate::store::UserStore;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use chrono::Utc;

    async fn auth_service(secret: &str) -> AuthService {
        let pool = db::connect_in_memory().await.unwrap();
        AuthService::new(UserStore::new(pool), TokenKeys::new(secret))
    }

    fn token_for(secret: &str) -> String {
        let user = User {
            id: 1,
            name: "Dora".into(),
            email: "dora@example.com".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        TokenKeys::new(secret).generate_token(&user).unwrap()
    }

    async fn echo_user(req: actix_web::HttpRequest) -> HttpResponse {
        let id = req.extensions().get::<Claims>().map(|c| c.id).unwrap_or(0);
        HttpResponse::Ok().body(id.to_string())
    }

    #[actix_rt::test]
    async fn test_middleware_status_codes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth_service("mw-secret").await))
                .service(
                    web::resource("/protected")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(echo_user)),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", token_for("other-secret")),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", token_for("mw-secret")),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, web::Bytes::from_static(b"1"));
    }
}
