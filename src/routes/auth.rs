use crate::{
    auth::{AuthenticatedUser, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ValidateResponse},
    error::{messages, AppError},
    services::AuthService,
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates the account and answers 201 with a confirmation message. The client logs
/// in separately to obtain a token.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    auth.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: messages::USER_CREATED.to_string(),
    }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token valid for 24 hours.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// Reports whether the presented bearer token is still valid, and whose it is.
#[get("/validate", wrap = "crate::auth::AuthMiddleware")]
pub async fn validate(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: true,
        user: user.0.profile(),
    })
}
