pub mod login_google;
pub mod sign_in;
pub mod sign_up;

use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Routes that establish a session rather than require one.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/google", post(login_google::login_google))
        .route("/sign-up", post(sign_up::sign_up))
        .route("/sign-in", post(sign_in::sign_in))
}

#[derive(OpenApi)]
#[openapi(
    paths(login_google::login_google, sign_up::sign_up, sign_in::sign_in),
    components(schemas(
        login_google::GoogleLoginRequest,
        login_google::GoogleLoginResponse,
        sign_up::SignUpRequest,
        sign_up::SignUpResponse,
        sign_in::SignInRequest,
        sign_in::SignInResponse,
    ))
)]
pub struct ApiDoc;
