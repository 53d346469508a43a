//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::{AuthConfig, REFRESH_COOKIE_NAME};
use crate::application::token::TokenIssuer;
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, UpdateProfileInput,
    UpdateProfileUseCase, UploadStatsUseCase, VerifyTokenUseCase,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, DecodedClaims, LoginRequest, LogoutResponse, RefreshResponse, RegisterRequest,
    ResetPasswordRequest, ResetPasswordResponse, TokenInfo, UpdateProfileRequest,
    UploadStatsResponse, UserDto, VerifyTokenRequest, VerifyTokenResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let name = require_field(req.name, "Name is required")?;
    let email = require_field(req.email, "Email is required")?;
    let password = require_field(req.password, "Password is required")?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        name,
        email,
        company: req.company.unwrap_or_default(),
        password,
    };

    let output = use_case.execute(input).await?;

    let cookie = state.config.refresh_cookie().build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            access_token: output.access_token,
            user: UserDto::from(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let email = require_field(req.email, "Email is required")?;
    let password = require_field(req.password, "Password is required")?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(LoginInput { email, password }).await?;

    let cookie = state.config.refresh_cookie().build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            access_token: output.access_token,
            user: UserDto::from(&output.user),
        }),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let presented = platform::cookie::extract_cookie(&headers, REFRESH_COOKIE_NAME)
        .ok_or(AuthError::RefreshTokenRequired)?;

    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&presented).await?;

    let cookie = state.config.refresh_cookie().build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RefreshResponse {
            access_token: output.access_token,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let presented = platform::cookie::extract_cookie(&headers, REFRESH_COOKIE_NAME);

    let use_case = LogoutUseCase::new(state.repo.clone(), state.tokens.clone());
    use_case.execute(presented.as_deref()).await?;

    let cookie = state.config.refresh_cookie().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Verify Token
// ============================================================================

/// POST /api/auth/verify-token
pub async fn verify_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<VerifyTokenRequest>,
) -> AuthResult<Json<VerifyTokenResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    // Absent, null, non-string, and empty all collapse into the same error
    let token = req
        .token
        .as_ref()
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or(AuthError::TokenRequired)?
        .to_string();

    let use_case = VerifyTokenUseCase::new(state.tokens.clone());
    let output = use_case.execute(&token)?;

    Ok(Json(VerifyTokenResponse {
        decoded: DecodedClaims {
            sub: output.claims.sub,
            email: output.claims.email,
            iat: output.claims.iat,
            exp: output.claims.exp,
        },
        token_info: TokenInfo {
            algorithm: output.algorithm,
            token_type: output.token_type,
        },
    }))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserDto>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(&auth.user_id).await?;

    Ok(Json(UserDto::from(&user)))
}

/// PUT /api/auth/update-profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserDto>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let input = UpdateProfileInput {
        name: req.name,
        company: req.company,
    };

    let user = use_case.execute(&auth.user_id, input).await?;

    Ok(Json(UserDto::from(&user)))
}

// ============================================================================
// Reset Password
// ============================================================================

/// POST /api/auth/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<ResetPasswordResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let email = require_field(req.email, "Email is required")?;
    let new_password = require_field(req.new_password, "New password is required")?;

    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .execute(ResetPasswordInput {
            email,
            new_password,
        })
        .await?;

    Ok(Json(ResetPasswordResponse {
        success: true,
        message: "Password reset successfully".to_string(),
    }))
}

// ============================================================================
// Upload Counters (requires authentication)
// ============================================================================

/// GET /api/auth/upload-stats
pub async fn upload_stats<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UploadStatsResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = UploadStatsUseCase::new(state.repo.clone());
    let count = use_case.stats(&auth.email).await?;

    Ok(Json(UploadStatsResponse {
        email: auth.email.as_str().to_string(),
        upload_count: count,
    }))
}

/// POST /api/auth/increment-upload
pub async fn increment_upload<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UploadStatsResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = UploadStatsUseCase::new(state.repo.clone());
    let count = use_case.increment(&auth.email).await?;

    Ok(Json(UploadStatsResponse {
        email: auth.email.as_str().to_string(),
        upload_count: count,
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn require_field(value: Option<String>, message: &str) -> AuthResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AuthError::Validation(message.to_string())),
    }
}
