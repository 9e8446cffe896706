//! Client wrappers for the auth API endpoints. These centralize paths and
//! session-aware headers so route code never builds requests by hand, and
//! they must never log credentials or codes.

use crate::app_lib::{get_json, post_json, ApiError};
use crate::features::auth::store::SessionStore;
use crate::features::auth::types::{
    SigninRequest, SigninResponse, SignupRequest, VerifyCodeRequest, VerifyCodeResponse,
    VerifyEmailResponse,
};

/// Registers a new account. The created-user summary in the 201 body is not
/// needed by the flow, only the success/failure outcome.
pub async fn signup(store: &SessionStore, request: &SignupRequest) -> Result<(), ApiError> {
    post_json::<_, serde_json::Value>(store, "/api/auth/signup/", request).await?;
    Ok(())
}

/// Attempts a credential sign-in. A 403 `approval_code_required` rejection
/// surfaces as `ApiError::AuthRequired` carrying the account email.
pub async fn signin(store: &SessionStore, request: &SigninRequest) -> Result<SigninResponse, ApiError> {
    post_json(store, "/api/auth/signin/", request).await
}

/// Submits the six-digit approval code for the pending account.
pub async fn verify_code(
    store: &SessionStore,
    request: &VerifyCodeRequest,
) -> Result<VerifyCodeResponse, ApiError> {
    post_json(store, "/api/auth/verify-code/", request).await
}

/// Consumes an emailed verification token. Authorized by the token alone.
pub async fn verify_email(store: &SessionStore, token: &str) -> Result<VerifyEmailResponse, ApiError> {
    get_json(store, &format!("/api/auth/verify-email/{token}/")).await
}
