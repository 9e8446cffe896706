//! Shared frontend utilities for API access, configuration, errors, and
//! polling.
//!
//! ## Core authentication flow
//!
//! 1. **Signup:** POST `/api/auth/signup/`, then park the account behind the
//!    pending-verification screen while the user confirms their email.
//! 2. **Email link:** the emailed link lands on `/verification` and consumes
//!    the token via `/api/auth/verify-email/{token}/`.
//! 3. **Approval code:** once an admin approves the account, sign-in answers
//!    with `approval_code_required` and the six-digit code screen finishes the
//!    flow against `/api/auth/verify-code/`.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features.

pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod poll;

pub(crate) const GIT_SHA: &str = env!("AUDITDESK_GIT_SHA");

pub(crate) use api::{delete_json, get_json, post_empty, post_form, post_json};
pub(crate) use errors::ApiError;
