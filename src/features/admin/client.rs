//! Client wrappers for admin-scoped endpoints. All of them require the bearer
//! token and CSRF header the shared API layer attaches.

use crate::app_lib::{delete_json, get_json, post_empty, post_json, ApiError};
use crate::features::admin::types::{AdminDashboard, Operator};
use crate::features::audits::types::Audit;
use crate::features::auth::store::SessionStore;
use serde_json::Value;

pub async fn fetch_dashboard(store: &SessionStore) -> Result<AdminDashboard, ApiError> {
    get_json(store, "/api/admin/dashboard/").await
}

pub async fn fetch_operators(store: &SessionStore) -> Result<Vec<Operator>, ApiError> {
    get_json(store, "/api/admin/operators/").await
}

pub async fn fetch_pending_operators(store: &SessionStore) -> Result<Vec<Operator>, ApiError> {
    get_json(store, "/api/admin/pending-operators/").await
}

pub async fn approve_operator(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    post_empty(store, &format!("/api/admin/operators/{operator_id}/approve/")).await
}

pub async fn reject_operator(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    post_empty(store, &format!("/api/admin/operators/{operator_id}/reject/")).await
}

pub async fn disable_operator(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    post_empty(store, &format!("/api/admin/operators/{operator_id}/disable/")).await
}

pub async fn enable_operator(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    post_empty(store, &format!("/api/admin/operators/{operator_id}/enable/")).await
}

pub async fn delete_operator(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    delete_json(store, &format!("/api/admin/operators/{operator_id}/delete/")).await
}

/// Generates a batch of audits for one operator.
pub async fn generate_audits(store: &SessionStore, operator_id: i64) -> Result<Value, ApiError> {
    post_json(
        store,
        "/api/admin/generate-audits/",
        &serde_json::json!({ "operator_id": operator_id }),
    )
    .await
}

pub async fn fetch_unassigned_audits(store: &SessionStore) -> Result<Vec<Audit>, ApiError> {
    get_json(store, "/api/admin/unassigned-audits/").await
}
