//! Client wrappers for the audit execution and reporting endpoints.

use crate::app_lib::{get_json, post_empty, post_form, ApiError};
use crate::features::audits::types::{
    Audit, AuditExecution, ControlForm, ControlRecord, Dashboard, ProgressPoint,
};
use crate::features::auth::store::SessionStore;

pub async fn fetch_execution(store: &SessionStore, audit_id: i64) -> Result<AuditExecution, ApiError> {
    get_json(store, &format!("/api/audits/{audit_id}/execution/")).await
}

/// Submits the control for one repere as multipart form data. The image part
/// is attached only when one was captured.
pub async fn submit_control(
    store: &SessionStore,
    repere_id: i64,
    control: &ControlForm,
) -> Result<ControlRecord, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Config("Failed to build control form.".to_string()))?;
    let append = |key: &str, value: &str| {
        form.append_with_str(key, value)
            .map_err(|_| ApiError::Config("Failed to build control form.".to_string()))
    };
    append("valeur_reelle", &control.actual_value)?;
    append(
        "statut",
        control.status.map(|status| status.as_str()).unwrap_or(""),
    )?;
    append("commentaire", &control.comment)?;
    if let Some(image) = &control.image {
        form.append_with_blob("image", image)
            .map_err(|_| ApiError::Config("Failed to attach control image.".to_string()))?;
    }

    post_form(store, &format!("/api/reperes/{repere_id}/control/"), form).await
}

/// Marks the audit's execution complete once every repere is controlled.
pub async fn complete_execution(store: &SessionStore, audit_id: i64) -> Result<serde_json::Value, ApiError> {
    post_empty(store, &format!("/api/audits/{audit_id}/execution/")).await
}

pub async fn regenerate_reperes(store: &SessionStore, audit_id: i64) -> Result<serde_json::Value, ApiError> {
    post_empty(store, &format!("/api/audits/{audit_id}/regenerate-reperes/")).await
}

pub async fn fetch_dashboard(store: &SessionStore) -> Result<Dashboard, ApiError> {
    get_json(store, "/api/audits/dashboard/").await
}

pub async fn fetch_operator_audits(store: &SessionStore) -> Result<Vec<Audit>, ApiError> {
    get_json(store, "/api/operator-audits/").await
}

pub async fn fetch_progress(store: &SessionStore, period: &str) -> Result<Vec<ProgressPoint>, ApiError> {
    get_json(store, &format!("/api/audits/progress/?period={period}")).await
}
