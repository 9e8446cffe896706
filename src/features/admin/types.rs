use crate::features::audits::types::Audit;
use crate::features::me::types::Profile;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub total_audits: i64,
    #[serde(default)]
    pub pending_audits: i64,
    #[serde(default)]
    pub in_progress_audits: i64,
    #[serde(default)]
    pub completed_audits: i64,
    #[serde(default)]
    pub delayed_audits: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OperatorStats {
    #[serde(default)]
    pub audit_count: i64,
    #[serde(default)]
    pub pending_audits: i64,
    #[serde(default)]
    pub in_progress_audits: i64,
    #[serde(default)]
    pub completed_audits: i64,
    #[serde(default)]
    pub delayed_audits: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OperatorOverview {
    pub user: Profile,
    pub stats: OperatorStats,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminDashboard {
    pub global_stats: GlobalStats,
    #[serde(default)]
    pub operators: Vec<OperatorOverview>,
    #[serde(default)]
    pub recent_audits: Vec<Audit>,
    #[serde(default)]
    pub delayed_audits: Vec<Audit>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Operator {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_dashboard_deserializes_nested_operator_stats() {
        let json = r#"{
            "global_stats": {"total_audits": 12, "pending_audits": 3,
                             "in_progress_audits": 4, "completed_audits": 5,
                             "delayed_audits": 1},
            "operators": [{
                "user": {"id": 2, "email": "op@x.com", "role": "operator"},
                "stats": {"audit_count": 6, "completed_audits": 2}
            }],
            "recent_audits": [],
            "delayed_audits": []
        }"#;

        let dashboard: AdminDashboard = serde_json::from_str(json).expect("deserialize");
        assert_eq!(dashboard.global_stats.total_audits, 12);
        assert_eq!(dashboard.operators[0].stats.audit_count, 6);
        assert_eq!(dashboard.operators[0].user.email, "op@x.com");
    }
}
