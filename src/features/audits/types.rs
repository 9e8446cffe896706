//! Wire types for the audit endpoints. Several backend field names are the
//! original French column names (`valeur_reelle`, `statut`, ...); they are
//! mapped to English struct fields with serde renames because the paths and
//! field names are a fixed contract with the backend.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Audit {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub days_overdue: Option<i64>,
}

impl Audit {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}

/// Inspection outcome for one checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Conforme,
    NonConforme,
    Na,
}

impl ControlStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlStatus::Conforme => "conforme",
            ControlStatus::NonConforme => "non_conforme",
            ControlStatus::Na => "na",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlStatus::Conforme => "Conforme",
            ControlStatus::NonConforme => "Non conforme",
            ControlStatus::Na => "N/A",
        }
    }
}

/// A recorded control attached server-side to its repere.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ControlRecord {
    pub id: i64,
    #[serde(rename = "valeur_reelle", default)]
    pub actual_value: Option<f64>,
    #[serde(rename = "statut")]
    pub status: ControlStatus,
    #[serde(rename = "statut_display", default)]
    pub status_display: Option<String>,
    #[serde(rename = "commentaire", default)]
    pub comment: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "date_controle", default)]
    pub recorded_at: Option<String>,
}

/// An individually inspected checkpoint of an audit.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Repere {
    pub id: i64,
    #[serde(rename = "numero")]
    pub number: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "valeur_theorique", default)]
    pub expected_value: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "controle", default)]
    pub control: Option<ControlRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuditExecution {
    pub audit: Audit,
    pub reperes: Vec<Repere>,
    #[serde(default)]
    pub total_reperes: i64,
    #[serde(rename = "controles_effectues", default)]
    pub controls_done: i64,
}

impl AuditExecution {
    /// Index of the first checkpoint without a recorded control, where the
    /// stepper resumes.
    pub fn first_uncontrolled(&self) -> usize {
        self.reperes
            .iter()
            .position(|repere| repere.control.is_none())
            .unwrap_or(0)
    }
}

/// Local, not-yet-submitted control input for the current checkpoint.
#[derive(Clone, Debug, Default)]
pub struct ControlForm {
    pub actual_value: String,
    pub status: Option<ControlStatus>,
    pub comment: String,
    pub image: Option<web_sys::File>,
}

impl ControlForm {
    pub fn is_submittable(&self) -> bool {
        self.status.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_audits: i64,
    #[serde(default)]
    pub in_progress: i64,
    #[serde(default)]
    pub completed: i64,
    #[serde(default)]
    pub delayed: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DelayedAudit {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub days_overdue: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    #[serde(default)]
    pub delayed_audits: Vec<DelayedAudit>,
    #[serde(default)]
    pub recent_audits: Vec<Audit>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProgressPoint {
    pub date: String,
    pub progress: f64,
    #[serde(default)]
    pub target: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_payload_maps_backend_field_names() {
        let json = r#"{
            "audit": {"id": 9, "title": "Line A", "status": "in_progress"},
            "reperes": [
                {"id": 1, "numero": 1, "nom": "Axle bore", "valeur_theorique": 12.5,
                 "controle": {"id": 4, "valeur_reelle": 12.4, "statut": "conforme",
                              "commentaire": "ok"}},
                {"id": 2, "numero": 2, "nom": "Flange", "valeur_theorique": 3.0,
                 "controle": null}
            ],
            "total_reperes": 2,
            "controles_effectues": 1
        }"#;

        let execution: AuditExecution = serde_json::from_str(json).expect("deserialize");
        assert_eq!(execution.reperes[0].name, "Axle bore");
        assert_eq!(
            execution.reperes[0].control.as_ref().map(|c| c.status),
            Some(ControlStatus::Conforme)
        );
        assert_eq!(execution.first_uncontrolled(), 1);
        assert_eq!(execution.controls_done, 1);
    }

    #[test]
    fn first_uncontrolled_defaults_to_start_when_everything_is_done() {
        let json = r#"{
            "audit": {"id": 9},
            "reperes": [
                {"id": 1, "numero": 1, "nom": "A",
                 "controle": {"id": 2, "statut": "na", "commentaire": ""}}
            ]
        }"#;
        let execution: AuditExecution = serde_json::from_str(json).expect("deserialize");
        assert_eq!(execution.first_uncontrolled(), 0);
    }

    #[test]
    fn control_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&ControlStatus::NonConforme).expect("serialize"),
            "\"non_conforme\""
        );
        assert_eq!(ControlStatus::Na.as_str(), "na");
    }
}
