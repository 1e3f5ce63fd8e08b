//! Request payloads for create and update calls.
//!
//! Create payloads carry every caller-supplied field; patch payloads
//! serialize only the fields that are present, so an omitted field is left
//! untouched by the server.

use crate::entity::{
    InspectionStatus, ReportStatus, TaskEvidenceType, TaskStatus, TaskType,
};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub org_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Only set during the sign-up exchange; absent for admin-created users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInspection {
    pub org_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspector_id: Option<Uuid>,
    pub status: InspectionStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub unit_metadata: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspector_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InspectionStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvidenceItem {
    pub inspection_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    pub ai_metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub inspection_id: Uuid,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub org_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskEvidence {
    pub task_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TaskEvidenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_omits_absent_fields() {
        let patch = UserPatch {
            role: Some(Role::Manager),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "role": "manager" }));
    }

    #[test]
    fn new_user_omits_absent_password() {
        let new = NewUser {
            org_id: Uuid::nil(),
            email: "a@b.c".into(),
            role: Role::Cleaner,
            password: None,
        };
        let value = serde_json::to_value(&new).unwrap();
        assert!(value.get("password").is_none());
    }

    #[test]
    fn task_patch_renames_kind() {
        let patch = TaskPatch {
            kind: Some(TaskType::Maintenance),
            status: Some(TaskStatus::Submitted),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["type"], "MAINTENANCE");
        assert_eq!(value["status"], "SUBMITTED");
        assert!(value.get("details").is_none());
    }
}
