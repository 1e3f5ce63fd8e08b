//! API entity records as the backend serializes them.
//!
//! Field names match the wire format exactly; `type` fields are mapped to
//! `kind` on the Rust side. Free-form JSON columns (settings, metadata,
//! report content, task details) stay as `serde_json::Value`.

use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub org_id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    #[default]
    InProgress,
    PendingApproval,
    Verified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: Uuid,
    pub org_id: Uuid,
    /// Unassigned inspections have no inspector yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector_id: Option<Uuid>,
    pub status: InspectionStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub unit_metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: Uuid,
    pub inspection_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    pub ai_metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Draft,
    Final,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub inspection_id: Uuid,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Draft,
    PendingProof,
    Submitted,
    Verified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    #[default]
    Cleaning,
    Maintenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub org_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEvidenceType {
    #[default]
    Before,
    After,
}

impl TaskEvidenceType {
    /// The wire representation, for callers building non-JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskEvidenceType::Before => "BEFORE",
            TaskEvidenceType::After => "AFTER",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskEvidence {
    pub id: Uuid,
    pub task_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TaskEvidenceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_enums_use_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&InspectionStatus::PendingApproval).unwrap(),
            "\"PENDING_APPROVAL\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::PendingProof).unwrap(),
            "\"PENDING_PROOF\""
        );
        assert_eq!(serde_json::to_string(&TaskEvidenceType::Before).unwrap(), "\"BEFORE\"");
    }

    #[test]
    fn task_kind_serializes_as_type() {
        let task = Task {
            id: Uuid::nil(),
            org_id: Uuid::nil(),
            inspection_id: None,
            assigned_to: None,
            status: TaskStatus::Draft,
            kind: TaskType::Cleaning,
            details: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "CLEANING");
        assert!(value.get("inspection_id").is_none());
    }

    #[test]
    fn user_parses_from_wire_json() {
        let raw = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "org_id": "223e4567-e89b-12d3-a456-426614174000",
            "email": "ops@example.com",
            "role": "inspector",
            "created_at": "2026-01-10T12:00:00Z",
            "updated_at": "2026-01-10T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.role, Role::Inspector);
        assert_eq!(user.email, "ops@example.com");
    }
}
