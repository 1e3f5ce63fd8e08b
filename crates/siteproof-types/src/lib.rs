//! Shared API types for siteproof.
//!
//! Everything that crosses the wire or the local session store is defined
//! here, so the policy, session, client, and console crates all agree on a
//! single shape for each record.

mod entity;
mod payload;
mod role;

pub use entity::{
    EvidenceItem, Inspection, InspectionStatus, Organization, Report, ReportStatus, Task,
    TaskEvidence, TaskEvidenceType, TaskStatus, TaskType, User,
};
pub use payload::{
    InspectionPatch, NewEvidenceItem, NewInspection, NewOrganization, NewReport, NewTask,
    NewTaskEvidence, NewUser, OrganizationPatch, ReportPatch, TaskPatch, UserPatch,
};
pub use role::{Role, RoleParseError};
