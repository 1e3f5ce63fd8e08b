//! Typed resource operations over the canonical `/v1` surface.
//!
//! Each method threads the caller's [`RequestContext`], so the same call
//! site serves both partitions. Collection endpoints take the filter
//! parameters the backend expects as query strings.
//!
//! Evidence items support create and delete but not update; the edit
//! affordance that once existed client-side was dead and has been removed
//! rather than carried forward.

use crate::context::RequestContext;
use crate::dispatch::{ApiClient, RequestOptions};
use crate::error::ApiError;
use reqwest::multipart;
use reqwest::Method;
use siteproof_types::{
    EvidenceItem, Inspection, InspectionPatch, NewEvidenceItem, NewInspection, NewOrganization,
    NewReport, NewTask, NewTaskEvidence, NewUser, Organization, OrganizationPatch, Report,
    ReportPatch, Task, TaskEvidence, TaskEvidenceType, TaskPatch, User, UserPatch,
};
use uuid::Uuid;

impl ApiClient {
    // ── Organizations ──────────────────────────────────────────

    pub async fn organizations(&self, ctx: &RequestContext) -> Result<Vec<Organization>, ApiError> {
        self.request(ctx, Method::GET, "/v1/organizations", RequestOptions::default())
            .await
    }

    pub async fn organization(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Organization, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/organizations/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_organization(
        &self,
        ctx: &RequestContext,
        data: &NewOrganization,
    ) -> Result<Organization, ApiError> {
        self.request(ctx, Method::POST, "/v1/organizations", RequestOptions::json(data)?)
            .await
    }

    pub async fn update_organization(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: &OrganizationPatch,
    ) -> Result<Organization, ApiError> {
        self.request(
            ctx,
            Method::PUT,
            &format!("/v1/organizations/{id}"),
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_organization(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/organizations/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Users ──────────────────────────────────────────────────

    pub async fn users(
        &self,
        ctx: &RequestContext,
        org_id: Option<Uuid>,
    ) -> Result<Vec<User>, ApiError> {
        let mut opts = RequestOptions::default();
        if let Some(org_id) = org_id {
            opts = opts.with_query("orgId", org_id.to_string());
        }
        self.request(ctx, Method::GET, "/v1/users", opts).await
    }

    pub async fn user(&self, ctx: &RequestContext, id: Uuid) -> Result<User, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/users/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        data: &NewUser,
    ) -> Result<User, ApiError> {
        self.request(ctx, Method::POST, "/v1/users", RequestOptions::json(data)?)
            .await
    }

    /// The sign-in/sign-up exchange: create the user record if it doesn't
    /// exist yet. Returns whether it was created (201) or already there
    /// (200), which the onboarding flow uses to decide whether the
    /// role-selection step is still pending.
    pub async fn ensure_user(
        &self,
        ctx: &RequestContext,
        data: &NewUser,
    ) -> Result<(bool, User), ApiError> {
        let (status, user) = self
            .request_with_status(ctx, Method::POST, "/v1/users", RequestOptions::json(data)?)
            .await?;
        Ok((status == 201, user))
    }

    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: &UserPatch,
    ) -> Result<User, ApiError> {
        self.request(
            ctx,
            Method::PUT,
            &format!("/v1/users/{id}"),
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/users/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Inspections ────────────────────────────────────────────

    pub async fn inspections(
        &self,
        ctx: &RequestContext,
        org_id: Option<Uuid>,
    ) -> Result<Vec<Inspection>, ApiError> {
        let mut opts = RequestOptions::default();
        if let Some(org_id) = org_id {
            opts = opts.with_query("orgId", org_id.to_string());
        }
        self.request(ctx, Method::GET, "/v1/inspections", opts).await
    }

    pub async fn inspection(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Inspection, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/inspections/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_inspection(
        &self,
        ctx: &RequestContext,
        data: &NewInspection,
    ) -> Result<Inspection, ApiError> {
        self.request(ctx, Method::POST, "/v1/inspections", RequestOptions::json(data)?)
            .await
    }

    pub async fn update_inspection(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: &InspectionPatch,
    ) -> Result<Inspection, ApiError> {
        self.request(
            ctx,
            Method::PUT,
            &format!("/v1/inspections/{id}"),
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_inspection(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/inspections/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Evidence items ─────────────────────────────────────────

    pub async fn evidence_items(
        &self,
        ctx: &RequestContext,
        inspection_id: Uuid,
    ) -> Result<Vec<EvidenceItem>, ApiError> {
        let opts = RequestOptions::default().with_query("inspectionId", inspection_id.to_string());
        self.request(ctx, Method::GET, "/v1/evidence-items", opts).await
    }

    pub async fn evidence_item(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<EvidenceItem, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/evidence-items/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_evidence_item(
        &self,
        ctx: &RequestContext,
        data: &NewEvidenceItem,
    ) -> Result<EvidenceItem, ApiError> {
        self.request(
            ctx,
            Method::POST,
            "/v1/evidence-items",
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_evidence_item(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/evidence-items/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Reports ────────────────────────────────────────────────

    pub async fn reports(
        &self,
        ctx: &RequestContext,
        inspection_id: Uuid,
    ) -> Result<Vec<Report>, ApiError> {
        let opts = RequestOptions::default().with_query("inspectionId", inspection_id.to_string());
        self.request(ctx, Method::GET, "/v1/reports", opts).await
    }

    pub async fn report(&self, ctx: &RequestContext, id: Uuid) -> Result<Report, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/reports/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_report(
        &self,
        ctx: &RequestContext,
        data: &NewReport,
    ) -> Result<Report, ApiError> {
        self.request(ctx, Method::POST, "/v1/reports", RequestOptions::json(data)?)
            .await
    }

    pub async fn update_report(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: &ReportPatch,
    ) -> Result<Report, ApiError> {
        self.request(
            ctx,
            Method::PUT,
            &format!("/v1/reports/{id}"),
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_report(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/reports/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Tasks ──────────────────────────────────────────────────

    pub async fn tasks(&self, ctx: &RequestContext, org_id: Uuid) -> Result<Vec<Task>, ApiError> {
        let opts = RequestOptions::default().with_query("orgId", org_id.to_string());
        self.request(ctx, Method::GET, "/v1/tasks", opts).await
    }

    pub async fn task(&self, ctx: &RequestContext, id: Uuid) -> Result<Task, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/tasks/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        data: &NewTask,
    ) -> Result<Task, ApiError> {
        self.request(ctx, Method::POST, "/v1/tasks", RequestOptions::json(data)?)
            .await
    }

    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: &TaskPatch,
    ) -> Result<Task, ApiError> {
        self.request(
            ctx,
            Method::PUT,
            &format!("/v1/tasks/{id}"),
            RequestOptions::json(data)?,
        )
        .await
    }

    pub async fn delete_task(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/tasks/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    // ── Task evidence ──────────────────────────────────────────

    pub async fn task_evidence(
        &self,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<Vec<TaskEvidence>, ApiError> {
        let opts = RequestOptions::default().with_query("taskId", task_id.to_string());
        self.request(ctx, Method::GET, "/v1/task-evidence", opts).await
    }

    pub async fn task_evidence_item(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<TaskEvidence, ApiError> {
        self.request(
            ctx,
            Method::GET,
            &format!("/v1/task-evidence/{id}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn create_task_evidence(
        &self,
        ctx: &RequestContext,
        data: &NewTaskEvidence,
    ) -> Result<TaskEvidence, ApiError> {
        self.request(
            ctx,
            Method::POST,
            "/v1/task-evidence",
            RequestOptions::json(data)?,
        )
        .await
    }

    /// Upload a proof image alongside the evidence record. The multipart
    /// body picks its own content type; it must not get the JSON default.
    pub async fn create_task_evidence_upload(
        &self,
        ctx: &RequestContext,
        task_id: Uuid,
        kind: TaskEvidenceType,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<TaskEvidence, ApiError> {
        let form = multipart::Form::new()
            .part("image", multipart::Part::bytes(bytes).file_name(file_name))
            .text("task_id", task_id.to_string())
            .text("type", kind.as_str());
        self.request(
            ctx,
            Method::POST,
            "/v1/task-evidence",
            RequestOptions::multipart(form),
        )
        .await
    }

    pub async fn delete_task_evidence(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<(), ApiError> {
        self.request(
            ctx,
            Method::DELETE,
            &format!("/v1/task-evidence/{id}"),
            RequestOptions::default(),
        )
        .await
    }
}
