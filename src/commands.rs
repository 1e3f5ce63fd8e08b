//! REPL command dispatch: navigation commands plus the current screen's
//! resource operations.
//!
//! Error presentation happens here, inline, per the screen that issued the
//! call: API failures become banners, malformed operator JSON never
//! reaches the network, and a call cancelled mid-flight is discarded
//! without a word.

use crate::render;
use crate::screen::Screen;
use crate::shell::{Navigation, Shell};
use anyhow::Context;
use serde::de::DeserializeOwned;
use siteproof_client::{ApiClient, ApiError, CancelToken, RequestContext};
use siteproof_session::{save_user, SessionMode, SessionUser, DEMO_ORG_ID};
use siteproof_types::{
    EvidenceItem, Inspection, InspectionPatch, NewEvidenceItem, NewInspection, NewOrganization,
    NewReport, NewTask, NewTaskEvidence, NewUser, Organization, OrganizationPatch, Report,
    ReportPatch, Role, Task, TaskEvidence, TaskEvidenceType, TaskPatch, User, UserPatch,
};
use std::future::Future;
use std::ops::ControlFlow;
use uuid::Uuid;

pub async fn run(
    shell: &mut Shell,
    client: &ApiClient,
    line: &str,
) -> anyhow::Result<ControlFlow<()>> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "quit" | "exit" => return Ok(ControlFlow::Break(())),
        "help" => help(shell),
        "pwd" => println!("{}", shell.path()),
        "ls" => sidebar(shell),
        "cd" => navigate(shell, rest),
        "whoami" => whoami(shell),
        "role" => role_command(shell, rest),
        "login" => login(shell, client, rest).await?,
        "choose" => choose_role(shell, client, rest).await?,
        "logout" => {
            shell.sign_out()?;
            render::notice("signed out");
        }
        "list" | "get" | "create" | "update" | "delete" | "upload" => {
            screen_op(shell, client, command, rest).await?;
        }
        other => render::error_banner(&format!("unknown command: {other} (try `help`)")),
    }
    Ok(ControlFlow::Continue(()))
}

fn help(shell: &Shell) {
    println!("navigation:  ls, cd <path>, pwd, whoami, role [value], login, logout, quit");
    if let Some(screen) = Screen::from_path(shell.path()) {
        println!("{}:  {}", screen.label(), screen.operations());
    }
}

fn sidebar(shell: &Shell) {
    let entries = shell.sidebar();
    if entries.is_empty() {
        render::notice("no navigation available; sign in first (or `cd /demo`)");
        return;
    }
    for entry in entries {
        println!("{:<14} {}", entry.label, entry.href);
    }
}

fn navigate(shell: &mut Shell, target: &str) {
    if target.is_empty() {
        render::error_banner("usage: cd <path>");
        return;
    }
    match shell.navigate(target) {
        Navigation::Moved { .. } => {}
        Navigation::Redirected { denied, landing } => {
            render::notice(&format!("{denied} is not available for your role, back to {landing}"));
        }
        Navigation::SignInRequired => {
            render::notice("not signed in; use `login <email> <org-id>` or `cd /demo`");
        }
    }
}

fn whoami(shell: &Shell) {
    match shell.mode() {
        SessionMode::Demo => {
            let role = shell.effective_role().unwrap_or(Role::Manager);
            println!("demo ({role})");
        }
        SessionMode::Live => match shell.session_user() {
            Some(user) => println!("{} ({}) org {}", user.email, user.role, user.org_id),
            None => println!("not signed in"),
        },
    }
}

fn role_command(shell: &mut Shell, value: &str) {
    if value.is_empty() {
        match shell.effective_role() {
            Some(role) => println!("{role}"),
            None => println!("no role resolved"),
        }
        return;
    }
    let Ok(role) = value.parse::<Role>() else {
        render::error_banner(&format!("unknown role: {value}"));
        return;
    };
    if !shell.mode().is_demo() {
        render::error_banner("role switching is a demo-mode affordance; live roles change via `choose`");
        return;
    }
    match shell.switch_demo_role(role) {
        Ok(Navigation::Redirected { landing, .. }) => {
            render::notice(&format!("switched to {role}; this screen is gone, back to {landing}"));
        }
        Ok(_) => render::notice(&format!("switched to {role}")),
        Err(err) => render::error_banner(&format!("could not persist role: {err}")),
    }
}

async fn login(shell: &mut Shell, client: &ApiClient, rest: &str) -> anyhow::Result<()> {
    let mut parts = rest.split_whitespace();
    let (Some(email), Some(org)) = (parts.next(), parts.next()) else {
        render::error_banner("usage: login <email> <org-id> [role]");
        return Ok(());
    };
    let org_id: Uuid = match org.parse() {
        Ok(id) => id,
        Err(_) => {
            render::error_banner("org-id must be a UUID");
            return Ok(());
        }
    };
    let role = match parts.next() {
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                render::error_banner(&format!("unknown role: {raw}"));
                return Ok(());
            }
        },
        None => Role::Manager,
    };

    let ctx = RequestContext::from_path(shell.path(), shell.store());
    if ctx.is_demo() {
        render::error_banner("sign-in is a live-mode flow; leave /demo first");
        return Ok(());
    }

    let payload = NewUser {
        org_id,
        email: email.to_string(),
        role,
        password: None,
    };
    match dispatch(client.ensure_user(&ctx, &payload)).await {
        None => {}
        Some(Err(err)) => render::error_banner(&err.to_string()),
        Some(Ok((created, user))) => {
            save_user(
                shell.store(),
                &SessionUser {
                    id: user.id,
                    org_id: user.org_id,
                    email: user.email.clone(),
                    role: user.role,
                },
            )?;
            if created {
                render::notice("account created; pick your role with `choose`");
                shell.navigate(siteproof_policy::CHOOSE_ROLE);
            } else {
                render::notice(&format!("welcome back, {}", user.email));
                shell.navigate(siteproof_policy::DASHBOARD);
            }
        }
    }
    Ok(())
}

async fn choose_role(shell: &mut Shell, client: &ApiClient, rest: &str) -> anyhow::Result<()> {
    if Screen::from_path(shell.path()) != Some(Screen::ChooseRole) {
        render::error_banner("`choose` only works on the choose-role screen");
        return Ok(());
    }
    let Ok(role) = rest.parse::<Role>() else {
        render::error_banner("usage: choose <admin|manager|inspector|cleaner>");
        return Ok(());
    };
    let Some(user) = shell.session_user() else {
        render::error_banner("not signed in");
        return Ok(());
    };

    let ctx = RequestContext::from_path(shell.path(), shell.store());
    let patch = UserPatch {
        role: Some(role),
        ..Default::default()
    };
    match dispatch(client.update_user(&ctx, user.id, &patch)).await {
        None => {}
        Some(Err(err)) => render::error_banner(&err.to_string()),
        Some(Ok(updated)) => {
            save_user(
                shell.store(),
                &SessionUser {
                    id: updated.id,
                    org_id: updated.org_id,
                    email: updated.email.clone(),
                    role: updated.role,
                },
            )?;
            render::notice(&format!("role saved: {}", updated.role));
            shell.navigate(siteproof_policy::DASHBOARD);
        }
    }
    Ok(())
}

// ── Screen operations ───────────────────────────────────────────

async fn screen_op(
    shell: &Shell,
    client: &ApiClient,
    command: &str,
    rest: &str,
) -> anyhow::Result<()> {
    let Some(screen) = Screen::from_path(shell.path()) else {
        render::error_banner("no screen here; `ls` shows where you can go");
        return Ok(());
    };
    let ctx = RequestContext::from_path(shell.path(), shell.store());

    match (screen, command) {
        (Screen::Home | Screen::ChooseRole, _) => {
            render::notice(&format!("{}: {}", screen.label(), screen.operations()));
        }

        (Screen::Organizations, "list") => {
            render_list(dispatch(client.organizations(&ctx)).await, organization_rows);
        }
        (Screen::Organizations, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.organization(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Organizations, "create") => {
            if let Some(payload) = parse_form::<NewOrganization>(rest) {
                render_entity(dispatch(client.create_organization(&ctx, &payload)).await);
            }
        }
        (Screen::Organizations, "update") => {
            with_id_and_json::<OrganizationPatch, _, _>(rest, |id, patch| async move {
                render_entity(dispatch(client.update_organization(&ctx, id, &patch)).await);
            })
            .await;
        }
        (Screen::Organizations, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_organization(&ctx, id)).await);
            })
            .await;
        }

        (Screen::Users, "list") => {
            if let Ok(org) = org_scope(shell, rest) {
                render_list(dispatch(client.users(&ctx, org)).await, user_rows);
            }
        }
        (Screen::Users, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.user(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Users, "create") => {
            if let Some(payload) = parse_form::<NewUser>(rest) {
                render_entity(dispatch(client.create_user(&ctx, &payload)).await);
            }
        }
        (Screen::Users, "update") => {
            with_id_and_json::<UserPatch, _, _>(rest, |id, patch| async move {
                render_entity(dispatch(client.update_user(&ctx, id, &patch)).await);
            })
            .await;
        }
        (Screen::Users, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_user(&ctx, id)).await);
            })
            .await;
        }

        (Screen::Inspections, "list") => {
            if let Ok(org) = org_scope(shell, rest) {
                render_list(dispatch(client.inspections(&ctx, org)).await, inspection_rows);
            }
        }
        (Screen::Inspections, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.inspection(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Inspections, "create") => {
            if let Some(payload) = parse_form::<NewInspection>(rest) {
                render_entity(dispatch(client.create_inspection(&ctx, &payload)).await);
            }
        }
        (Screen::Inspections, "update") => {
            with_id_and_json::<InspectionPatch, _, _>(rest, |id, patch| async move {
                render_entity(dispatch(client.update_inspection(&ctx, id, &patch)).await);
            })
            .await;
        }
        (Screen::Inspections, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_inspection(&ctx, id)).await);
            })
            .await;
        }

        (Screen::Evidence, "list") => {
            with_id(rest, |inspection| async move {
                render_list(
                    dispatch(client.evidence_items(&ctx, inspection)).await,
                    evidence_rows,
                );
            })
            .await;
        }
        (Screen::Evidence, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.evidence_item(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Evidence, "create") => {
            if let Some(payload) = parse_form::<NewEvidenceItem>(rest) {
                render_entity(dispatch(client.create_evidence_item(&ctx, &payload)).await);
            }
        }
        (Screen::Evidence, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_evidence_item(&ctx, id)).await);
            })
            .await;
        }

        (Screen::Reports, "list") => {
            with_id(rest, |inspection| async move {
                render_list(dispatch(client.reports(&ctx, inspection)).await, report_rows);
            })
            .await;
        }
        (Screen::Reports, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.report(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Reports, "create") => {
            if let Some(payload) = parse_form::<NewReport>(rest) {
                render_entity(dispatch(client.create_report(&ctx, &payload)).await);
            }
        }
        (Screen::Reports, "update") => {
            with_id_and_json::<ReportPatch, _, _>(rest, |id, patch| async move {
                render_entity(dispatch(client.update_report(&ctx, id, &patch)).await);
            })
            .await;
        }
        (Screen::Reports, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_report(&ctx, id)).await);
            })
            .await;
        }

        (Screen::Tasks, "list") => match org_scope(shell, rest) {
            Err(()) => {}
            Ok(None) => render::error_banner("no organization in scope; use `list <org-id>`"),
            Ok(Some(org)) => render_list(dispatch(client.tasks(&ctx, org)).await, task_rows),
        },
        (Screen::Tasks, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.task(&ctx, id)).await);
            })
            .await;
        }
        (Screen::Tasks, "create") => {
            if let Some(payload) = parse_form::<NewTask>(rest) {
                render_entity(dispatch(client.create_task(&ctx, &payload)).await);
            }
        }
        (Screen::Tasks, "update") => {
            with_id_and_json::<TaskPatch, _, _>(rest, |id, patch| async move {
                render_entity(dispatch(client.update_task(&ctx, id, &patch)).await);
            })
            .await;
        }
        (Screen::Tasks, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_task(&ctx, id)).await);
            })
            .await;
        }

        (Screen::TaskEvidence, "list") => {
            with_id(rest, |task| async move {
                render_list(
                    dispatch(client.task_evidence(&ctx, task)).await,
                    task_evidence_rows,
                );
            })
            .await;
        }
        (Screen::TaskEvidence, "get") => {
            with_id(rest, |id| async move {
                render_entity(dispatch(client.task_evidence_item(&ctx, id)).await);
            })
            .await;
        }
        (Screen::TaskEvidence, "create") => {
            if let Some(payload) = parse_form::<NewTaskEvidence>(rest) {
                render_entity(dispatch(client.create_task_evidence(&ctx, &payload)).await);
            }
        }
        (Screen::TaskEvidence, "upload") => {
            upload_task_evidence(client, &ctx, rest).await?;
        }
        (Screen::TaskEvidence, "delete") => {
            with_id(rest, |id| async move {
                render_deleted(dispatch(client.delete_task_evidence(&ctx, id)).await);
            })
            .await;
        }

        (screen, op) => {
            render::error_banner(&format!(
                "{op} is not available on {} (operations: {})",
                screen.label(),
                screen.operations()
            ));
        }
    }
    Ok(())
}

async fn upload_task_evidence(
    client: &ApiClient,
    ctx: &RequestContext,
    rest: &str,
) -> anyhow::Result<()> {
    let mut parts = rest.split_whitespace();
    let (Some(task), Some(kind), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
        render::error_banner("usage: upload <task-id> <before|after> <file>");
        return Ok(());
    };
    let Ok(task_id) = task.parse::<Uuid>() else {
        render::error_banner("task-id must be a UUID");
        return Ok(());
    };
    let kind = match kind {
        "before" => TaskEvidenceType::Before,
        "after" => TaskEvidenceType::After,
        other => {
            render::error_banner(&format!("evidence type must be before or after, not {other}"));
            return Ok(());
        }
    };
    let bytes = std::fs::read(path).with_context(|| format!("could not read {path}"))?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());

    render_entity(
        dispatch(client.create_task_evidence_upload(ctx, task_id, kind, file_name, bytes)).await,
    );
    Ok(())
}

// ── Call plumbing ───────────────────────────────────────────────

/// Run one API call under a cancel token; Ctrl-C mid-call cancels and the
/// settled result is discarded without touching the screen.
async fn dispatch<T>(fut: impl Future<Output = Result<T, ApiError>>) -> Option<Result<T, ApiError>> {
    let token = CancelToken::new();
    tokio::select! {
        result = token.guard(fut) => result,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            None
        }
    }
}

fn render_list<T>(outcome: Option<Result<Vec<T>, ApiError>>, rows: fn(&[T]) -> (Vec<&'static str>, Vec<Vec<String>>)) {
    match outcome {
        None => {}
        Some(Err(err)) => render::error_banner(&err.to_string()),
        Some(Ok(items)) => {
            let (headers, rows) = rows(&items);
            render::table(&headers, &rows);
        }
    }
}

fn render_entity<T: serde::Serialize>(outcome: Option<Result<T, ApiError>>) {
    match outcome {
        None => {}
        Some(Err(err)) => render::error_banner(&err.to_string()),
        Some(Ok(entity)) => match serde_json::to_string_pretty(&entity) {
            Ok(pretty) => println!("{pretty}"),
            Err(err) => render::error_banner(&format!("could not render response: {err}")),
        },
    }
}

fn render_deleted(outcome: Option<Result<(), ApiError>>) {
    match outcome {
        None => {}
        Some(Err(err)) => render::error_banner(&err.to_string()),
        Some(Ok(())) => render::notice("deleted"),
    }
}

/// Parse operator-typed JSON at the form boundary. Malformed input is an
/// inline validation message and never reaches the network layer.
fn parse_form<T: DeserializeOwned>(raw: &str) -> Option<T> {
    if raw.is_empty() {
        render::error_banner("expected a JSON payload");
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            render::error_banner(&format!("invalid JSON: {err}"));
            None
        }
    }
}

async fn with_id<F, Fut>(raw: &str, f: F)
where
    F: FnOnce(Uuid) -> Fut,
    Fut: Future<Output = ()>,
{
    match raw.split_whitespace().next().map(str::parse::<Uuid>) {
        Some(Ok(id)) => f(id).await,
        _ => render::error_banner("expected a UUID argument"),
    }
}

async fn with_id_and_json<T, F, Fut>(raw: &str, f: F)
where
    T: DeserializeOwned,
    F: FnOnce(Uuid, T) -> Fut,
    Fut: Future<Output = ()>,
{
    let Some((id, json)) = raw.split_once(char::is_whitespace) else {
        render::error_banner("usage: update <id> <json>");
        return;
    };
    let Ok(id) = id.parse::<Uuid>() else {
        render::error_banner("expected a UUID argument");
        return;
    };
    if let Some(patch) = parse_form::<T>(json.trim()) {
        f(id, patch).await;
    }
}

/// Resolve the organization filter: an explicit argument wins, otherwise
/// demo mode scopes to the demo organization and live mode to the signed-in
/// user's organization.
fn org_scope(shell: &Shell, rest: &str) -> Result<Option<Uuid>, ()> {
    match rest.split_whitespace().next() {
        Some(raw) => match raw.parse() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                render::error_banner("org-id must be a UUID");
                Err(())
            }
        },
        None => Ok(match shell.mode() {
            SessionMode::Demo => Some(DEMO_ORG_ID),
            SessionMode::Live => shell.session_user().map(|u| u.org_id),
        }),
    }
}

// ── Table shapes ────────────────────────────────────────────────

fn organization_rows(items: &[Organization]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "name", "created"],
        items
            .iter()
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.name.clone(),
                    o.created_at.to_rfc3339(),
                ]
            })
            .collect(),
    )
}

fn user_rows(items: &[User]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "email", "role"],
        items
            .iter()
            .map(|u| vec![u.id.to_string(), u.email.clone(), u.role.to_string()])
            .collect(),
    )
}

fn inspection_rows(items: &[Inspection]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "status", "type", "inspector"],
        items
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    format!("{:?}", i.status),
                    i.kind.clone(),
                    i.inspector_id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                ]
            })
            .collect(),
    )
}

fn evidence_rows(items: &[EvidenceItem]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "room", "description", "file"],
        items
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    render::opt(&e.room),
                    render::opt(&e.description),
                    render::opt(&e.s3_key),
                ]
            })
            .collect(),
    )
}

fn report_rows(items: &[Report]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "status", "file", "content"],
        items
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format!("{:?}", r.status),
                    render::opt(&r.s3_key),
                    render::json_cell(&r.content),
                ]
            })
            .collect(),
    )
}

fn task_rows(items: &[Task]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "status", "type", "assignee"],
        items
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    format!("{:?}", t.status),
                    format!("{:?}", t.kind),
                    t.assigned_to.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                ]
            })
            .collect(),
    )
}

fn task_evidence_rows(items: &[TaskEvidence]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    (
        vec!["id", "type", "file", "created"],
        items
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.kind.as_str().to_string(),
                    render::opt(&e.s3_key),
                    e.created_at.to_rfc3339(),
                ]
            })
            .collect(),
    )
}
