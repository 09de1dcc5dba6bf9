//! Handlers for the `/mentors` resource: the mentor directory and the
//! allocation request workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mpms_core::allocation::{
    ensure_mentor_available, ensure_pending, RequestScope, Responder,
};
use mpms_core::error::CoreError;
use mpms_core::freeze::FreezeTarget;
use mpms_core::roles::Role;
use mpms_core::status::RequestStatus;
use mpms_core::types::DbId;
use mpms_db::models::mentor_request::{CreateMentorRequest, MentorRequest};
use mpms_db::repositories::{
    AcceptOutcome, AllocationRepo, MentorProfileRepo, MentorRequestRepo, UserRepo,
};
use serde::{Deserialize, Serialize};

use super::{ensure_not_frozen, user_directory};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireAuth, RequireStudent};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One entry of the mentor directory.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub specialization: Vec<String>,
    pub capacity: i32,
    pub current_load: i32,
    pub accepting_requests: bool,
    pub remaining_slots: i32,
}

/// Request body for `POST /mentors/requests`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub mentor_id: Option<DbId>,
    pub message: Option<String>,
}

/// Request body for `PATCH /mentors/requests/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequestBody {
    pub status: Option<String>,
}

/// A request enriched with both parties' names and emails.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRequestView {
    #[serde(flatten)]
    pub request: MentorRequest,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub mentor_name: Option<String>,
    pub mentor_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mentors
pub async fn list_mentors(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MentorSummary>>> {
    let mentors = MentorProfileRepo::list_mentors(&state.pool).await?;
    let summaries = mentors
        .into_iter()
        .map(|m| {
            let counters = m.capacity();
            MentorSummary {
                id: m.id,
                name: m.name,
                email: m.email,
                department: m.department,
                specialization: m.specialization_tags.unwrap_or_default(),
                capacity: counters.capacity,
                current_load: counters.current_load,
                accepting_requests: counters.accepting_requests,
                remaining_slots: counters.remaining_slots(),
            }
        })
        .collect();
    Ok(Json(summaries))
}

/// POST /api/v1/mentors/requests
///
/// Checks run in a fixed order and the first failure wins; nothing is
/// written unless every check passes.
pub async fn create_request(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRequestBody>,
) -> AppResult<(StatusCode, Json<MentorRequest>)> {
    let mentor_id = input
        .mentor_id
        .ok_or_else(|| CoreError::Validation("mentorId is required".into()))?;

    ensure_not_frozen(&state.pool, FreezeTarget::Allocation).await?;

    UserRepo::find_by_id(&state.pool, mentor_id)
        .await?
        .filter(|u| u.role == Role::Mentor)
        .ok_or(CoreError::NotFound {
            entity: "Mentor",
            id: mentor_id,
        })?;

    let profile = MentorProfileRepo::find_by_user(&state.pool, mentor_id).await?;
    ensure_mentor_available(profile.map(|p| p.capacity()).as_ref())?;

    MentorRequestRepo::summary_for_student(&state.pool, student.user_id, mentor_id)
        .await?
        .ensure_can_request()?;

    let request = MentorRequestRepo::create(
        &state.pool,
        &CreateMentorRequest {
            student_id: student.user_id,
            mentor_id,
            message: input.message.unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        student_id = student.user_id,
        mentor_id,
        "Mentor request created",
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/mentors/requests
///
/// Mentors see requests addressed to them, students their own, admins all.
/// Faculty get an empty list.
pub async fn list_requests(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MentorRequestView>>> {
    let Some(scope) = RequestScope::for_caller(user.role, user.user_id) else {
        return Ok(Json(Vec::new()));
    };

    let requests = MentorRequestRepo::list(&state.pool, scope).await?;
    let users = user_directory(
        &state.pool,
        requests.iter().flat_map(|r| [r.student_id, r.mentor_id]),
    )
    .await?;

    let views = requests
        .into_iter()
        .map(|request| {
            let student = users.get(&request.student_id);
            let mentor = users.get(&request.mentor_id);
            MentorRequestView {
                student_name: student.map(|u| u.name.clone()),
                student_email: student.map(|u| u.email.clone()),
                mentor_name: mentor.map(|u| u.name.clone()),
                mentor_email: mentor.map(|u| u.email.clone()),
                request,
            }
        })
        .collect();
    Ok(Json(views))
}

/// PATCH /api/v1/mentors/requests/{id}
///
/// Mentors accept or reject requests addressed to them; students withdraw
/// their own. Acceptance carries the allocation side effects.
pub async fn update_request(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRequestBody>,
) -> AppResult<Json<MentorRequest>> {
    let request = MentorRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Request",
            id,
        })?;

    ensure_not_frozen(&state.pool, FreezeTarget::Allocation).await?;

    let responder = Responder::for_role(user.role)?;
    responder.ensure_party(request.parties(), user.user_id)?;
    let target = responder.parse_target(input.status.as_deref())?;
    ensure_pending(request.status)?;

    let no_longer_pending =
        || AppError::Core(CoreError::InvalidState("Request is no longer pending".into()));

    let updated = match target {
        RequestStatus::Accepted => {
            match AllocationRepo::accept(&state.pool, id, user.user_id).await? {
                AcceptOutcome::Accepted(acceptance) => {
                    tracing::info!(
                        request_id = id,
                        mentor_id = user.user_id,
                        student_id = acceptance.request.student_id,
                        project_id = acceptance.project.id,
                        rejected_siblings = acceptance.rejected_siblings,
                        "Mentor request accepted",
                    );
                    acceptance.request
                }
                AcceptOutcome::NoLongerPending => return Err(no_longer_pending()),
                AcceptOutcome::CapacityFull => return Err(CoreError::CapacityFull.into()),
            }
        }
        status => {
            let updated = MentorRequestRepo::transition_from_pending(&state.pool, id, status)
                .await?
                .ok_or_else(no_longer_pending)?;
            tracing::info!(
                request_id = id,
                user_id = user.user_id,
                %status,
                "Mentor request updated",
            );
            updated
        }
    };

    Ok(Json(updated))
}
