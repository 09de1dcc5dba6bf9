//! Handlers for internal evaluations: marks a mentor gives each student of
//! a project they supervise.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mpms_core::error::CoreError;
use mpms_core::evaluation::{
    default_internal_criteria, ensure_unlocked, validate_score_sheet, validate_total_score,
    ScoreSheet, ACTION_INTERNAL_EVALUATION,
};
use mpms_core::freeze::FreezeTarget;
use mpms_core::roles::Role;
use mpms_core::status::MemberRole;
use mpms_core::types::DbId;
use mpms_db::models::activity_log::CreateActivityLog;
use mpms_db::models::internal_evaluation::{
    CreateInternalEvaluation, InternalEvaluation, UpdateInternalEvaluation,
};
use mpms_db::repositories::{
    ActivityLogRepo, InternalEvaluationRepo, ProjectMemberRepo, ProjectRepo,
};
use mpms_db::DbPool;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ensure_not_frozen, user_directory};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireMentorOrAdmin};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/{id}/internal-evaluations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInternalEvaluation {
    pub student_id: Option<DbId>,
    pub criteria: Option<ScoreSheet>,
    pub total_score: Option<f64>,
    pub remarks: Option<String>,
}

/// Request body for `PATCH /internal-evaluations/{id}/lock`.
#[derive(Debug, Deserialize)]
pub struct LockRequest {
    /// Defaults to `true`.
    pub locked: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalEvaluationView {
    #[serde(flatten)]
    pub evaluation: InternalEvaluation,
    pub student_name: Option<String>,
    pub mentor_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the project and the caller's membership in it.
///
/// Admins may act on any project; everyone else must be a member.
async fn authorize_project_access(
    pool: &DbPool,
    project_id: DbId,
    user: &AuthUser,
) -> AppResult<Option<MemberRole>> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    let membership = ProjectMemberRepo::find(pool, project_id, user.user_id).await?;
    match membership {
        Some(member) => Ok(Some(member.member_role)),
        None if user.role == Role::Admin => Ok(None),
        None => Err(CoreError::Forbidden("Not a member of this project".into()).into()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/internal-evaluations
///
/// Creates the caller's evaluation of a student (201) or resubmits it
/// (200). Locked evaluations cannot be resubmitted.
pub async fn submit_internal(
    RequireMentorOrAdmin(user): RequireMentorOrAdmin,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<SubmitInternalEvaluation>,
) -> AppResult<(StatusCode, Json<InternalEvaluation>)> {
    authorize_project_access(&state.pool, project_id, &user).await?;
    ensure_not_frozen(&state.pool, FreezeTarget::InternalMarks).await?;

    let student_id = input
        .student_id
        .ok_or_else(|| CoreError::Validation("studentId is required".into()))?;
    let total_score = validate_total_score(input.total_score)?;
    if let Some(criteria) = &input.criteria {
        validate_score_sheet(criteria, "criterion")?;
    }

    let is_student_member = ProjectMemberRepo::find(&state.pool, project_id, student_id)
        .await?
        .is_some_and(|m| m.member_role == MemberRole::Student);
    if !is_student_member {
        return Err(
            CoreError::Validation("Student is not a member of this project".into()).into(),
        );
    }

    let existing =
        InternalEvaluationRepo::find_by_triple(&state.pool, project_id, student_id, user.user_id)
            .await?;

    if let Some(existing) = existing {
        ensure_unlocked(existing.locked)?;
        let updated = InternalEvaluationRepo::update_unlocked(
            &state.pool,
            existing.id,
            &UpdateInternalEvaluation {
                criteria: input.criteria,
                total_score,
                remarks: input.remarks,
            },
        )
        .await?
        // Locked between the read and the write.
        .ok_or_else(|| AppError::Core(CoreError::InvalidState("Evaluation is locked".into())))?;

        tracing::info!(
            evaluation_id = updated.id,
            project_id,
            student_id,
            "Internal evaluation updated",
        );
        return Ok((StatusCode::OK, Json(updated)));
    }

    let created = InternalEvaluationRepo::create(
        &state.pool,
        &CreateInternalEvaluation {
            project_id,
            student_id,
            mentor_id: user.user_id,
            criteria: input.criteria.unwrap_or_else(default_internal_criteria),
            total_score,
            remarks: input.remarks.unwrap_or_default(),
        },
    )
    .await?;

    ActivityLogRepo::create(
        &state.pool,
        &CreateActivityLog {
            project_id,
            actor_id: user.user_id,
            action_type: ACTION_INTERNAL_EVALUATION,
            metadata: json!({ "studentId": student_id, "totalScore": total_score }),
        },
    )
    .await?;

    tracing::info!(
        evaluation_id = created.id,
        project_id,
        student_id,
        "Internal evaluation created",
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/projects/{id}/internal-evaluations
///
/// Students only see evaluations about themselves.
pub async fn list_internal(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<InternalEvaluationView>>> {
    let membership = authorize_project_access(&state.pool, project_id, &user).await?;
    let only_student = (membership == Some(MemberRole::Student)).then_some(user.user_id);

    let evaluations =
        InternalEvaluationRepo::list_for_project(&state.pool, project_id, only_student).await?;
    let users = user_directory(
        &state.pool,
        evaluations.iter().flat_map(|e| [e.student_id, e.mentor_id]),
    )
    .await?;

    let views = evaluations
        .into_iter()
        .map(|evaluation| InternalEvaluationView {
            student_name: users.get(&evaluation.student_id).map(|u| u.name.clone()),
            mentor_name: users.get(&evaluation.mentor_id).map(|u| u.name.clone()),
            evaluation,
        })
        .collect();
    Ok(Json(views))
}

/// PATCH /api/v1/internal-evaluations/{id}/lock
pub async fn lock_internal(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<LockRequest>,
) -> AppResult<Json<InternalEvaluation>> {
    let locked = input.locked.unwrap_or(true);
    let evaluation = InternalEvaluationRepo::set_locked(&state.pool, id, locked)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Evaluation",
            id,
        })?;

    tracing::info!(
        evaluation_id = id,
        admin_id = admin.user_id,
        locked,
        "Internal evaluation lock changed",
    );
    Ok(Json(evaluation))
}
