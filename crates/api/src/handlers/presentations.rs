//! Handlers for presentation slot evaluations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mpms_core::error::CoreError;
use mpms_core::evaluation::{validate_score_sheet, validate_total_score, Attendance, ScoreSheet};
use mpms_core::freeze::FreezeTarget;
use mpms_core::types::DbId;
use mpms_db::models::presentation::{CreatePresentationEvaluation, PresentationEvaluation};
use mpms_db::repositories::PresentationRepo;
use serde::{Deserialize, Serialize};

use super::{ensure_not_frozen, user_directory};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireAuth, RequireFacultyOrAdmin};
use crate::state::AppState;

/// Request body for `POST /presentations/slots/{id}/evaluation`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPresentationEvaluation {
    /// `PRESENT` (default) or `ABSENT`.
    pub attendance: Option<String>,
    pub rubric: Option<ScoreSheet>,
    pub total_score: Option<f64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationEvaluationView {
    #[serde(flatten)]
    pub evaluation: PresentationEvaluation,
    pub evaluator_name: Option<String>,
}

async fn require_slot(state: &AppState, slot_id: DbId) -> AppResult<()> {
    PresentationRepo::find_slot(&state.pool, slot_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Slot",
            id: slot_id,
        })?;
    Ok(())
}

/// POST /api/v1/presentations/slots/{id}/evaluation
pub async fn submit_evaluation(
    RequireFacultyOrAdmin(user): RequireFacultyOrAdmin,
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
    AppJson(input): AppJson<SubmitPresentationEvaluation>,
) -> AppResult<(StatusCode, Json<PresentationEvaluation>)> {
    require_slot(&state, slot_id).await?;
    ensure_not_frozen(&state.pool, FreezeTarget::Presentations).await?;

    let total_score = validate_total_score(input.total_score)?;
    let rubric = input.rubric.unwrap_or_default();
    validate_score_sheet(&rubric, "rubric item")?;
    let attendance = match input.attendance.as_deref() {
        Some(raw) => raw.parse::<Attendance>()?,
        None => Attendance::default(),
    };

    let evaluation = PresentationRepo::create_evaluation(
        &state.pool,
        &CreatePresentationEvaluation {
            slot_id,
            evaluator_id: user.user_id,
            attendance,
            rubric,
            total_score,
            feedback: input.feedback.unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(
        evaluation_id = evaluation.id,
        slot_id,
        evaluator_id = user.user_id,
        "Presentation evaluation recorded",
    );
    Ok((StatusCode::CREATED, Json(evaluation)))
}

/// GET /api/v1/presentations/slots/{id}/evaluations
pub async fn list_slot_evaluations(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
) -> AppResult<Json<Vec<PresentationEvaluationView>>> {
    require_slot(&state, slot_id).await?;

    let evaluations = PresentationRepo::list_evaluations_for_slot(&state.pool, slot_id).await?;
    let users = user_directory(&state.pool, evaluations.iter().map(|e| e.evaluator_id)).await?;

    let views = evaluations
        .into_iter()
        .map(|evaluation| PresentationEvaluationView {
            evaluator_name: users.get(&evaluation.evaluator_id).map(|u| u.name.clone()),
            evaluation,
        })
        .collect();
    Ok(Json(views))
}
