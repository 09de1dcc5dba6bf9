//! Transactional acceptance of a mentor request.
//!
//! Acceptance touches five tables. All writes run in one transaction so the
//! mentor's load, the sibling rejections, the project and the log entry are
//! committed together or not at all.

use mpms_core::allocation::{
    accepted_project_description, accepted_project_title, ACTION_MENTOR_ACCEPTED,
};
use mpms_core::status::{MemberRole, ProjectStatus};
use mpms_core::types::DbId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::activity_log::CreateActivityLog;
use crate::models::mentor_request::MentorRequest;
use crate::models::project::{CreateProject, Project};
use crate::repositories::mentor_request_repo::COLUMNS as REQUEST_COLUMNS;
use crate::repositories::{ActivityLogRepo, ProjectMemberRepo, ProjectRepo};

/// Everything produced by a successful acceptance.
#[derive(Debug)]
pub struct Acceptance {
    pub request: MentorRequest,
    pub project: Project,
    /// Other pending requests of the student that were auto-rejected.
    pub rejected_siblings: u64,
}

/// Result of an acceptance attempt.
#[derive(Debug)]
pub enum AcceptOutcome {
    Accepted(Box<Acceptance>),
    /// Another writer moved the request out of PENDING first.
    NoLongerPending,
    /// The mentor's load reached capacity (or the profile is missing).
    CapacityFull,
}

pub struct AllocationRepo;

impl AllocationRepo {
    /// Accept request `request_id` on behalf of `mentor_id`.
    ///
    /// In one transaction:
    /// 1. PENDING -> ACCEPTED, conditional on the current status;
    /// 2. `current_load + 1`, conditional on `current_load < capacity`;
    /// 3. the student's other PENDING requests -> REJECTED;
    /// 4. an ACTIVE project with both parties as members;
    /// 5. a `MENTOR_ACCEPTED` activity log entry.
    ///
    /// A failed condition in step 1 or 2 rolls everything back.
    ///
    /// Before any write, the student's PENDING rows (and the target row) are
    /// locked in id order, so concurrent accepts for the same student queue
    /// behind each other instead of deadlocking on the sibling rejection.
    pub async fn accept(
        pool: &PgPool,
        request_id: DbId,
        mentor_id: DbId,
    ) -> Result<AcceptOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "SELECT id FROM mentor_requests
             WHERE student_id = (SELECT student_id FROM mentor_requests WHERE id = $1)
               AND (status = 'PENDING' OR id = $1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(request_id)
        .fetch_all(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE mentor_requests SET status = 'ACCEPTED'
             WHERE id = $1 AND mentor_id = $2 AND status = 'PENDING'
             RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, MentorRequest>(&query)
            .bind(request_id)
            .bind(mentor_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(request) = request else {
            tx.rollback().await?;
            tracing::debug!(request_id, mentor_id, "Acceptance skipped: request not pending");
            return Ok(AcceptOutcome::NoLongerPending);
        };

        let bumped = sqlx::query(
            "UPDATE mentor_profiles SET current_load = current_load + 1
             WHERE user_id = $1 AND current_load < capacity",
        )
        .bind(mentor_id)
        .execute(&mut *tx)
        .await?;
        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            tracing::debug!(request_id, mentor_id, "Acceptance rolled back: mentor at capacity");
            return Ok(AcceptOutcome::CapacityFull);
        }

        let rejected = sqlx::query(
            "UPDATE mentor_requests SET status = 'REJECTED'
             WHERE student_id = $1 AND status = 'PENDING' AND id <> $2",
        )
        .bind(request.student_id)
        .bind(request.id)
        .execute(&mut *tx)
        .await?;

        let student_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
                .bind(request.student_id)
                .fetch_optional(&mut *tx)
                .await?;

        let project = ProjectRepo::create(
            &mut *tx,
            &CreateProject {
                title: accepted_project_title(student_name.as_deref()),
                description: accepted_project_description(&request.message),
                mentor_id: Some(mentor_id),
                tech_stack: Vec::new(),
                status: ProjectStatus::Active,
            },
        )
        .await?;

        ProjectMemberRepo::add(&mut *tx, project.id, mentor_id, MemberRole::Mentor).await?;
        ProjectMemberRepo::add(&mut *tx, project.id, request.student_id, MemberRole::Student)
            .await?;

        ActivityLogRepo::create(
            &mut *tx,
            &CreateActivityLog {
                project_id: project.id,
                actor_id: mentor_id,
                action_type: ACTION_MENTOR_ACCEPTED,
                metadata: json!({ "studentId": request.student_id }),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(AcceptOutcome::Accepted(Box::new(Acceptance {
            request,
            project,
            rejected_siblings: rejected.rows_affected(),
        })))
    }
}
