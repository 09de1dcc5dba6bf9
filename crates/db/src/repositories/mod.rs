//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (or any `PgExecutor`, when the call must join a transaction) as
//! the first argument.

pub mod activity_log_repo;
pub mod allocation_repo;
pub mod freeze_settings_repo;
pub mod internal_evaluation_repo;
pub mod mentor_profile_repo;
pub mod mentor_request_repo;
pub mod presentation_repo;
pub mod project_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use allocation_repo::{AcceptOutcome, Acceptance, AllocationRepo};
pub use freeze_settings_repo::FreezeSettingsRepo;
pub use internal_evaluation_repo::InternalEvaluationRepo;
pub use mentor_profile_repo::MentorProfileRepo;
pub use mentor_request_repo::MentorRequestRepo;
pub use presentation_repo::PresentationRepo;
pub use project_repo::{ProjectMemberRepo, ProjectRepo};
pub use user_repo::UserRepo;
