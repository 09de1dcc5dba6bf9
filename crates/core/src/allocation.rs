//! Mentor allocation rules.
//!
//! Preconditions for creating a request, the request state machine, and the
//! role dispatch deciding who may move a request to which status. The
//! database-backed handlers gather the inputs and call into these functions
//! in the documented order.

use crate::error::CoreError;
use crate::roles::Role;
use crate::status::RequestStatus;
use crate::types::DbId;

/// Maximum number of simultaneously pending requests per student.
pub const MAX_PENDING_REQUESTS: i64 = 3;

/// Activity log action recorded when a mentor accepts a student.
pub const ACTION_MENTOR_ACCEPTED: &str = "MENTOR_ACCEPTED";

/// Project title fallback when the student's name cannot be resolved.
const FALLBACK_STUDENT_NAME: &str = "Student";

/// Project description used when the accepted request carried no message.
const DEFAULT_PROJECT_DESCRIPTION: &str = "To be defined";

// ---------------------------------------------------------------------------
// Mentor availability
// ---------------------------------------------------------------------------

/// Capacity counters of a mentor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentorCapacity {
    pub capacity: i32,
    pub current_load: i32,
    pub accepting_requests: bool,
}

impl MentorCapacity {
    /// Free slots, never negative even if the load overshot the capacity.
    pub fn remaining_slots(&self) -> i32 {
        (self.capacity - self.current_load).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.current_load >= self.capacity
    }
}

/// Check that a mentor can receive a new request.
///
/// A missing profile counts as not accepting.
pub fn ensure_mentor_available(profile: Option<&MentorCapacity>) -> Result<(), CoreError> {
    let profile = match profile {
        Some(p) if p.accepting_requests => p,
        _ => return Err(CoreError::NotAccepting),
    };
    if profile.is_full() {
        return Err(CoreError::CapacityFull);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Student eligibility
// ---------------------------------------------------------------------------

/// What the store knows about a student's existing requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentRequestSummary {
    pub has_accepted: bool,
    pub pending_count: i64,
    pub has_pending_to_mentor: bool,
}

impl StudentRequestSummary {
    /// Check, in order: not already allocated, below the pending limit, no
    /// duplicate pending request to the same mentor.
    pub fn ensure_can_request(&self) -> Result<(), CoreError> {
        if self.has_accepted {
            return Err(CoreError::AlreadyAllocated);
        }
        if self.pending_count >= MAX_PENDING_REQUESTS {
            return Err(CoreError::MaxPending {
                limit: MAX_PENDING_REQUESTS,
            });
        }
        if self.has_pending_to_mentor {
            return Err(CoreError::Duplicate(
                "You already have a pending request to this mentor".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The two parties of a request.
#[derive(Debug, Clone, Copy)]
pub struct RequestParties {
    pub student_id: DbId,
    pub mentor_id: DbId,
}

/// Which side of a request the caller acts for, decided by their role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responder {
    /// May accept or reject requests addressed to them.
    Mentor,
    /// May withdraw their own requests.
    Student,
}

impl Responder {
    /// Dispatch on the caller's role. Faculty and admins cannot act on requests.
    pub fn for_role(role: Role) -> Result<Self, CoreError> {
        match role {
            Role::Mentor => Ok(Responder::Mentor),
            Role::Student => Ok(Responder::Student),
            Role::PblFaculty | Role::Admin => Err(CoreError::Forbidden(
                "Only mentors and students can update requests".into(),
            )),
        }
    }

    /// Check that `caller_id` is this side's party on the request.
    pub fn ensure_party(self, parties: RequestParties, caller_id: DbId) -> Result<(), CoreError> {
        let owner = match self {
            Responder::Mentor => parties.mentor_id,
            Responder::Student => parties.student_id,
        };
        if owner != caller_id {
            return Err(CoreError::Forbidden("Not your request".into()));
        }
        Ok(())
    }

    /// Statuses this side may move a pending request to.
    pub fn allowed_targets(self) -> &'static [RequestStatus] {
        match self {
            Responder::Mentor => &[RequestStatus::Accepted, RequestStatus::Rejected],
            Responder::Student => &[RequestStatus::Withdrawn],
        }
    }

    /// Parse and check the requested target status.
    pub fn parse_target(self, raw: Option<&str>) -> Result<RequestStatus, CoreError> {
        let invalid = || {
            CoreError::Validation(match self {
                Responder::Mentor => "Status must be ACCEPTED or REJECTED".into(),
                Responder::Student => "Students can only WITHDRAW".into(),
            })
        };
        let target: RequestStatus = raw.ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if !self.allowed_targets().contains(&target) {
            return Err(invalid());
        }
        Ok(target)
    }
}

/// Only pending requests can change status.
pub fn ensure_pending(current: RequestStatus) -> Result<(), CoreError> {
    if current.is_terminal() {
        return Err(CoreError::InvalidState(
            "Request is no longer pending".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing scope
// ---------------------------------------------------------------------------

/// Which requests a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    /// Requests addressed to this mentor.
    Mentor(DbId),
    /// Requests sent by this student.
    Student(DbId),
    /// Every request.
    All,
}

impl RequestScope {
    /// `None` means the caller sees nothing.
    pub fn for_caller(role: Role, user_id: DbId) -> Option<Self> {
        match role {
            Role::Mentor => Some(RequestScope::Mentor(user_id)),
            Role::Student => Some(RequestScope::Student(user_id)),
            Role::Admin => Some(RequestScope::All),
            Role::PblFaculty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Acceptance side effects
// ---------------------------------------------------------------------------

/// Title of the project materialized when a request is accepted.
pub fn accepted_project_title(student_name: Option<&str>) -> String {
    let name = student_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_STUDENT_NAME);
    format!("Project - {name}")
}

/// Description of the materialized project: the request message, if any.
pub fn accepted_project_description(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        DEFAULT_PROJECT_DESCRIPTION.to_string()
    } else {
        message.to_string()
    }
}
