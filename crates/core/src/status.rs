//! String-coded enums for the workflow lifecycles.
//!
//! Each variant is stored as its upper-case code in a `TEXT` column (guarded
//! by a `CHECK` constraint) and serialized with the same code over HTTP.

/// Define an enum whose variants map one-to-one to fixed string codes.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr` and `TryFrom<String>`
/// (both failing with [`CoreError::Validation`](crate::error::CoreError)),
/// plus serde support using the same codes.
macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored / wire code of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => {
                        let valid: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        Err($crate::error::CoreError::Validation(format!(
                            "Invalid {} '{other}'. Must be one of: {}",
                            $label,
                            valid.join(", ")
                        )))
                    }
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use define_str_enum;

define_str_enum! {
    /// Lifecycle of a student to mentor allocation request.
    RequestStatus("request status") {
        Pending = "PENDING",
        Accepted = "ACCEPTED",
        Rejected = "REJECTED",
        Withdrawn = "WITHDRAWN",
    }
}

impl RequestStatus {
    /// Terminal statuses never change again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

define_str_enum! {
    /// Project lifecycle status.
    ProjectStatus("project status") {
        Idea = "IDEA",
        Active = "ACTIVE",
        Completed = "COMPLETED",
        Archived = "ARCHIVED",
    }
}

define_str_enum! {
    /// Role a user holds inside a single project.
    MemberRole("member role") {
        Mentor = "MENTOR",
        Student = "STUDENT",
    }
}

define_str_enum! {
    /// Kind of presentation round.
    PresentationKind("presentation event type") {
        MidSem = "MID_SEM",
        EndSem = "END_SEM",
    }
}

define_str_enum! {
    /// Who a presentation slot is booked for.
    SlotAssignee("slot assignee type") {
        Team = "TEAM",
        Student = "STUDENT",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn request_status_codes_round_trip_through_from_str() {
        for status in RequestStatus::ALL {
            let parsed: RequestStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn unknown_code_is_a_validation_error_listing_valid_codes() {
        let err = "DONE".parse::<RequestStatus>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("Invalid request status 'DONE'"));
            assert!(msg.contains("PENDING, ACCEPTED, REJECTED, WITHDRAWN"));
        });
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("pending".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Withdrawn.is_terminal());
    }

    #[test]
    fn try_from_string_accepts_stored_codes() {
        assert_eq!(
            ProjectStatus::try_from("ACTIVE".to_string()).unwrap(),
            ProjectStatus::Active
        );
        assert_eq!(MemberRole::Student.to_string(), "STUDENT");
        assert!(MemberRole::try_from("ADMIN".to_string()).is_err());
    }
}
