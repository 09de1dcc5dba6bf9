//! Account roles.
//!
//! The role set is fixed; only an admin may change a user's role.

use crate::status::define_str_enum;

define_str_enum! {
    /// Institution-wide role of a user account.
    Role("role") {
        Student = "STUDENT",
        Mentor = "MENTOR",
        PblFaculty = "PBL_FACULTY",
        Admin = "ADMIN",
    }
}

impl Role {
    /// Role assigned to self-registered accounts.
    pub const DEFAULT: Role = Role::Student;
}
