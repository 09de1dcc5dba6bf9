//! Freeze gate: three independent admin-controlled switches.
//!
//! Gated operations must read the current flags on every call; the flags are
//! never cached between requests.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::define_str_enum;

define_str_enum! {
    /// Category of mutating operations a freeze flag blocks.
    FreezeTarget("freeze target") {
        Allocation = "allocation",
        InternalMarks = "internalMarks",
        Presentations = "presentations",
    }
}

impl FreezeTarget {
    /// Message returned to callers hitting an active freeze.
    pub fn frozen_message(self) -> &'static str {
        match self {
            FreezeTarget::Allocation => "Mentor allocation is currently frozen",
            FreezeTarget::InternalMarks => "Internal marks entry is currently frozen",
            FreezeTarget::Presentations => "Presentation marks are frozen",
        }
    }
}

/// Snapshot of the three freeze switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeFlags {
    pub allocation: bool,
    pub internal_marks: bool,
    pub presentations: bool,
}

impl FreezeFlags {
    pub fn is_frozen(&self, target: FreezeTarget) -> bool {
        match target {
            FreezeTarget::Allocation => self.allocation,
            FreezeTarget::InternalMarks => self.internal_marks,
            FreezeTarget::Presentations => self.presentations,
        }
    }

    /// Fail with [`CoreError::Frozen`] when `target` is frozen.
    pub fn ensure_open(&self, target: FreezeTarget) -> Result<(), CoreError> {
        if self.is_frozen(target) {
            return Err(CoreError::Frozen(target));
        }
        Ok(())
    }

    /// Return a copy with `patch` applied; absent fields keep their value.
    pub fn patched(self, patch: &FreezePatch) -> Self {
        Self {
            allocation: patch.allocation.unwrap_or(self.allocation),
            internal_marks: patch.internal_marks.unwrap_or(self.internal_marks),
            presentations: patch.presentations.unwrap_or(self.presentations),
        }
    }
}

/// Partial update of the freeze flags (`PATCH /admin/freeze`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezePatch {
    pub allocation: Option<bool>,
    pub internal_marks: Option<bool>,
    pub presentations: Option<bool>,
}

impl FreezePatch {
    /// A patch touching exactly one flag.
    pub fn single(target: FreezeTarget, frozen: bool) -> Self {
        let mut patch = Self::default();
        match target {
            FreezeTarget::Allocation => patch.allocation = Some(frozen),
            FreezeTarget::InternalMarks => patch.internal_marks = Some(frozen),
            FreezeTarget::Presentations => patch.presentations = Some(frozen),
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_flags_leave_everything_open() {
        let flags = FreezeFlags::default();
        for target in FreezeTarget::ALL {
            assert!(flags.ensure_open(*target).is_ok());
        }
    }

    #[test]
    fn flags_are_independent() {
        let patch = FreezePatch::single(FreezeTarget::InternalMarks, true);
        let flags = FreezeFlags::default().patched(&patch);
        assert!(flags.ensure_open(FreezeTarget::Allocation).is_ok());
        assert!(flags.ensure_open(FreezeTarget::Presentations).is_ok());
        assert_matches!(
            flags.ensure_open(FreezeTarget::InternalMarks),
            Err(CoreError::Frozen(FreezeTarget::InternalMarks))
        );
    }

    #[test]
    fn patch_leaves_absent_fields_untouched() {
        let start = FreezeFlags {
            allocation: true,
            internal_marks: false,
            presentations: true,
        };
        let patch = FreezePatch {
            internal_marks: Some(true),
            ..Default::default()
        };
        let next = start.patched(&patch);
        assert!(next.allocation);
        assert!(next.internal_marks);
        assert!(next.presentations);
    }

    #[test]
    fn double_toggle_restores_original_flags() {
        let start = FreezeFlags::default();
        let frozen = start.patched(&FreezePatch::single(FreezeTarget::Allocation, true));
        assert!(frozen.is_frozen(FreezeTarget::Allocation));
        let thawed = frozen.patched(&FreezePatch::single(FreezeTarget::Allocation, false));
        assert_eq!(thawed, start);
    }

    #[test]
    fn target_codes_match_json_field_names() {
        assert_eq!(
            "internalMarks".parse::<FreezeTarget>().unwrap(),
            FreezeTarget::InternalMarks
        );
        assert!("internal_marks".parse::<FreezeTarget>().is_err());
    }

    #[test]
    fn frozen_error_message_names_the_category() {
        let err = CoreError::Frozen(FreezeTarget::Allocation);
        assert_eq!(err.to_string(), "Mentor allocation is currently frozen");
    }
}
