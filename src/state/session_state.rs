// ============================================================================
// SESSION STATE - Observable "who is logged in"
// ============================================================================

use crate::models::StudentRecord;
use crate::state::reactivity::ReactiveState;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub student: Option<StudentRecord>,
    pub is_authenticated: bool,
    /// True only while the startup rehydration runs
    pub loading: bool,
}

impl Session {
    /// State at application start, before rehydration
    pub fn initial() -> Self {
        Self {
            student: None,
            is_authenticated: false,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            student: None,
            is_authenticated: false,
            loading: false,
        }
    }

    pub fn signed_in(student: StudentRecord) -> Self {
        Self {
            student: Some(student),
            is_authenticated: true,
            loading: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Shared handle to the session, cloned into every view that needs it
pub type SessionState = ReactiveState<Session>;
