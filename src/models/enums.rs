//! Shared domain enums: borrow lifecycle states and audit action types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// BorrowStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a borrow request.
///
/// `Pending` is the sole initial state. `Rejected`, `Returned` and
/// `Cancelled` are terminal; `Approved` only moves to `Returned`. Every
/// status write in the system goes through [`BorrowStatus::can_transition_to`]
/// so illegal transitions are rejected in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum BorrowStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
    Returned = 3,
    Cancelled = 4,
}

impl BorrowStatus {
    /// The closed transition table of the borrow lifecycle.
    pub fn can_transition_to(self, to: BorrowStatus) -> bool {
        matches!(
            (self, to),
            (BorrowStatus::Pending, BorrowStatus::Approved)
                | (BorrowStatus::Pending, BorrowStatus::Rejected)
                | (BorrowStatus::Pending, BorrowStatus::Cancelled)
                | (BorrowStatus::Approved, BorrowStatus::Returned)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BorrowStatus::Rejected | BorrowStatus::Returned | BorrowStatus::Cancelled
        )
    }
}

impl TryFrom<i16> for BorrowStatus {
    type Error = AppError;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(BorrowStatus::Pending),
            1 => Ok(BorrowStatus::Approved),
            2 => Ok(BorrowStatus::Rejected),
            3 => Ok(BorrowStatus::Returned),
            4 => Ok(BorrowStatus::Cancelled),
            other => Err(AppError::Internal(format!(
                "Unknown borrow status code {} in database",
                other
            ))),
        }
    }
}

impl From<BorrowStatus> for i16 {
    fn from(s: BorrowStatus) -> Self {
        s as i16
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(BorrowStatus::Pending),
            "approved" => Ok(BorrowStatus::Approved),
            "rejected" => Ok(BorrowStatus::Rejected),
            "returned" => Ok(BorrowStatus::Returned),
            "cancelled" => Ok(BorrowStatus::Cancelled),
            other => Err(AppError::Validation(format!(
                "Unknown borrow status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowStatus::Pending => "pending",
            BorrowStatus::Approved => "approved",
            BorrowStatus::Rejected => "rejected",
            BorrowStatus::Returned => "returned",
            BorrowStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Audit action recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum ActionType {
    Approved = 1,
    Rejected = 2,
    Returned = 3,
    Cancelled = 4,
    AccessDenied = 5,
}

impl ActionType {
    /// The audit action produced by a successful transition into `status`.
    /// Only terminal-ward transitions produce audit entries; `Pending` is
    /// never a transition target.
    pub fn for_transition(status: BorrowStatus) -> Option<ActionType> {
        match status {
            BorrowStatus::Approved => Some(ActionType::Approved),
            BorrowStatus::Rejected => Some(ActionType::Rejected),
            BorrowStatus::Returned => Some(ActionType::Returned),
            BorrowStatus::Cancelled => Some(ActionType::Cancelled),
            BorrowStatus::Pending => None,
        }
    }
}

impl TryFrom<i16> for ActionType {
    type Error = AppError;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(ActionType::Approved),
            2 => Ok(ActionType::Rejected),
            3 => Ok(ActionType::Returned),
            4 => Ok(ActionType::Cancelled),
            5 => Ok(ActionType::AccessDenied),
            other => Err(AppError::Internal(format!(
                "Unknown action type code {} in database",
                other
            ))),
        }
    }
}

impl From<ActionType> for i16 {
    fn from(a: ActionType) -> Self {
        a as i16
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionType::Approved => "approved",
            ActionType::Rejected => "rejected",
            ActionType::Returned => "returned",
            ActionType::Cancelled => "cancelled",
            ActionType::AccessDenied => "access_denied",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BorrowStatus; 5] = [
        BorrowStatus::Pending,
        BorrowStatus::Approved,
        BorrowStatus::Rejected,
        BorrowStatus::Returned,
        BorrowStatus::Cancelled,
    ];

    #[test]
    fn pending_transitions() {
        assert!(BorrowStatus::Pending.can_transition_to(BorrowStatus::Approved));
        assert!(BorrowStatus::Pending.can_transition_to(BorrowStatus::Rejected));
        assert!(BorrowStatus::Pending.can_transition_to(BorrowStatus::Cancelled));
        assert!(!BorrowStatus::Pending.can_transition_to(BorrowStatus::Returned));
        assert!(!BorrowStatus::Pending.can_transition_to(BorrowStatus::Pending));
    }

    #[test]
    fn approved_only_moves_to_returned() {
        for to in ALL {
            assert_eq!(
                BorrowStatus::Approved.can_transition_to(to),
                to == BorrowStatus::Returned
            );
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [BorrowStatus::Rejected, BorrowStatus::Returned, BorrowStatus::Cancelled] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(!from.can_transition_to(to), "{} -> {} must be illegal", from, to);
            }
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        for s in ALL {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn status_roundtrips_through_i16() {
        for s in ALL {
            let code: i16 = s.into();
            assert_eq!(BorrowStatus::try_from(code).unwrap(), s);
        }
        assert!(BorrowStatus::try_from(42).is_err());
    }

    #[test]
    fn status_parses_case_insensitive() {
        assert_eq!("Approved".parse::<BorrowStatus>().unwrap(), BorrowStatus::Approved);
        assert_eq!("cancelled".parse::<BorrowStatus>().unwrap(), BorrowStatus::Cancelled);
        assert!("deleted".parse::<BorrowStatus>().is_err());
    }

    #[test]
    fn every_transition_target_has_an_action() {
        for to in ALL.into_iter().filter(|s| *s != BorrowStatus::Pending) {
            assert!(ActionType::for_transition(to).is_some());
        }
        assert!(ActionType::for_transition(BorrowStatus::Pending).is_none());
    }
}
