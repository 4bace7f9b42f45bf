//! Offer model and offer status state machine
//!
//! An offer is a bid by a non-owner user to perform a cleaning job. It is
//! keyed by (cleaning, user) and moves through a small state machine:
//! `pending` on creation, then `accepted` or `rejected` when the owner picks
//! a winner, and finally `completed` when the owner evaluates the winner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Workflow state of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl OfferStatus {
    /// Database text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Completed => "completed",
        }
    }

    /// Whether no further transition exists out of this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OfferStatus::Rejected | OfferStatus::Completed)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// A pending offer is either accepted or rejected when the owner picks a
    /// winner; an accepted offer is completed by an evaluation, or rejected
    /// if it loses an acceptance race it had not yet won.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (OfferStatus::Pending, OfferStatus::Accepted)
                | (OfferStatus::Pending, OfferStatus::Rejected)
                | (OfferStatus::Accepted, OfferStatus::Rejected)
                | (OfferStatus::Accepted, OfferStatus::Completed)
        )
    }
}

impl Default for OfferStatus {
    fn default() -> Self {
        OfferStatus::Pending
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OfferStatus::Pending),
            "accepted" => Ok(OfferStatus::Accepted),
            "rejected" => Ok(OfferStatus::Rejected),
            "completed" => Ok(OfferStatus::Completed),
            other => Err(format!("unknown offer status: {other}")),
        }
    }
}

/// Offer entity, keyed by (cleaning, user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub cleaning_id: Uuid,
    pub user_id: Uuid,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_db_text() {
        for status in [
            OfferStatus::Pending,
            OfferStatus::Accepted,
            OfferStatus::Rejected,
            OfferStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<OfferStatus>(), Ok(status));
        }
    }

    #[test]
    fn pending_offers_can_be_accepted_or_rejected() {
        assert!(OfferStatus::Pending.can_transition_to(OfferStatus::Accepted));
        assert!(OfferStatus::Pending.can_transition_to(OfferStatus::Rejected));
        assert!(!OfferStatus::Pending.can_transition_to(OfferStatus::Completed));
    }

    #[test]
    fn accepted_offers_complete_or_lose_a_race() {
        assert!(OfferStatus::Accepted.can_transition_to(OfferStatus::Completed));
        assert!(OfferStatus::Accepted.can_transition_to(OfferStatus::Rejected));
        assert!(!OfferStatus::Accepted.can_transition_to(OfferStatus::Pending));
    }

    #[test]
    fn rejected_and_completed_are_terminal() {
        for terminal in [OfferStatus::Rejected, OfferStatus::Completed] {
            assert!(terminal.is_terminal());
            for next in [
                OfferStatus::Pending,
                OfferStatus::Accepted,
                OfferStatus::Rejected,
                OfferStatus::Completed,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }
}
