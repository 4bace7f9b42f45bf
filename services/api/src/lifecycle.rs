//! Acceptance planning for the offer lifecycle
//!
//! Accepting an offer is a single atomic unit: the target moves to
//! `accepted` and every competing offer that could still win moves to
//! `rejected`. `plan_acceptance` is the pure decision step; the offers
//! repository runs it inside a transaction over row-locked offers, so a
//! racing acceptance re-validates against committed state and loses with a
//! Conflict instead of overwriting the winner.

use uuid::Uuid;

use crate::guards::GuardError;
use crate::models::{Offer, OfferStatus};

/// The transitions a successful acceptance will apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptancePlan {
    /// User whose offer becomes `accepted`
    pub accept_user: Uuid,
    /// Users whose pending offers become `rejected`
    pub reject_users: Vec<Uuid>,
}

/// Validate an acceptance against the full set of offers for one cleaning
/// job and compute the transitions to apply.
///
/// Fails with Conflict when the job already has an accepted offer, when the
/// target offer is missing, or when the target is not `pending`. On success
/// the plan rejects every other pending offer; rejected offers stay rejected
/// and completed offers are never touched.
pub fn plan_acceptance(offers: &[Offer], target_user: Uuid) -> Result<AcceptancePlan, GuardError> {
    if offers
        .iter()
        .any(|offer| offer.status == OfferStatus::Accepted)
    {
        return Err(GuardError::Conflict(
            "An offer has already been accepted for this cleaning job",
        ));
    }

    let target = offers
        .iter()
        .find(|offer| offer.user_id == target_user)
        .ok_or(GuardError::Conflict(
            "No offer from this user for this cleaning job",
        ))?;

    if target.status != OfferStatus::Pending {
        return Err(GuardError::Conflict("Only pending offers can be accepted"));
    }

    let reject_users = offers
        .iter()
        .filter(|offer| offer.user_id != target_user && offer.status == OfferStatus::Pending)
        .map(|offer| offer.user_id)
        .collect();

    Ok(AcceptancePlan {
        accept_user: target_user,
        reject_users,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn offer(cleaning_id: Uuid, user_id: Uuid, status: OfferStatus) -> Offer {
        Offer {
            cleaning_id,
            user_id,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn acceptance_rejects_every_other_pending_offer() {
        let cleaning_id = Uuid::new_v4();
        let (winner, loser_a, loser_b) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let offers = vec![
            offer(cleaning_id, loser_a, OfferStatus::Pending),
            offer(cleaning_id, winner, OfferStatus::Pending),
            offer(cleaning_id, loser_b, OfferStatus::Pending),
        ];

        let plan = plan_acceptance(&offers, winner).expect("acceptance should be allowed");
        assert_eq!(plan.accept_user, winner);
        assert_eq!(plan.reject_users.len(), 2);
        assert!(plan.reject_users.contains(&loser_a));
        assert!(plan.reject_users.contains(&loser_b));
    }

    #[test]
    fn sole_offer_is_accepted_with_nothing_to_reject() {
        let cleaning_id = Uuid::new_v4();
        let winner = Uuid::new_v4();
        let offers = vec![offer(cleaning_id, winner, OfferStatus::Pending)];

        let plan = plan_acceptance(&offers, winner).expect("acceptance should be allowed");
        assert_eq!(plan.accept_user, winner);
        assert!(plan.reject_users.is_empty());
    }

    #[test]
    fn already_rejected_offers_are_left_alone() {
        let cleaning_id = Uuid::new_v4();
        let (winner, rejected) = (Uuid::new_v4(), Uuid::new_v4());
        let offers = vec![
            offer(cleaning_id, winner, OfferStatus::Pending),
            offer(cleaning_id, rejected, OfferStatus::Rejected),
        ];

        let plan = plan_acceptance(&offers, winner).expect("acceptance should be allowed");
        assert!(plan.reject_users.is_empty());
    }

    #[test]
    fn second_acceptance_conflicts_and_plans_nothing() {
        let cleaning_id = Uuid::new_v4();
        let (winner, challenger) = (Uuid::new_v4(), Uuid::new_v4());
        let offers = vec![
            offer(cleaning_id, winner, OfferStatus::Accepted),
            offer(cleaning_id, challenger, OfferStatus::Rejected),
        ];

        // Neither the challenger nor the winner itself can be accepted again.
        for target in [challenger, winner] {
            let result = plan_acceptance(&offers, target);
            assert!(matches!(result, Err(GuardError::Conflict(_))));
        }
    }

    #[test]
    fn missing_target_offer_is_a_conflict() {
        let cleaning_id = Uuid::new_v4();
        let offers = vec![offer(cleaning_id, Uuid::new_v4(), OfferStatus::Pending)];

        let result = plan_acceptance(&offers, Uuid::new_v4());
        assert!(matches!(result, Err(GuardError::Conflict(_))));
    }

    #[test]
    fn rejected_or_completed_target_cannot_be_accepted() {
        let cleaning_id = Uuid::new_v4();
        let target = Uuid::new_v4();

        for status in [OfferStatus::Rejected, OfferStatus::Completed] {
            let offers = vec![offer(cleaning_id, target, status)];
            let result = plan_acceptance(&offers, target);
            assert!(matches!(result, Err(GuardError::Conflict(_))));
        }
    }
}
