//! Authorization guards for the offer and evaluation workflows
//!
//! Guards are stateless predicates over already-fetched entities; they do no
//! I/O. Each returns `Ok(())` to allow the action, or a `GuardError` naming
//! why it is denied: `Forbidden` when the actor lacks rights, `Conflict` when
//! the action is incompatible with current workflow state.
//!
//! Every guard checks ownership before workflow state, so a caller without
//! rights always sees Forbidden and never learns internal state from the
//! error it receives.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Cleaning, Offer, OfferStatus, User};

/// Denial outcome of a guard
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// The actor lacks the rights for this action
    #[error("{0}")]
    Forbidden(&'static str),

    /// The action violates current workflow state
    #[error("{0}")]
    Conflict(&'static str),
}

/// A user may offer on a cleaning job they do not own, at most once.
pub fn check_offer_create(
    actor: &User,
    cleaning: &Cleaning,
    existing_offer: Option<&Offer>,
) -> Result<(), GuardError> {
    if cleaning.owner == actor.id {
        return Err(GuardError::Forbidden(
            "Users are unable to create offers for cleaning jobs they own",
        ));
    }

    if existing_offer.is_some() {
        return Err(GuardError::Conflict(
            "Users are unable to create more than one offer for a cleaning job",
        ));
    }

    Ok(())
}

/// Only the owner of a cleaning job may list its offers.
pub fn check_offer_list(actor: &User, cleaning: &Cleaning) -> Result<(), GuardError> {
    if cleaning.owner != actor.id {
        return Err(GuardError::Forbidden(
            "Users are unable to list offers for cleaning jobs they do not own",
        ));
    }

    Ok(())
}

/// An offer is visible to the job owner and to the user who made it.
pub fn check_offer_view(
    actor: &User,
    cleaning: &Cleaning,
    offer_user_id: Uuid,
) -> Result<(), GuardError> {
    if cleaning.owner != actor.id && offer_user_id != actor.id {
        return Err(GuardError::Forbidden(
            "Users are unable to view offers that are not their own",
        ));
    }

    Ok(())
}

/// Only the owner of a cleaning job may accept an offer on it. The
/// state-level checks (target pending, no accepted winner yet) belong to the
/// lifecycle engine and run inside its transaction.
pub fn check_offer_accept(actor: &User, cleaning: &Cleaning) -> Result<(), GuardError> {
    if cleaning.owner != actor.id {
        return Err(GuardError::Forbidden(
            "Users are unable to accept offers for cleaning jobs they do not own",
        ));
    }

    Ok(())
}

/// Ownership precondition of the evaluation workflow. Callers run this
/// before even looking up the cleaner's offer, so a non-owner learns
/// nothing about offer state from the error they receive.
pub fn check_evaluation_owner(actor: &User, cleaning: &Cleaning) -> Result<(), GuardError> {
    if cleaning.owner != actor.id {
        return Err(GuardError::Forbidden(
            "Users are unable to leave evaluations for cleaning jobs they do not own",
        ));
    }

    Ok(())
}

/// Only the owner of a cleaning job may evaluate a cleaner, only while that
/// cleaner's offer is accepted, and only for the user who holds the offer.
pub fn check_evaluation_create(
    actor: &User,
    cleaning: &Cleaning,
    cleaner: &User,
    offer: &Offer,
) -> Result<(), GuardError> {
    check_evaluation_owner(actor, cleaning)?;

    if offer.status != OfferStatus::Accepted {
        return Err(GuardError::Conflict(
            "Evaluations can only be created while an offer is accepted",
        ));
    }

    if offer.user_id != cleaner.id {
        return Err(GuardError::Conflict(
            "Evaluations can only be left for the user whose offer was accepted",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "hash".to_string(),
            email_verified: false,
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn cleaning(owner: &User) -> Cleaning {
        Cleaning {
            id: Uuid::new_v4(),
            name: "Deep clean of flat".to_string(),
            description: None,
            cleaning_type: crate::models::CleaningType::SpotClean,
            price: Decimal::new(1999, 2),
            owner: owner.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn offer(cleaning: &Cleaning, user: &User, status: OfferStatus) -> Offer {
        Offer {
            cleaning_id: cleaning.id,
            user_id: user.id,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_cannot_offer_on_own_job() {
        let owner = user("alice");
        let job = cleaning(&owner);

        let result = check_offer_create(&owner, &job, None);
        assert!(matches!(result, Err(GuardError::Forbidden(_))));
    }

    #[test]
    fn non_owner_without_prior_offer_may_create() {
        let owner = user("alice");
        let bidder = user("bob");
        let job = cleaning(&owner);

        assert_eq!(check_offer_create(&bidder, &job, None), Ok(()));
    }

    #[test]
    fn duplicate_offer_is_a_conflict() {
        let owner = user("alice");
        let bidder = user("bob");
        let job = cleaning(&owner);
        let existing = offer(&job, &bidder, OfferStatus::Pending);

        let result = check_offer_create(&bidder, &job, Some(&existing));
        assert!(matches!(result, Err(GuardError::Conflict(_))));
    }

    #[test]
    fn owner_with_prior_offer_still_sees_forbidden_first() {
        // Ownership is checked before workflow state.
        let owner = user("alice");
        let job = cleaning(&owner);
        let existing = offer(&job, &owner, OfferStatus::Pending);

        let result = check_offer_create(&owner, &job, Some(&existing));
        assert!(matches!(result, Err(GuardError::Forbidden(_))));
    }

    #[test]
    fn only_owner_may_list_offers() {
        let owner = user("alice");
        let stranger = user("mallory");
        let job = cleaning(&owner);

        assert_eq!(check_offer_list(&owner, &job), Ok(()));
        assert!(matches!(
            check_offer_list(&stranger, &job),
            Err(GuardError::Forbidden(_))
        ));
    }

    #[test]
    fn offer_visible_to_owner_and_holder_only() {
        let owner = user("alice");
        let bidder = user("bob");
        let stranger = user("mallory");
        let job = cleaning(&owner);

        assert_eq!(check_offer_view(&owner, &job, bidder.id), Ok(()));
        assert_eq!(check_offer_view(&bidder, &job, bidder.id), Ok(()));
        assert!(matches!(
            check_offer_view(&stranger, &job, bidder.id),
            Err(GuardError::Forbidden(_))
        ));
    }

    #[test]
    fn non_owner_accepting_sees_forbidden_not_conflict() {
        let owner = user("alice");
        let stranger = user("mallory");
        let job = cleaning(&owner);

        assert!(matches!(
            check_offer_accept(&stranger, &job),
            Err(GuardError::Forbidden(_))
        ));
        assert_eq!(check_offer_accept(&owner, &job), Ok(()));
    }

    #[test]
    fn evaluation_requires_ownership_before_anything_else() {
        let owner = user("alice");
        let bidder = user("bob");
        let stranger = user("dave");
        let job = cleaning(&owner);
        // Offer is still pending, which would be a Conflict, but the
        // stranger must see Forbidden.
        let pending = offer(&job, &bidder, OfferStatus::Pending);

        let result = check_evaluation_create(&stranger, &job, &bidder, &pending);
        assert!(matches!(result, Err(GuardError::Forbidden(_))));
    }

    #[test]
    fn evaluation_requires_an_accepted_offer() {
        let owner = user("alice");
        let bidder = user("bob");
        let job = cleaning(&owner);

        for status in [
            OfferStatus::Pending,
            OfferStatus::Rejected,
            OfferStatus::Completed,
        ] {
            let target = offer(&job, &bidder, status);
            let result = check_evaluation_create(&owner, &job, &bidder, &target);
            assert!(matches!(result, Err(GuardError::Conflict(_))));
        }

        let accepted = offer(&job, &bidder, OfferStatus::Accepted);
        assert_eq!(
            check_evaluation_create(&owner, &job, &bidder, &accepted),
            Ok(())
        );
    }

    #[test]
    fn evaluation_must_target_the_offer_holder() {
        let owner = user("alice");
        let bidder = user("bob");
        let other = user("carol");
        let job = cleaning(&owner);
        let accepted = offer(&job, &bidder, OfferStatus::Accepted);

        let result = check_evaluation_create(&owner, &job, &other, &accepted);
        assert!(matches!(result, Err(GuardError::Conflict(_))));
    }
}
