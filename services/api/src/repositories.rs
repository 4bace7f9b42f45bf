//! Database repositories for the marketplace service

pub mod cleanings;
pub mod evaluations;
pub mod offers;
pub mod users;

pub use cleanings::CleaningsRepository;
pub use evaluations::EvaluationsRepository;
pub use offers::OffersRepository;
pub use users::UserRepository;
