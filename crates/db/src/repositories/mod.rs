//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod activity_repo;
pub mod membership_repo;
pub mod participant_repo;
pub mod score_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use membership_repo::MembershipRepo;
pub use participant_repo::ParticipantRepo;
pub use score_repo::ScoreRepo;
pub use user_repo::UserRepo;
