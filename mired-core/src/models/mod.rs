pub mod user;
pub mod connection;
pub mod rating;

// Re-export per comodità
pub use user::UserProfile;
pub use connection::{Connection, ConnectionState, InvitationStatus};
pub use rating::RatingSummary;
