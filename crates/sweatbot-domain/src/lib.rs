// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod clock;
pub mod leaderboard;
pub mod report;
pub mod shared;
pub mod transport;

// Re-exports for convenience
pub use clock::Clock;
pub use shared::{ChatId, DomainError, MemberId};
