mod standings;

pub use standings::{Leaderboard, Standing, StandingStatus};
