mod outcome;
mod runner;

pub use outcome::SmokeOutcome;
pub use runner::SmokeRunner;
