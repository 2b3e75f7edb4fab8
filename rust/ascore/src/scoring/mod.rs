//! Binomial statistics, the scoring strategies and the per request driver.

pub mod binomial;
mod calculator;
mod mob;
mod original;
mod results;
mod site_ions;
mod strategy;

pub use binomial::{
    MAX_SCORE,
    binomial_score,
    upper_tail_probability,
};
pub use calculator::AScoreCalculator;
pub use mob::MobScore;
pub use original::OriginalScore;
pub use results::{
    AScoreOutput,
    SiteScore,
};
pub use site_ions::site_determining_ions;
pub use strategy::{
    ScoringMethod,
    ScoringState,
    ScoringStrategy,
    StrategyParams,
};
