//! Upper tail binomial probabilities and the scores derived from them.

use crate::errors::ScoringError;
use statrs::distribution::{
    Binomial,
    DiscreteCDF,
};
use std::collections::HashMap;
use std::sync::{
    OnceLock,
    RwLock,
};

/// Score given when the probability underflows to zero.
pub const MAX_SCORE: f64 = 5000.0;

const MIN_P: f64 = 0.000001;
const MAX_P: f64 = 0.999999;

/// Requests with fewer trials than this are memoized.
const CACHE_MAX_TRIALS: i64 = 300;

type CacheKey = (u64, i64, i64);

fn cache() -> &'static RwLock<HashMap<CacheKey, f64>> {
    static CACHE: OnceLock<RwLock<HashMap<CacheKey, f64>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// P(X >= successes) with X ~ Binomial(trials, p).
///
/// `p` is clamped to [1e-6, 0.999999]. Zero successes is always probability 1,
/// also with zero trials. Counts are signed so corrupted inputs surface as
/// errors instead of wrapping.
pub fn upper_tail_probability(trials: i64, successes: i64, p: f64) -> Result<f64, ScoringError> {
    if successes < 0 {
        return Err(ScoringError::NegativeSuccesses { successes });
    }
    if trials < 0 {
        return Err(ScoringError::NegativeTrials { trials });
    }
    if successes == 0 {
        return Ok(1.0);
    }
    if trials == 0 {
        return Err(ScoringError::NoTrials);
    }
    if successes > trials {
        return Err(ScoringError::SuccessesExceedTrials { successes, trials });
    }
    if !p.is_finite() {
        return Err(ScoringError::InvalidProbability { p });
    }
    let p = p.clamp(MIN_P, MAX_P);

    let key = (p.to_bits(), trials, successes);
    let use_cache = trials < CACHE_MAX_TRIALS;
    if use_cache {
        if let Ok(guard) = cache().read() {
            if let Some(x) = guard.get(&key) {
                return Ok(*x);
            }
        }
    }

    // X >= m is the same event as (n - X) <= n - m, and n - X ~ Binomial(n, 1 - p).
    let complement = Binomial::new(1.0 - p, trials as u64)
        .map_err(|_| ScoringError::InvalidProbability { p })?;
    let out = complement.cdf((trials - successes) as u64);

    if use_cache {
        if let Ok(mut guard) = cache().write() {
            guard.insert(key, out);
        }
    }
    Ok(out)
}

/// `-10 * log10(P(X >= successes))`, never negative.
pub fn binomial_score(trials: i64, successes: i64, p: f64) -> Result<f64, ScoringError> {
    let prob = upper_tail_probability(trials, successes, p)?;
    if prob <= 0.0 {
        return Ok(MAX_SCORE);
    }
    if prob >= 1.0 {
        return Ok(0.0);
    }
    Ok((-10.0 * prob.log10()).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let prob = upper_tail_probability(1, 1, 0.5).unwrap();
        assert!((prob - 0.5).abs() < 1e-10);
        let score = binomial_score(1, 1, 0.5).unwrap();
        assert!((score - 3.0103).abs() < 1e-4);

        // P(X >= 2) for Binomial(3, 0.1) = 3 * 0.01 * 0.9 + 0.001
        let prob = upper_tail_probability(3, 2, 0.1).unwrap();
        assert!((prob - 0.028).abs() < 1e-10);
    }

    #[test]
    fn test_zero_matches() {
        assert_eq!(binomial_score(10, 0, 0.1).unwrap(), 0.0);
        assert_eq!(binomial_score(0, 0, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn test_monotone_in_matches() {
        let mut last = 0.0;
        for m in 0..=40 {
            let score = binomial_score(40, m, 0.06).unwrap();
            assert!(score >= 0.0);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(
            binomial_score(10, -1, 0.1),
            Err(ScoringError::NegativeSuccesses { successes: -1 })
        );
        assert_eq!(
            binomial_score(-3, 1, 0.1),
            Err(ScoringError::NegativeTrials { trials: -3 })
        );
        assert_eq!(binomial_score(0, 1, 0.1), Err(ScoringError::NoTrials));
        assert_eq!(
            binomial_score(2, 3, 0.1),
            Err(ScoringError::SuccessesExceedTrials {
                successes: 3,
                trials: 2
            })
        );
        assert!(binomial_score(2, 1, f64::NAN).is_err());
    }

    #[test]
    fn test_probability_is_clamped() {
        let high = upper_tail_probability(5, 5, 3.0).unwrap();
        let clamped = upper_tail_probability(5, 5, 0.999999).unwrap();
        assert_eq!(high, clamped);
        assert!(binomial_score(5, 1, 0.0).unwrap() > 0.0);
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let small = upper_tail_probability(250, 30, 0.05).unwrap();
        let again = upper_tail_probability(250, 30, 0.05).unwrap();
        assert_eq!(small, again);
        let big = upper_tail_probability(400, 30, 0.05).unwrap();
        assert!(big > small);
    }
}
