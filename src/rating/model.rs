use super::types::{RatingUpdate, RatingValue};
use crate::config::settings::RatingSettings;
use crate::errors::{LeagueError, LeagueResult};

/// Logistic rating model where the share of points scored is the actual result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingModel {
    spread: f64,
    scaling: f64,
}

impl RatingModel {
    pub fn new(spread: f64, scaling: f64) -> Self {
        Self { spread, scaling }
    }

    pub fn from_settings(settings: &RatingSettings) -> Self {
        Self::new(settings.spread, settings.scaling)
    }

    /// Expected share of the points for A against B, in (0, 1)
    pub fn expected_outcome(&self, rating_a: RatingValue, rating_b: RatingValue) -> f64 {
        1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / self.spread))
    }

    pub fn update(
        &self,
        rating_a: RatingValue,
        score_a: u32,
        rating_b: RatingValue,
        score_b: u32,
    ) -> LeagueResult<RatingUpdate> {
        let actual = actual_outcome(score_a, score_b)?;
        let expected = self.expected_outcome(rating_a, rating_b);
        let delta = self.scaling * (actual - expected);

        Ok(RatingUpdate {
            new_rating_a: rating_a + delta,
            new_rating_b: rating_b - delta,
            delta,
        })
    }
}

impl Default for RatingModel {
    fn default() -> Self {
        Self::from_settings(&RatingSettings::default())
    }
}

fn actual_outcome(score_a: u32, score_b: u32) -> LeagueResult<f64> {
    let total = u64::from(score_a) + u64::from(score_b);
    if total == 0 {
        return Err(LeagueError::domain("score sum is zero, result is undefined"));
    }
    Ok(f64::from(score_a) / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_equal_ratings_expect_even_split() {
        let model = RatingModel::default();
        for rating in [0.0, 1200.0, 1500.0, 2731.5] {
            assert!((model.expected_outcome(rating, rating) - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn test_higher_rating_is_favoured() {
        let model = RatingModel::default();
        let expected = model.expected_outcome(1700.0, 1500.0);
        assert!(expected > 0.5 && expected < 1.0);
        assert!((expected + model.expected_outcome(1500.0, 1700.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_smaller_spread_is_steeper() {
        let flat = RatingModel::new(800.0, 100.0);
        let steep = RatingModel::new(200.0, 100.0);
        assert!(steep.expected_outcome(1600.0, 1500.0) > flat.expected_outcome(1600.0, 1500.0));
    }

    #[test]
    fn test_fresh_players_ten_to_five() {
        let model = RatingModel::new(500.0, 100.0);
        let update = model.update(1500.0, 10, 1500.0, 5).unwrap();

        assert!((update.delta - 100.0 / 6.0).abs() < EPS);
        assert!((update.new_rating_a - 1516.6667).abs() < 1e-3);
        assert!((update.new_rating_b - 1483.3333).abs() < 1e-3);
        assert!((update.old_rating_a() - 1500.0).abs() < EPS);
    }

    #[test]
    fn test_update_is_zero_sum() {
        let model = RatingModel::default();
        let cases = [(1500.0, 10, 1500.0, 5), (1320.4, 0, 1711.9, 7), (1800.0, 3, 1200.0, 3)];
        for (ra, sa, rb, sb) in cases {
            let update = model.update(ra, sa, rb, sb).unwrap();
            assert!((update.new_rating_a + update.new_rating_b - (ra + rb)).abs() < EPS);
        }
    }

    #[test]
    fn test_update_is_antisymmetric() {
        let model = RatingModel::default();
        let forward = model.update(1620.0, 8, 1480.0, 11).unwrap();
        let backward = model.update(1480.0, 11, 1620.0, 8).unwrap();

        assert!((forward.delta + backward.delta).abs() < EPS);
        assert!((forward.new_rating_a - backward.new_rating_b).abs() < EPS);
    }

    #[test]
    fn test_draw_moves_toward_the_underdog() {
        let model = RatingModel::default();
        let update = model.update(1400.0, 4, 1600.0, 4).unwrap();
        assert!(update.delta > 0.0);
    }

    #[test]
    fn test_zero_zero_is_domain_error() {
        let model = RatingModel::default();
        let err = model.update(1500.0, 0, 1500.0, 0).unwrap_err();
        assert!(matches!(err, LeagueError::DomainError(_)));
    }
}
