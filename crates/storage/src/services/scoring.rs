use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CategoryScores;

/// Per-category mean scores across one developer's reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryAverages {
    pub documentation: f64,
    pub speed: f64,
    pub code_quality: f64,
    pub communication: f64,
    pub planning: f64,
    pub personality: f64,
}

impl CategoryAverages {
    pub fn mean(&self) -> f64 {
        (self.documentation
            + self.speed
            + self.code_quality
            + self.communication
            + self.planning
            + self.personality)
            / 6.0
    }
}

/// Everything derived from a developer's current set of reviews.
///
/// The `Default` value (count 0, all averages 0.0) is the deliberate
/// representation of an unreviewed developer.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ReviewAggregate {
    pub review_count: i64,
    pub category_averages: CategoryAverages,
    pub average_score: f64,
}

/// Computes the score aggregate for one developer from a snapshot of
/// their review scores.
///
/// Single pass over the input, accumulating exact integer sums per
/// category; division happens only at the end. `average_score` is the
/// mean of the six category averages, which equals the mean of the
/// per-review means. Inputs are assumed validated to [1,10]; this
/// function never rejects.
pub fn compute_aggregate(scores: impl IntoIterator<Item = CategoryScores>) -> ReviewAggregate {
    let mut count: i64 = 0;
    let mut sums = [0i64; 6];

    for review in scores {
        for (sum, score) in sums.iter_mut().zip(review.as_array()) {
            *sum += i64::from(score);
        }
        count += 1;
    }

    if count == 0 {
        return ReviewAggregate::default();
    }

    let divisor = count as f64;
    let category_averages = CategoryAverages {
        documentation: sums[0] as f64 / divisor,
        speed: sums[1] as f64 / divisor,
        code_quality: sums[2] as f64 / divisor,
        communication: sums[3] as f64 / divisor,
        planning: sums[4] as f64 / divisor,
        personality: sums[5] as f64 / divisor,
    };
    let average_score = category_averages.mean();

    ReviewAggregate {
        review_count: count,
        category_averages,
        average_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use proptest::prelude::*;

    fn scores(values: [i16; 6]) -> CategoryScores {
        CategoryScores {
            documentation: values[0],
            speed: values[1],
            code_quality: values[2],
            communication: values[3],
            planning: values[4],
            personality: values[5],
        }
    }

    #[test]
    fn empty_input_yields_the_zero_default() {
        let aggregate = compute_aggregate([]);
        assert_eq!(aggregate.review_count, 0);
        assert_eq!(aggregate.average_score, 0.0);
        assert_eq!(aggregate.category_averages, CategoryAverages::default());
        assert_eq!(Tier::from_score(aggregate.average_score), Tier::D);
    }

    #[test]
    fn single_review_echoes_its_scores() {
        let aggregate = compute_aggregate([scores([8, 6, 7, 9, 5, 7])]);
        assert_eq!(aggregate.review_count, 1);
        assert_eq!(aggregate.category_averages.documentation, 8.0);
        assert_eq!(aggregate.category_averages.speed, 6.0);
        assert_eq!(aggregate.category_averages.code_quality, 7.0);
        assert_eq!(aggregate.category_averages.communication, 9.0);
        assert_eq!(aggregate.category_averages.planning, 5.0);
        assert_eq!(aggregate.category_averages.personality, 7.0);
        assert_eq!(aggregate.average_score, 7.0);
        assert_eq!(Tier::from_score(aggregate.average_score), Tier::A);
    }

    #[test]
    fn two_reviews_average_per_category() {
        let aggregate = compute_aggregate([scores([6; 6]), scores([10; 6])]);
        assert_eq!(aggregate.review_count, 2);
        for avg in [
            aggregate.category_averages.documentation,
            aggregate.category_averages.speed,
            aggregate.category_averages.code_quality,
            aggregate.category_averages.communication,
            aggregate.category_averages.planning,
            aggregate.category_averages.personality,
        ] {
            assert_eq!(avg, 8.0);
        }
        assert_eq!(aggregate.average_score, 8.0);
        assert_eq!(Tier::from_score(aggregate.average_score), Tier::S);
    }

    #[test]
    fn recomputation_on_the_same_snapshot_is_identical() {
        let snapshot = vec![scores([3, 9, 4, 8, 2, 10]), scores([7, 7, 7, 7, 7, 7])];
        let first = compute_aggregate(snapshot.clone());
        let second = compute_aggregate(snapshot);
        assert_eq!(first.review_count, second.review_count);
        assert_eq!(first.average_score, second.average_score);
        assert_eq!(first.category_averages, second.category_averages);
    }

    fn arb_scores() -> impl Strategy<Value = CategoryScores> {
        (
            1i16..=10,
            1i16..=10,
            1i16..=10,
            1i16..=10,
            1i16..=10,
            1i16..=10,
        )
            .prop_map(
                |(documentation, speed, code_quality, communication, planning, personality)| {
                    CategoryScores {
                        documentation,
                        speed,
                        code_quality,
                        communication,
                        planning,
                        personality,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn average_equals_mean_of_per_review_means(reviews in prop::collection::vec(arb_scores(), 1..50)) {
            let aggregate = compute_aggregate(reviews.clone());
            let per_review_mean: f64 =
                reviews.iter().map(CategoryScores::mean).sum::<f64>() / reviews.len() as f64;
            prop_assert!((aggregate.average_score - per_review_mean).abs() < 1e-9);
        }

        #[test]
        fn average_stays_within_score_bounds(reviews in prop::collection::vec(arb_scores(), 1..50)) {
            let aggregate = compute_aggregate(reviews.clone());
            prop_assert!(aggregate.average_score >= 1.0);
            prop_assert!(aggregate.average_score <= 10.0);
            prop_assert_eq!(aggregate.review_count, reviews.len() as i64);
        }
    }
}
