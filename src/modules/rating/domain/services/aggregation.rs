use serde::Serialize;

use crate::modules::rating::domain::entities::Rating;

/// Movie-level statistics derived from top-level ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub average_rating: f64,
    pub rating_count: i64,
}

impl RatingStats {
    pub const EMPTY: RatingStats = RatingStats {
        average_rating: 0.0,
        rating_count: 0,
    };
}

/// Aggregates the ratings of one movie.
///
/// Replies never count, even when they carry a score, and neither do
/// top-level rows without one. With nothing to count the average is `0`.
pub fn aggregate<'a, I>(ratings: I) -> RatingStats
where
    I: IntoIterator<Item = &'a Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .filter(|r| r.is_top_level())
        .filter_map(|r| r.rating)
        .fold((0i64, 0i64), |(sum, count), score| {
            (sum + i64::from(score), count + 1)
        });

    if count == 0 {
        return RatingStats::EMPTY;
    }

    RatingStats {
        average_rating: rounded_mean(sum, count),
        rating_count: count,
    }
}

/// `sum / count` rounded half-up to one decimal. Computed on integers, so
/// exact halves such as 3.45 always round to 3.5.
pub fn rounded_mean(sum: i64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    let tenths = (20 * sum + count).div_euclid(2 * count);
    tenths as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn top(movie: Uuid, score: i32) -> Rating {
        Rating::top_level(movie, Uuid::new_v4(), score, None)
    }

    #[test]
    fn empty_input_yields_zero_average_and_count() {
        assert_eq!(aggregate(&Vec::<Rating>::new()), RatingStats::EMPTY);
    }

    #[test]
    fn single_rating_is_its_own_average() {
        let movie = Uuid::new_v4();
        let stats = aggregate(&[top(movie, 4)]);

        assert_eq!(stats.average_rating, 4.0);
        assert_eq!(stats.rating_count, 1);
    }

    #[test]
    fn replies_are_excluded_even_with_scores() {
        let movie = Uuid::new_v4();
        let parent = top(movie, 2);
        let scored_reply = Rating::reply(&parent, Uuid::new_v4(), Some(5), None);
        let bare_reply = Rating::reply(&parent, Uuid::new_v4(), None, Some("agreed".into()));

        let stats = aggregate(&[parent, scored_reply, bare_reply]);

        assert_eq!(stats.average_rating, 2.0);
        assert_eq!(stats.rating_count, 1);
    }

    #[test]
    fn average_rounds_half_up_to_one_decimal() {
        let movie = Uuid::new_v4();

        // 10 / 3 = 3.333..
        let stats = aggregate(&[top(movie, 3), top(movie, 3), top(movie, 4)]);
        assert_eq!(stats.average_rating, 3.3);

        // 11 / 3 = 3.666..
        let stats = aggregate(&[top(movie, 3), top(movie, 4), top(movie, 4)]);
        assert_eq!(stats.average_rating, 3.7);

        // 7 / 2 = 3.5
        let stats = aggregate(&[top(movie, 3), top(movie, 4)]);
        assert_eq!(stats.average_rating, 3.5);
    }

    #[test]
    fn exact_half_at_second_decimal_rounds_up() {
        // 69 / 20 = 3.45
        assert_eq!(rounded_mean(69, 20), 3.5);
        // 49 / 20 = 2.45
        assert_eq!(rounded_mean(49, 20), 2.5);
        // 29 / 20 = 1.45
        assert_eq!(rounded_mean(29, 20), 1.5);
    }

    #[test]
    fn averages_stay_within_score_bounds() {
        for count in 1..=12i64 {
            for sum in count..=(5 * count) {
                let avg = rounded_mean(sum, count);
                assert!((1.0..=5.0).contains(&avg), "{} / {} = {}", sum, count, avg);
            }
        }
    }
}
