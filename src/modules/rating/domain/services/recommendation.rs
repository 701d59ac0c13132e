use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::aggregation::{aggregate, RatingStats};
use crate::modules::movie::domain::entities::Recommendation;
use crate::modules::rating::domain::entities::Rating;

/// Average below which a rated movie counts against its recommenders.
pub const BAD_RECOMMENDATION_THRESHOLD: f64 = 3.0;

/// Unrated movies (average 0) are never bad recommendations.
pub fn is_bad_recommendation(stats: &RatingStats) -> bool {
    stats.average_rating > 0.0 && stats.average_rating < BAD_RECOMMENDATION_THRESHOLD
}

/// Per-movie statistics for every movie that appears in `ratings`.
pub fn stats_by_movie(ratings: &[Rating]) -> HashMap<Uuid, RatingStats> {
    let mut grouped: HashMap<Uuid, Vec<&Rating>> = HashMap::new();
    for rating in ratings {
        grouped.entry(rating.movie_id).or_default().push(rating);
    }

    grouped
        .into_iter()
        .map(|(movie_id, rows)| (movie_id, aggregate(rows)))
        .collect()
}

/// Movies whose current ratings make them bad recommendations.
pub fn bad_movies(ratings: &[Rating]) -> HashSet<Uuid> {
    stats_by_movie(ratings)
        .into_iter()
        .filter(|(_, stats)| is_bad_recommendation(stats))
        .map(|(movie_id, _)| movie_id)
        .collect()
}

/// Number of distinct bad movies each user recommends. Users without any
/// are absent from the map.
pub fn bad_recommendation_counts(
    recommendations: &[Recommendation],
    ratings: &[Rating],
) -> HashMap<Uuid, usize> {
    let bad = bad_movies(ratings);
    let distinct: HashSet<&Recommendation> = recommendations
        .iter()
        .filter(|r| bad.contains(&r.movie_id))
        .collect();

    let mut counts = HashMap::new();
    for recommendation in distinct {
        *counts.entry(recommendation.user_id).or_insert(0) += 1;
    }
    counts
}

/// Keeps entries with a positive count, highest first. The sort is stable,
/// so ties keep their incoming order.
pub fn rank<T, F>(mut entries: Vec<T>, count: F) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    entries.retain(|e| count(e) > 0);
    entries.sort_by(|a, b| count(b).cmp(&count(a)));
    entries
}
