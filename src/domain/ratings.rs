use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Review;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewSummary {
    /// Mean rating rounded to one decimal, 0.0 without reviews.
    pub average: f64,
    pub total: usize,
    /// One bucket per star value, 1 through 5.
    pub distribution: Vec<StarBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StarBucket {
    pub stars: i32,
    pub count: usize,
    pub percentage: f64,
}

pub fn summarize(reviews: &[Review]) -> ReviewSummary {
    summarize_ratings(reviews.iter().map(|review| review.rating))
}

pub fn summarize_ratings(ratings: impl IntoIterator<Item = i32>) -> ReviewSummary {
    let mut counts = [0_usize; 5];
    let mut total = 0_usize;
    let mut sum = 0_i64;

    for rating in ratings {
        total += 1;
        sum += i64::from(rating);
        if (1..=5).contains(&rating) {
            counts[(rating - 1) as usize] += 1;
        }
    }

    let average = if total == 0 {
        0.0
    } else {
        round_one_decimal(sum as f64 / total as f64)
    };

    let distribution = counts
        .iter()
        .zip(1..)
        .map(|(&count, stars)| StarBucket {
            stars,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();

    ReviewSummary {
        average,
        total,
        distribution,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
