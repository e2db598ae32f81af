/// Three-bucket mood distribution over a trailing window

use serde::Serialize;

use crate::domain::MoodEntry;
use crate::stats::chronological;

/// Trailing entries included in the distribution
pub const DEFAULT_DISTRIBUTION_WINDOW: usize = 30;

/// Lowest score in the "great" bucket
pub const GREAT_MOOD_MIN: u8 = 8;

/// Lowest score in the "good" bucket; anything below is "low"
pub const GOOD_MOOD_MIN: u8 = 5;

/// Coarse mood class for a single score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodBucket {
    Great,
    Good,
    Low,
}

impl MoodBucket {
    pub fn for_mood(mood: u8) -> Self {
        if mood >= GREAT_MOOD_MIN {
            MoodBucket::Great
        } else if mood >= GOOD_MOOD_MIN {
            MoodBucket::Good
        } else {
            MoodBucket::Low
        }
    }

    /// Label used in summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            MoodBucket::Great => "Vibrant",
            MoodBucket::Good => "Balanced",
            MoodBucket::Low => "Challenging",
        }
    }
}

/// Percentage shares, each in [0, 100], unrounded so they sum to 100
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketShares {
    pub great: f64,
    pub good: f64,
    pub low: f64,
}

/// Bucket counts over the trailing window
///
/// With no data all shares are 0; check `is_empty()` before reading them as
/// a real distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodDistribution {
    pub great: u32,
    pub good: u32,
    pub low: u32,
    pub shares: BucketShares,
}

impl MoodDistribution {
    pub fn total(&self) -> u32 {
        self.great + self.good + self.low
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn count(&self, bucket: MoodBucket) -> u32 {
        match bucket {
            MoodBucket::Great => self.great,
            MoodBucket::Good => self.good,
            MoodBucket::Low => self.low,
        }
    }
}

/// Bucket the last `window_size` entries in time order
pub fn distribution(entries: &[MoodEntry], window_size: usize) -> MoodDistribution {
    let sorted = chronological(entries);
    let start = sorted.len().saturating_sub(window_size);

    let (mut great, mut good, mut low) = (0u32, 0u32, 0u32);
    for entry in &sorted[start..] {
        match MoodBucket::for_mood(entry.mood) {
            MoodBucket::Great => great += 1,
            MoodBucket::Good => good += 1,
            MoodBucket::Low => low += 1,
        }
    }

    let divisor = (great + good + low).max(1) as f64;
    let share = |n: u32| n as f64 / divisor * 100.0;

    MoodDistribution {
        great,
        good,
        low,
        shares: BucketShares {
            great: share(great),
            good: share(good),
            low: share(low),
        },
    }
}
