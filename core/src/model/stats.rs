use crate::model::mood::Mood;

/// Entry counts for every mood category. Absent moods count zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoodStatistics {
    counts: [usize; 5],
}

impl MoodStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mood: Mood) {
        self.counts[mood.index()] += 1;
    }

    pub fn count(&self, mood: Mood) -> usize {
        self.counts[mood.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of `mood` in whole percent; zero when there are no entries.
    pub fn percentage(&self, mood: Mood) -> u32 {
        percentage(self.count(mood), self.total())
    }

    /// `(mood, count)` in [`Mood::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Mood, usize)> + '_ {
        Mood::ALL.into_iter().map(move |m| (m, self.count(m)))
    }
}

/// `round(100 * count / total)`, or `0` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u32
}
