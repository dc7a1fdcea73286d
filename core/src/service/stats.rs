use crate::model::entry::MoodCollection;
use crate::model::mood::Mood;
use crate::model::stats::MoodStatistics;

pub fn aggregate(collection: &MoodCollection) -> MoodStatistics {
    let mut stats = MoodStatistics::new();
    for entry in collection.entries() {
        stats.add(entry.mood);
    }
    stats
}

/// The mood recorded most often. Ties go to the better mood.
pub fn most_frequent(collection: &MoodCollection) -> Option<Mood> {
    if collection.is_empty() {
        return None;
    }
    let stats = aggregate(collection);
    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in stats.iter() {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}
