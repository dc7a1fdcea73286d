use moodlog_core::Mood;
use ratatui::style::Color;

pub fn emoji(mood: Mood) -> &'static str {
    match mood {
        Mood::Great => "😁",
        Mood::Good => "🙂",
        Mood::Neutral => "😐",
        Mood::Bad => "😔",
        Mood::Awful => "😫",
    }
}

pub fn label(mood: Mood) -> &'static str {
    match mood {
        Mood::Great => "Great",
        Mood::Good => "Good",
        Mood::Neutral => "Neutral",
        Mood::Bad => "Bad",
        Mood::Awful => "Awful",
    }
}

pub fn color(mood: Mood) -> Color {
    match mood {
        Mood::Great => Color::Green,
        Mood::Good => Color::LightGreen,
        Mood::Neutral => Color::Yellow,
        Mood::Bad => Color::LightRed,
        Mood::Awful => Color::Red,
    }
}

/// Key `1`..`5` picks a mood, best first.
pub fn mood_for_digit(c: char) -> Option<Mood> {
    c.to_digit(10)
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| Mood::ALL.get(i as usize).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_for_digit() {
        assert_eq!(mood_for_digit('1'), Some(Mood::Great));
        assert_eq!(mood_for_digit('5'), Some(Mood::Awful));
        assert_eq!(mood_for_digit('0'), None);
        assert_eq!(mood_for_digit('6'), None);
        assert_eq!(mood_for_digit('x'), None);
    }
}
