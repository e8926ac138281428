//! Mood detection — fixed keyword lookup over a single user message.
//!
//! Marker sets are checked in priority order and the first set with any
//! marker present wins. Matching is plain substring containment on the
//! lower-cased text, so "good" also matches inside "goodbye".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse sentiment bucket for one user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Anxious,
    Sad,
    Positive,
    Negative,
    Neutral,
}

impl MoodLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Anxious => "anxious",
            MoodLabel::Sad => "sad",
            MoodLabel::Positive => "positive",
            MoodLabel::Negative => "negative",
            MoodLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ANXIOUS_MARKERS: &[&str] = &["panic", "panicking", "overwhelmed", "anxious", "anxiety"];

pub const SAD_MARKERS: &[&str] = &["sad", "down", "lonely", "depressed", "crying"];

pub const POSITIVE_MARKERS: &[&str] = &[
    "grateful", "happy", "relieved", "hopeful", "excited", "calm", "good", "better", "okay",
];

// Overlaps the anxious and sad sets; those entries are shadowed by priority.
pub const NEGATIVE_MARKERS: &[&str] = &[
    "sad",
    "down",
    "depressed",
    "anxious",
    "anxiety",
    "angry",
    "upset",
    "overwhelmed",
    "stress",
    "stressed",
    "worried",
    "scared",
    "lonely",
    "hopeless",
    "tired of",
    "worthless",
    "fail",
    "failing",
];

/// Marker sets in the order they are evaluated.
const PRIORITY: &[(MoodLabel, &[&str])] = &[
    (MoodLabel::Anxious, ANXIOUS_MARKERS),
    (MoodLabel::Sad, SAD_MARKERS),
    (MoodLabel::Positive, POSITIVE_MARKERS),
    (MoodLabel::Negative, NEGATIVE_MARKERS),
];

/// Classify a message. Total and side-effect free.
pub fn detect_mood(text: &str) -> MoodLabel {
    let lowered = text.to_lowercase();
    PRIORITY
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lowered.contains(m)))
        .map(|(label, _)| *label)
        .unwrap_or(MoodLabel::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anxious_takes_priority() {
        assert_eq!(detect_mood("I'm anxious"), MoodLabel::Anxious);
        assert_eq!(detect_mood("I feel a PANIC attack coming"), MoodLabel::Anxious);
        assert_eq!(
            detect_mood("sad and lonely but happy, mostly anxious"),
            MoodLabel::Anxious
        );
        assert_eq!(detect_mood("overwhelmed and grateful"), MoodLabel::Anxious);
    }

    #[test]
    fn test_sad_beats_positive_and_negative() {
        assert_eq!(detect_mood("I've been crying all day"), MoodLabel::Sad);
        assert_eq!(detect_mood("Lonely, but okay"), MoodLabel::Sad);
        assert_eq!(detect_mood("depressed and stressed"), MoodLabel::Sad);
    }

    #[test]
    fn test_positive_beats_negative() {
        assert_eq!(detect_mood("I feel hopeful today"), MoodLabel::Positive);
        assert_eq!(detect_mood("stressed but better now"), MoodLabel::Positive);
    }

    #[test]
    fn test_negative_markers() {
        assert_eq!(detect_mood("I feel hopeless"), MoodLabel::Negative);
        assert_eq!(detect_mood("I'm so tired of this"), MoodLabel::Negative);
        assert_eq!(detect_mood("I keep failing exams"), MoodLabel::Negative);
        assert_eq!(detect_mood("Honestly ANGRY"), MoodLabel::Negative);
    }

    #[test]
    fn test_neutral_when_nothing_matches() {
        assert_eq!(detect_mood(""), MoodLabel::Neutral);
        assert_eq!(detect_mood("What's the weather like?"), MoodLabel::Neutral);
        assert_eq!(detect_mood("Tell me a story"), MoodLabel::Neutral);
    }

    #[test]
    fn test_substring_matching_quirk() {
        // "down" inside "download", "good" inside "goodbye"
        assert_eq!(detect_mood("the download finished"), MoodLabel::Sad);
        assert_eq!(detect_mood("goodbye"), MoodLabel::Positive);
        assert_eq!(detect_mood("a mishap"), MoodLabel::Neutral);
    }

    #[test]
    fn test_label_wire_format() {
        assert_eq!(serde_json::to_string(&MoodLabel::Anxious).unwrap(), "\"anxious\"");
        assert_eq!(MoodLabel::Neutral.to_string(), "neutral");
        let parsed: MoodLabel = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, MoodLabel::Negative);
    }
}
