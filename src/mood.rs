//! Free-text mood detection.
//!
//! A keyword heuristic, not a sentiment model: the input is tokenized,
//! stop words are dropped and the remaining tokens are matched against a
//! keyword list per mood. The mood with the most hits wins.

use serde::Serialize;

/// Confidence reported when a keyword matched.
pub const KEYWORD_CONFIDENCE: f32 = 0.8;
/// Confidence reported when nothing matched and the mood defaulted.
pub const FALLBACK_CONFIDENCE: f32 = 0.6;
/// Confidence reported for empty input.
pub const EMPTY_CONFIDENCE: f32 = 0.5;

const MOOD_KEYWORDS: &[(&str, &[&str])] = &[
    ("happy", &[
        "happy", "joy", "excited", "cheerful", "glad", "elated", "euphoric", "delighted",
        "amazing", "wonderful", "great", "fantastic", "awesome",
    ]),
    ("sad", &[
        "sad", "depressed", "down", "blue", "melancholy", "gloomy", "sorrowful", "heartbroken",
        "crying", "tears", "lonely", "empty",
    ]),
    ("angry", &[
        "angry", "mad", "furious", "rage", "annoyed", "irritated", "frustrated", "pissed",
        "hate", "livid", "outraged",
    ]),
    ("fear", &[
        "scared", "afraid", "terrified", "anxious", "worried", "nervous", "panic", "frightened",
        "fearful", "apprehensive",
    ]),
    ("surprise", &[
        "surprised", "shocked", "amazed", "astonished", "stunned", "bewildered", "confused",
        "unexpected",
    ]),
    ("neutral", &["okay", "fine", "normal", "regular", "usual", "typical", "average"]),
    ("energetic", &[
        "energetic", "active", "pumped", "motivated", "driven", "dynamic", "vigorous", "lively",
    ]),
    ("calm", &[
        "calm", "peaceful", "relaxed", "serene", "tranquil", "quiet", "restful", "zen",
        "meditative",
    ]),
];

const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "all", "and", "any", "are", "because", "been", "before", "being",
    "but", "can", "did", "does", "doing", "for", "from", "had", "has", "have", "having", "her",
    "here", "hers", "him", "his", "how", "into", "its", "just", "more", "most", "myself", "nor",
    "not", "now", "off", "once", "only", "other", "our", "ours", "out", "over", "own", "same",
    "she", "should", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "too", "under", "until", "very", "was", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "you",
    "your", "yours",
];

/// A detected mood and how sure the heuristic is about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPrediction {
    pub mood: String,
    pub confidence: f32,
}

/// Keyword-based text mood analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMoodAnalyzer;

impl TextMoodAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Lowercases, strips non-letters and drops stop words and short tokens.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| token.len() > 2 && !STOP_WORDS.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// Mood with the most keyword hits, first listed mood on ties.
    #[must_use]
    pub fn keyword_mood(&self, tokens: &[String]) -> Option<&'static str> {
        let mut best: Option<(&'static str, usize)> = None;

        for &(mood, keywords) in MOOD_KEYWORDS {
            let hits = tokens
                .iter()
                .filter(|token| keywords.contains(&token.as_str()))
                .count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((mood, hits));
            }
        }

        best.map(|(mood, _)| mood)
    }

    /// Predicts the mood expressed in `text`.
    #[must_use]
    pub fn predict(&self, text: &str) -> MoodPrediction {
        if text.trim().is_empty() {
            return MoodPrediction {
                mood: "neutral".to_string(),
                confidence: EMPTY_CONFIDENCE,
            };
        }

        let tokens = self.tokenize(text);
        let prediction = match self.keyword_mood(&tokens) {
            Some(mood) => MoodPrediction {
                mood: mood.to_string(),
                confidence: KEYWORD_CONFIDENCE,
            },
            None => MoodPrediction {
                mood: "neutral".to_string(),
                confidence: FALLBACK_CONFIDENCE,
            },
        };

        log::debug!(
            "Text mood `{}' ({:.1}) from {} token(s)",
            prediction.mood,
            prediction.confidence,
            tokens.len()
        );
        prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_noise() {
        let analyzer = TextMoodAnalyzer::new();
        let tokens = analyzer.tokenize("I'm SO happy, and the day is great!!! :)");
        assert_eq!(tokens, ["happy", "day", "great"]);
    }

    #[test]
    fn test_keyword_match() {
        let prediction = TextMoodAnalyzer::new().predict("Feeling lonely and gloomy today");
        assert_eq!(prediction.mood, "sad");
        assert_eq!(prediction.confidence, KEYWORD_CONFIDENCE);
    }

    #[test]
    fn test_most_hits_wins() {
        let prediction =
            TextMoodAnalyzer::new().predict("happy but also anxious, worried and nervous");
        assert_eq!(prediction.mood, "fear");
    }

    #[test]
    fn test_ties_go_to_first_listed_mood() {
        let analyzer = TextMoodAnalyzer::new();
        let tokens = analyzer.tokenize("calm yet angry");
        assert_eq!(analyzer.keyword_mood(&tokens), Some("angry"));
    }

    #[test]
    fn test_no_keywords_falls_back_to_neutral() {
        let prediction = TextMoodAnalyzer::new().predict("the weather report for tuesday");
        assert_eq!(prediction.mood, "neutral");
        assert_eq!(prediction.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_input() {
        let prediction = TextMoodAnalyzer::new().predict("   ");
        assert_eq!(prediction.mood, "neutral");
        assert_eq!(prediction.confidence, EMPTY_CONFIDENCE);
    }
}
