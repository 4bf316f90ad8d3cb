//! Message Analyzer - keyword-driven classification of raw user messages.
//!
//! Pure containment checks against the lexicon plus a pair of interrogative
//! regex patterns. No I/O, no randomness: the same message always produces the
//! same [`MessageAnalysis`]. Empty or unmatched input resolves to the neutral
//! default rather than an error.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::analysis::{Complexity, Emotion, MessageAnalysis};
use super::lexicon::Lexicon;

/// Question-mark endings, both full-width and ASCII.
static QUESTION_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[？?]").expect("Invalid regex: question mark pattern"));

/// English interrogative openers.
static QUESTION_OPENER_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(what|why|how|when|where|who|which|can you|could you|do you|should i|is it)\b")
        .expect("Invalid regex: English question openers")
});

/// Keyword-matching analyzer over a swappable lexicon.
pub struct MessageAnalyzer {
    lexicon: Lexicon,
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAnalyzer {
    /// Create an analyzer with the built-in nutrition lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::default(),
        }
    }

    /// Create an analyzer with a replacement lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Analyze one raw user message.
    pub fn analyze(&self, message: &str) -> MessageAnalysis {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return MessageAnalysis::neutral();
        }

        let text = trimmed.to_lowercase();

        let emotion = self.detect_emotion(&text);
        let topics = self.matches_in_order(&text, &self.lexicon.topics);
        let requests_details = Lexicon::contains_any(&text, &self.lexicon.detail_triggers);
        let is_question = self.detect_question(trimmed, &text);
        let complexity = self.score_complexity(trimmed, &text, &topics);
        let keywords = self.collect_keywords(&text);

        let analysis = MessageAnalysis {
            emotion,
            topics,
            is_first_time: Lexicon::contains_any(&text, &self.lexicon.first_time_words),
            needs_support: Lexicon::contains_any(&text, &self.lexicon.support_words),
            is_resistant: Lexicon::contains_any(&text, &self.lexicon.resistance_words),
            requests_details,
            is_question,
            complexity,
            keywords,
        };

        debug!("analyzed message: {}", analysis.summary());
        analysis
    }

    /// Emotion by hit count; confusion wins ties against valence, valence
    /// ties resolve to neutral.
    fn detect_emotion(&self, text: &str) -> Emotion {
        let positive = Lexicon::count_hits(text, &self.lexicon.positive_words);
        let negative = Lexicon::count_hits(text, &self.lexicon.negative_words);
        let confused = Lexicon::count_hits(text, &self.lexicon.confusion_words);

        if confused > 0 && confused >= positive && confused >= negative {
            Emotion::Confused
        } else if positive > negative {
            Emotion::Positive
        } else if negative > positive {
            Emotion::Negative
        } else {
            Emotion::Neutral
        }
    }

    fn detect_question(&self, original: &str, text_lower: &str) -> bool {
        QUESTION_MARK.is_match(original)
            || QUESTION_OPENER_EN.is_match(original)
            || Lexicon::contains_any(text_lower, &self.lexicon.question_markers)
    }

    /// Complex when the message is long, spans several topics, or carries an
    /// explicit why/how-does-it-work word.
    fn score_complexity(&self, original: &str, text_lower: &str, topics: &[String]) -> Complexity {
        let char_count = original.chars().count();
        if char_count >= self.lexicon.complex_char_threshold
            || topics.len() >= 2
            || Lexicon::contains_any(text_lower, &self.lexicon.complexity_words)
        {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }

    /// Words from `words` present in the text, ordered by first appearance.
    fn matches_in_order(&self, text: &str, words: &[String]) -> Vec<String> {
        let mut found: Vec<(usize, String)> = words
            .iter()
            .filter_map(|w| text.find(w.as_str()).map(|pos| (pos, w.clone())))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.dedup_by(|a, b| a.1 == b.1);
        found.into_iter().map(|(_, w)| w).collect()
    }

    /// All matched lexicon words across every category, first-appearance order.
    fn collect_keywords(&self, text: &str) -> Vec<String> {
        let lists = [
            &self.lexicon.topics,
            &self.lexicon.detail_triggers,
            &self.lexicon.positive_words,
            &self.lexicon.negative_words,
            &self.lexicon.confusion_words,
            &self.lexicon.support_words,
            &self.lexicon.resistance_words,
        ];

        let mut found: Vec<(usize, String)> = Vec::new();
        for list in lists {
            for word in list.iter() {
                if let Some(pos) = text.find(word.as_str()) {
                    if !found.iter().any(|(_, w)| w == word) {
                        found.push((pos, word.clone()));
                    }
                }
            }
        }
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, w)| w).collect()
    }
}
