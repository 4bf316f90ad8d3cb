//! Analyzer keyword lexicon.
//!
//! The concrete word lists are domain data, not logic: the defaults cover the
//! Japanese nutrition-coaching vocabulary NutriRoom ships with (plus English
//! equivalents), and a host can swap the whole lexicon via [`Lexicon::from_json`]
//! without touching the analyzer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Words that mean the user wants a longer, concrete answer.
const DETAIL_TRIGGERS: &[&str] = &[
    "詳しく",
    "くわしく",
    "具体的に",
    "もっと教えて",
    "ちゃんと知りたい",
    "しっかり",
    "どうやって",
    "in detail",
    "tell me more",
    "specifically",
    "step by step",
];

/// Interrogative markers checked by containment (the `?` forms are handled
/// separately by regex in the analyzer).
const QUESTION_MARKERS: &[&str] = &[
    "ですか",
    "ますか",
    "でしょうか",
    "かな",
    "どう",
    "なぜ",
    "なんで",
    "どうして",
    "いつ",
    "どれ",
    "どこ",
    "何を",
    "何が",
];

const POSITIVE_WORDS: &[&str] = &[
    "ありがとう",
    "嬉しい",
    "うれしい",
    "楽しい",
    "やった",
    "できた",
    "頑張った",
    "がんばった",
    "いいね",
    "最高",
    "thanks",
    "thank you",
    "happy",
    "great",
];

const NEGATIVE_WORDS: &[&str] = &[
    "疲れた",
    "つらい",
    "辛い",
    "しんどい",
    "不安",
    "落ち込",
    "痩せない",
    "太った",
    "失敗",
    "だめ",
    "tired",
    "sad",
    "anxious",
];

const CONFUSION_WORDS: &[&str] = &[
    "わからない",
    "分からない",
    "わかりません",
    "どういうこと",
    "難しい",
    "むずかしい",
    "よくわから",
    "confused",
    "don't understand",
];

/// Words suggesting the user needs emotional support before advice.
const SUPPORT_WORDS: &[&str] = &[
    "疲れた",
    "つらい",
    "辛い",
    "不安",
    "自信がない",
    "挫折",
    "くじけ",
    "もうやだ",
    "泣き",
];

/// Push-back phrasing: the user is resisting the coaching.
const RESISTANCE_WORDS: &[&str] = &[
    "でも",
    "だって",
    "無理",
    "むり",
    "めんどくさい",
    "面倒",
    "やりたくない",
    "続かない",
    "できない",
];

const FIRST_TIME_WORDS: &[&str] = &[
    "はじめまして",
    "初めまして",
    "よろしくお願いします",
    "初めて使",
    "nice to meet",
    "first time",
];

/// Nutrition-domain topics, scanned in order of appearance in the message.
const TOPIC_WORDS: &[&str] = &[
    "ダイエット",
    "食事",
    "栄養",
    "タンパク質",
    "たんぱく質",
    "カロリー",
    "糖質",
    "脂質",
    "野菜",
    "間食",
    "運動",
    "筋トレ",
    "睡眠",
    "体重",
    "水分",
    "朝食",
    "昼食",
    "夕食",
    "diet",
    "meal",
    "nutrition",
    "protein",
    "calorie",
    "exercise",
    "sleep",
    "weight",
];

/// Words that push a message into the complex tier on their own.
const COMPLEXITY_WORDS: &[&str] = &[
    "理由",
    "仕組み",
    "メカニズム",
    "違い",
    "比較",
    "関係",
    "影響",
    "なぜ",
    "どうして",
    "mechanism",
    "difference",
    "why",
];

/// Messages at or past this many characters count as complex regardless of
/// keyword hits.
const DEFAULT_COMPLEX_CHAR_THRESHOLD: usize = 40;

/// The full keyword configuration consumed by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub detail_triggers: Vec<String>,
    pub question_markers: Vec<String>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub confusion_words: Vec<String>,
    pub support_words: Vec<String>,
    pub resistance_words: Vec<String>,
    pub first_time_words: Vec<String>,
    pub topics: Vec<String>,
    pub complexity_words: Vec<String>,
    pub complex_char_threshold: usize,
}

impl Default for Lexicon {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            detail_triggers: owned(DETAIL_TRIGGERS),
            question_markers: owned(QUESTION_MARKERS),
            positive_words: owned(POSITIVE_WORDS),
            negative_words: owned(NEGATIVE_WORDS),
            confusion_words: owned(CONFUSION_WORDS),
            support_words: owned(SUPPORT_WORDS),
            resistance_words: owned(RESISTANCE_WORDS),
            first_time_words: owned(FIRST_TIME_WORDS),
            topics: owned(TOPIC_WORDS),
            complexity_words: owned(COMPLEXITY_WORDS),
            complex_char_threshold: DEFAULT_COMPLEX_CHAR_THRESHOLD,
        }
    }
}

impl Lexicon {
    /// Loads a replacement lexicon from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Case-insensitive containment check against one word list.
    pub(crate) fn contains_any(text_lower: &str, words: &[String]) -> bool {
        words.iter().any(|w| text_lower.contains(w.as_str()))
    }

    /// Number of distinct words from `words` contained in the text.
    pub(crate) fn count_hits(text_lower: &str, words: &[String]) -> usize {
        words
            .iter()
            .filter(|w| text_lower.contains(w.as_str()))
            .count()
    }
}
