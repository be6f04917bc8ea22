//! Keyword-based fallback classifier.
//!
//! Pure and deterministic: the same text always yields the same analysis,
//! and the confidence is a fixed constant.

use async_trait::async_trait;

use super::{
    analyzer::SentimentAnalyzer,
    entity::{Analysis, Sentiment},
};

/// Confidence reported for every heuristic classification.
pub const HEURISTIC_CONFIDENCE: f64 = 0.6;

const POSITIVE_WORDS: &[&str] = &[
    "happy", "love", "great", "awesome", "good", "excellent", "amazing", "wonderful",
    "fantastic", "joy", "excited",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "bad", "hate", "terrible", "awful", "horrible", "disappointed",
    "frustrated", "upset",
];

const EXCITED_WORDS: &[&str] = &["wow", "omg", "excited", "amazing", "incredible"];

/// Analyzer backed by [`classify`], used alone when no provider credential
/// is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

#[async_trait]
impl SentimentAnalyzer for HeuristicAnalyzer {
    async fn analyze(&self, text: &str) -> Analysis {
        classify(text)
    }
}

/// Classify `text` by counting lexicon hits over its whitespace tokens.
pub fn classify(text: &str) -> Analysis {
    let lowered = text.to_lowercase();

    let (mut positive, mut negative, mut excited) = (0usize, 0usize, 0usize);
    for word in lowered.split_whitespace() {
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
        if EXCITED_WORDS.contains(&word) {
            excited += 1;
        }
    }

    let (sentiment, mood, emotion) = if positive > negative {
        let mood = if excited > 0 || text.contains('!') {
            "excited"
        } else {
            "happy"
        };
        (Sentiment::Positive, mood, Some("joy"))
    } else if negative > positive {
        (Sentiment::Negative, "sad", Some("sadness"))
    } else if text.contains('?') {
        (Sentiment::Neutral, "curious", Some("curiosity"))
    } else {
        (Sentiment::Neutral, "calm", None)
    };

    Analysis {
        sentiment,
        mood: mood.to_string(),
        confidence: HEURISTIC_CONFIDENCE,
        emotions: emotion.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_with_exclamation_is_excited() {
        // テスト項目: ポジティブ語と「!」を含むと positive / excited になる
        // when (操作):
        let analysis = classify("I love this!");

        // then (期待する結果):
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.mood, "excited");
        assert_eq!(analysis.emotions, vec!["joy".to_string()]);
        assert_eq!(analysis.confidence, HEURISTIC_CONFIDENCE);
    }

    #[test]
    fn test_positive_without_excitement_is_happy() {
        // テスト項目: 興奮語も「!」もないポジティブ文は happy になる
        let analysis = classify("what a good day");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.mood, "happy");
    }

    #[test]
    fn test_excitement_word_makes_positive_excited() {
        // テスト項目: 興奮語（wow など）があれば「!」がなくても excited になる
        let analysis = classify("wow this is great");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.mood, "excited");
    }

    #[test]
    fn test_negative_is_sad() {
        // テスト項目: ネガティブ語が多いと negative / sad になる
        // when (操作):
        let analysis = classify("this is terrible");

        // then (期待する結果):
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.mood, "sad");
        assert_eq!(analysis.emotions, vec!["sadness".to_string()]);
    }

    #[test]
    fn test_question_without_lexicon_hits_is_curious() {
        // テスト項目: 辞書に当たらない疑問文は neutral / curious になる
        let analysis = classify("what time is it?");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.mood, "curious");
        assert_eq!(analysis.emotions, vec!["curiosity".to_string()]);
    }

    #[test]
    fn test_plain_text_is_calm() {
        // テスト項目: 手がかりのない文は neutral / calm で感情は空になる
        let analysis = classify("the meeting moved to room four");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.mood, "calm");
        assert!(analysis.emotions.is_empty());
    }

    #[test]
    fn test_tie_is_neutral() {
        // テスト項目: ポジティブ語とネガティブ語が同数なら neutral になる
        let analysis = classify("good and bad");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.mood, "calm");
    }

    #[test]
    fn test_case_insensitive() {
        // テスト項目: 大文字小文字を区別しない
        assert_eq!(classify("I HATE Mondays").sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_deterministic() {
        // テスト項目: 同じ入力には常に同じ結果を返す
        let text = "omg amazing news? maybe";
        assert_eq!(classify(text), classify(text));
    }

    #[tokio::test]
    async fn test_heuristic_analyzer_delegates_to_classify() {
        // テスト項目: HeuristicAnalyzer は classify() と同じ結果を返す
        let analyzer = HeuristicAnalyzer;
        assert_eq!(analyzer.analyze("so sad").await, classify("so sad"));
    }
}
