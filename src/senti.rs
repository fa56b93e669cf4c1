use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon-based polarity scorer. Needs no model files, so construction
/// cannot fail.
pub struct Senti {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Senti {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in [-1, 1]. Text with no scored words comes back 0.
    pub fn polarity(&self, input: &str) -> f64 {
        self.analyzer
            .polarity_scores(input)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_cues_score_positive() {
        let senti = Senti::new();
        assert!(senti.polarity("The product quality is great") > 0.0);
    }

    #[test]
    fn negative_cues_score_negative() {
        let senti = Senti::new();
        assert!(senti.polarity("The delivery was terrible") < 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let senti = Senti::new();
        assert_eq!(senti.polarity(""), 0.0);
    }

    #[test]
    fn wordless_text_scores_zero() {
        let senti = Senti::new();
        assert_eq!(senti.polarity("The box arrived on a Tuesday"), 0.0);
    }
}
