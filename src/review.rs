use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt;

use log::*;

use crate::config::AspectConfig;
use crate::parsy::Parse;
use crate::senti::Senti;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Label::Positive
        } else if polarity < 0.0 {
            Label::Negative
        } else {
            Label::Neutral
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "positive"),
            Label::Negative => write!(f, "negative"),
            Label::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub text: String,
    pub rating: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub overall_sentiment: Label,
    pub aspect_sentiments: BTreeMap<String, Label>,
    pub key_phrases: Vec<String>,
    pub inferred_rating: u8,
    #[serde(skip)]
    pub polarity: f64,
}

pub struct Reviewer<P> {
    senti: Senti,
    parsy: P,
    aspects: Vec<AspectConfig>,
    context_window: usize,
}

impl<P: Parse> Reviewer<P> {
    pub fn new(parsy: P, aspects: Vec<AspectConfig>, context_window: usize) -> Self {
        Self {
            senti: Senti::new(),
            parsy,
            aspects,
            context_window,
        }
    }

    pub fn analyze(&self, review: &ReviewInput) -> Analysis {
        let polarity = self.senti.polarity(&review.text);
        trace!("Overall polarity: {}", polarity);
        Analysis {
            overall_sentiment: Label::from_polarity(polarity),
            aspect_sentiments: self.aspect_sentiments(&review.text),
            key_phrases: self.parsy.noun_chunks(&review.text),
            inferred_rating: review.rating.unwrap_or_else(|| infer_rating(polarity)),
            polarity,
        }
    }

    /// Keyword match per token, last match wins, unmatched aspects stay
    /// neutral. A matched token is labelled from the polarity of the token
    /// window around it rather than the token alone, so "delivery was
    /// terrible" pulls the delivery aspect negative even though "delivery"
    /// itself carries no sentiment.
    fn aspect_sentiments(&self, text: &str) -> BTreeMap<String, Label> {
        let mut sentiments: BTreeMap<String, Label> = self
            .aspects
            .iter()
            .map(|aspect| (aspect.name.clone(), Label::Neutral))
            .collect();

        let tokens = self.parsy.tokens(text);
        for (idx, token) in tokens.iter().enumerate() {
            for aspect in &self.aspects {
                if aspect
                    .keywords
                    .iter()
                    .any(|keyword| keyword.eq_ignore_ascii_case(token))
                {
                    let context = self.context(&tokens, idx);
                    let label = Label::from_polarity(self.senti.polarity(&context));
                    debug!("Aspect {} <- {} from {:?}", aspect.name, label, context);
                    sentiments.insert(aspect.name.clone(), label);
                    break;
                }
            }
        }
        sentiments
    }

    fn context(&self, tokens: &[String], idx: usize) -> String {
        let start = idx.saturating_sub(self.context_window);
        let end = (idx + self.context_window + 1).min(tokens.len());
        tokens[start..end].join(" ")
    }
}

/// Maps polarity in [-1, 1] onto [0, 5]. Only used when no rating was
/// supplied. Out-of-range input is clamped so the result always lands in
/// [0, 5].
pub fn infer_rating(polarity: f64) -> u8 {
    ((polarity.max(-1.0).min(1.0) + 1.0) * 2.5).floor() as u8
}
