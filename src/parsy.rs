use nlprule::Tokenizer;

use crate::Error;

/// Seam between the analysis pipeline and the natural-language parser.
/// The pipeline takes an implementation as an explicit dependency so tests
/// can run without the tokenizer model binary.
pub trait Parse {
    /// Token texts in document order.
    fn tokens(&self, text: &str) -> Vec<String>;
    /// Noun phrases as literal substrings of `text`, in document order,
    /// duplicates allowed.
    fn noun_chunks(&self, text: &str) -> Vec<String>;
}

pub struct Parsy {
    tokenizer: Tokenizer,
}

impl Parsy {
    pub fn new(model_path: &str) -> Result<Self, Error> {
        Ok(Self {
            tokenizer: Tokenizer::new(model_path)?,
        })
    }
}

impl Parse for Parsy {
    fn tokens(&self, text: &str) -> Vec<String> {
        let mut tokens = vec![];
        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let span = token.span().byte().clone();
                tokens.push(text[span].to_string());
            }
        }
        tokens
    }

    fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = vec![];
        let mut open: Option<(usize, usize)> = None;
        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let in_phrase = token.chunks().iter().any(|tag| tag.contains("NP"));
                let begins = token.chunks().iter().any(|tag| tag.starts_with("B-NP"));
                let span = token.span().byte().clone();
                if in_phrase {
                    if begins {
                        if let Some((start, end)) = open.take() {
                            chunks.push(text[start..end].to_string());
                        }
                    }
                    open = match open {
                        Some((start, _)) => Some((start, span.end)),
                        None => Some((span.start, span.end)),
                    };
                } else if let Some((start, end)) = open.take() {
                    chunks.push(text[start..end].to_string());
                }
            }
            // Chunk tags never span sentences.
            if let Some((start, end)) = open.take() {
                chunks.push(text[start..end].to_string());
            }
        }
        chunks
    }
}
