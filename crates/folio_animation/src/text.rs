//! Text decomposition for reveal animations
//!
//! Paragraph reveals split text into word tokens on single spaces, so that
//! N words give N tokens and joining them with single spaces reproduces the
//! original text exactly. Typing reveals show a character prefix.

use folio_core::{CoreError, ElementId, LayoutBox, VisualTree};
use tracing::debug;

/// Split text into word tokens on single spaces
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Rejoin word tokens with single spaces
pub fn rejoin_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix of `text` revealed at `progress` (0.0 to 1.0), counted in chars
pub fn typed_prefix(text: &str, progress: f32) -> String {
    let total = text.chars().count();
    let shown = (progress.clamp(0.0, 1.0) * total as f32).round() as usize;
    text.chars().take(shown.min(total)).collect()
}

/// A paragraph whose text has been replaced by one child element per word
#[derive(Debug, Clone)]
pub struct SplitText {
    paragraph: ElementId,
    original: Option<String>,
    words: Vec<ElementId>,
}

impl SplitText {
    /// Replace the paragraph's text with `word_class` children, one per word
    pub fn words(
        tree: &mut VisualTree,
        paragraph: ElementId,
        word_class: &str,
    ) -> Result<Self, CoreError> {
        if !tree.contains(paragraph) {
            return Err(CoreError::UnknownElement(paragraph));
        }
        let original = tree.text(paragraph).map(str::to_string);
        let text = original.clone().unwrap_or_default();

        let mut words = Vec::new();
        for word in split_words(&text) {
            let id = tree.append_text(paragraph, "span", &[word_class], LayoutBox::height(0.0), word)?;
            words.push(id);
        }
        tree.set_text(paragraph, None);

        debug!(count = words.len(), "split paragraph into words");
        Ok(Self {
            paragraph,
            original,
            words,
        })
    }

    pub fn paragraph(&self) -> ElementId {
        self.paragraph
    }

    pub fn word_elements(&self) -> &[ElementId] {
        &self.words
    }

    /// Text reconstructed from the word elements currently in the tree
    pub fn rejoined(&self, tree: &VisualTree) -> String {
        let words: Vec<&str> = self
            .words
            .iter()
            .filter_map(|w| tree.text(*w))
            .collect();
        rejoin_words(&words)
    }

    /// Remove the word elements and restore the paragraph's text
    pub fn revert(&self, tree: &mut VisualTree) {
        for word in &self.words {
            tree.remove(*word);
        }
        if tree.contains(self.paragraph) {
            tree.set_text(self.paragraph, self.original.clone());
        }
    }
}
