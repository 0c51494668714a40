//! Check-in vocabulary
//!
//! The closed sets of moods and context tags a check-in may use, plus the
//! subset of context tags that count as "being with others". A vocabulary
//! is built once (from defaults or the config file) and shared read-only
//! behind an `Arc`.

use serde::{Deserialize, Serialize};

use crate::checkin::error::VocabularyError;

const DEFAULT_MOODS: &[&str] = &[
    "happy",
    "sad",
    "anxious",
    "calm",
    "energetic",
    "tired",
    "frustrated",
    "content",
];

const DEFAULT_CONTEXT_TAGS: &[&str] = &[
    "alone",
    "with_friends",
    "with_family",
    "at_work",
    "social_event",
    "one_on_one",
    "group_setting",
    "helping_someone",
    "received_support",
    "conflict",
    "positive_interaction",
    "online_interaction",
];

const DEFAULT_INTERACTION_TAGS: &[&str] = &[
    "with_friends",
    "with_family",
    "social_event",
    "one_on_one",
    "group_setting",
    "positive_interaction",
    "helping_someone",
    "received_support",
];

const DEFAULT_ALONE_TAG: &str = "alone";

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_moods() -> Vec<String> {
    to_strings(DEFAULT_MOODS)
}

fn default_context_tags() -> Vec<String> {
    to_strings(DEFAULT_CONTEXT_TAGS)
}

fn default_interaction_tags() -> Vec<String> {
    to_strings(DEFAULT_INTERACTION_TAGS)
}

fn default_alone_tag() -> String {
    DEFAULT_ALONE_TAG.to_string()
}

/// Allowed moods and context tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_moods")]
    moods: Vec<String>,

    #[serde(default = "default_context_tags")]
    context_tags: Vec<String>,

    #[serde(default = "default_interaction_tags")]
    interaction_tags: Vec<String>,

    #[serde(default = "default_alone_tag")]
    alone_tag: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            moods: default_moods(),
            context_tags: default_context_tags(),
            interaction_tags: default_interaction_tags(),
            alone_tag: default_alone_tag(),
        }
    }
}

impl Vocabulary {
    /// Build a vocabulary from explicit lists
    ///
    /// Duplicates are collapsed keeping the first occurrence.
    pub fn new(
        moods: impl IntoIterator<Item = impl Into<String>>,
        context_tags: impl IntoIterator<Item = impl Into<String>>,
        interaction_tags: impl IntoIterator<Item = impl Into<String>>,
        alone_tag: impl Into<String>,
    ) -> Result<Self, VocabularyError> {
        let vocabulary = Self {
            moods: dedup(moods),
            context_tags: dedup(context_tags),
            interaction_tags: dedup(interaction_tags),
            alone_tag: alone_tag.into(),
        };
        vocabulary.validate()
    }

    /// Check internal consistency and normalise duplicates
    pub fn validate(mut self) -> Result<Self, VocabularyError> {
        self.moods = dedup(self.moods);
        self.context_tags = dedup(self.context_tags);
        self.interaction_tags = dedup(self.interaction_tags);

        if self.moods.is_empty() {
            return Err(VocabularyError::Empty("moods"));
        }
        if self.context_tags.is_empty() {
            return Err(VocabularyError::Empty("context_tags"));
        }

        if let Some(tag) = self
            .interaction_tags
            .iter()
            .find(|t| !self.context_tags.contains(t))
        {
            return Err(VocabularyError::UnknownInteractionTag(tag.clone()));
        }

        if !self.context_tags.contains(&self.alone_tag) {
            return Err(VocabularyError::UnknownAloneTag(self.alone_tag.clone()));
        }

        Ok(self)
    }

    pub fn moods(&self) -> &[String] {
        &self.moods
    }

    pub fn context_tags(&self) -> &[String] {
        &self.context_tags
    }

    pub fn interaction_tags(&self) -> &[String] {
        &self.interaction_tags
    }

    pub fn alone_tag(&self) -> &str {
        &self.alone_tag
    }

    pub fn is_mood(&self, mood: &str) -> bool {
        self.moods.iter().any(|m| m == mood)
    }

    pub fn is_context_tag(&self, tag: &str) -> bool {
        self.context_tags.iter().any(|t| t == tag)
    }

    pub fn is_interaction_tag(&self, tag: &str) -> bool {
        self.interaction_tags.iter().any(|t| t == tag)
    }
}

fn dedup(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_is_consistent() {
        let vocab = Vocabulary::default().validate().unwrap();
        assert_eq!(vocab.moods().len(), 8);
        assert_eq!(vocab.context_tags().len(), 12);
        assert!(vocab.is_mood("frustrated"));
        assert!(vocab.is_context_tag("online_interaction"));
        assert!(vocab.is_interaction_tag("with_family"));
        assert!(!vocab.is_interaction_tag("alone"));
        assert!(!vocab.is_interaction_tag("online_interaction"));
        assert_eq!(vocab.alone_tag(), "alone");
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = Vocabulary::new(
            ["up", "down", "up"],
            ["solo", "team"],
            ["team"],
            "solo",
        )
        .unwrap();
        assert_eq!(vocab.moods(), &["up".to_string(), "down".to_string()]);
        assert!(vocab.is_interaction_tag("team"));
    }

    #[test]
    fn test_interaction_tag_must_be_context_tag() {
        let err = Vocabulary::new(["up"], ["solo"], ["team"], "solo").unwrap_err();
        assert!(matches!(err, VocabularyError::UnknownInteractionTag(t) if t == "team"));
    }

    #[test]
    fn test_alone_tag_must_be_context_tag() {
        let err = Vocabulary::new(["up"], ["team"], ["team"], "solo").unwrap_err();
        assert!(matches!(err, VocabularyError::UnknownAloneTag(_)));
    }

    #[test]
    fn test_empty_moods_rejected() {
        let err = Vocabulary::new(Vec::<String>::new(), ["solo"], Vec::<String>::new(), "solo")
            .unwrap_err();
        assert!(matches!(err, VocabularyError::Empty("moods")));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let vocab: Vocabulary = toml::from_str(r#"moods = ["ok", "meh"]"#).unwrap();
        let vocab = vocab.validate().unwrap();
        assert_eq!(vocab.moods().len(), 2);
        assert_eq!(vocab.context_tags().len(), 12);
    }
}
