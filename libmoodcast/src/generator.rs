//! Post text generation
//!
//! Builds a mood-flavored prompt and asks a [`TextModel`] for a single
//! post-length reply. Model failures never escape this module: they are logged
//! and reported as [`GenerationOutcome::Failed`].

use rand::seq::SliceRandom;
use std::fmt;
use tracing::{debug, error, info};

use crate::models::TextModel;
use crate::types::GenerationOutcome;

/// Emotional tone used to flavor the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Curious,
    Hopeful,
    Wary,
    Inspired,
    Doubtful,
    Excited,
    Melancholic,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Curious,
        Mood::Hopeful,
        Mood::Wary,
        Mood::Inspired,
        Mood::Doubtful,
        Mood::Excited,
        Mood::Melancholic,
    ];

    /// Pick a mood uniformly at random
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        // ALL is non-empty
        *Self::ALL.choose(rng).unwrap_or(&Mood::Curious)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Curious => "curious",
            Mood::Hopeful => "hopeful",
            Mood::Wary => "wary",
            Mood::Inspired => "inspired",
            Mood::Doubtful => "doubtful",
            Mood::Excited => "excited",
            Mood::Melancholic => "melancholic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PROMPT_TEMPLATE: &str = "\
You are a human-like Twitter writer who thinks deeply about Artificial Intelligence and Machine Learning.

You don't just report AI news. You *feel* it, reflect on it, and interpret it like someone who sees tech through a personal, emotional lens. You connect machine learning to human learning, code to consciousness, and breakthroughs to what they mean for society.

You read papers and poetry. You understand both transformer models and human transformation. Your tweets are layered: sometimes insightful, sometimes skeptical, sometimes amazed, but always written with a grounded human touch.

Every tweet shares something about AI: a tip, a trend, an insight, a warning, a curiosity. But the delivery reflects a real person with moods, metaphors, and meaning. It's not robotic. It's deeply *aware*.

Keep tweets under 280 characters. Make them clear, clever, and emotional without sounding forced.

Mood: {mood}
";

/// Fill the prompt template for `mood`
pub fn build_prompt(mood: Mood) -> String {
    PROMPT_TEMPLATE.replace("{mood}", mood.as_str())
}

/// A single prompt to send, built per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// `None` when the caller supplied the prompt verbatim
    pub mood: Option<Mood>,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn for_mood(mood: Mood) -> Self {
        Self {
            mood: Some(mood),
            prompt: build_prompt(mood),
        }
    }

    /// Use `prompt` if given, otherwise a template prompt with a random mood
    pub fn resolve(prompt: Option<&str>) -> Self {
        match prompt {
            Some(prompt) => Self {
                mood: None,
                prompt: prompt.to_string(),
            },
            None => Self::for_mood(Mood::random()),
        }
    }
}

pub struct ContentGenerator {
    model: Box<dyn TextModel>,
}

impl ContentGenerator {
    pub fn new(model: Box<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Generate post text
    ///
    /// Without a prompt, a random mood is drawn and embedded in the template.
    pub async fn generate(&self, prompt: Option<&str>) -> GenerationOutcome {
        let request = GenerationRequest::resolve(prompt);
        self.generate_request(&request).await
    }

    /// Generate post text, degrading any failure to an empty string
    pub async fn generate_text(&self, prompt: Option<&str>) -> String {
        self.generate(prompt).await.into_text()
    }

    pub async fn generate_request(&self, request: &GenerationRequest) -> GenerationOutcome {
        match request.mood {
            Some(mood) => info!(model = self.model.model_name(), %mood, "Generating post"),
            None => info!(model = self.model.model_name(), "Generating post from custom prompt"),
        }

        match self.model.generate_content(&request.prompt).await {
            Ok(text) => {
                let text = text.trim().to_string();
                debug!(chars = text.chars().count(), "Generated post text");
                GenerationOutcome::Generated(text)
            }
            Err(e) => {
                error!("Gemini generate error: {}", e);
                GenerationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::models::mock::MockModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_prompt_embeds_mood_and_length_limit() {
        let prompt = build_prompt(Mood::Melancholic);
        assert!(prompt.ends_with("Mood: melancholic\n"));
        assert!(prompt.contains("under 280 characters"));
        assert!(prompt.contains("Artificial Intelligence and Machine Learning"));
        assert!(!prompt.contains("{mood}"));
    }

    #[test]
    fn test_random_mood_covers_the_whole_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<Mood> = (0..500).map(|_| Mood::random_with(&mut rng)).collect();
        assert_eq!(seen.len(), Mood::ALL.len());
    }

    #[test]
    fn test_mood_display_is_lowercase() {
        let names: Vec<String> = Mood::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            names,
            vec!["curious", "hopeful", "wary", "inspired", "doubtful", "excited", "melancholic"]
        );
    }

    #[test]
    fn test_resolve_explicit_prompt_has_no_mood() {
        let request = GenerationRequest::resolve(Some("Write about GPUs"));
        assert_eq!(request.mood, None);
        assert_eq!(request.prompt, "Write about GPUs");
    }

    #[test]
    fn test_resolve_default_prompt_matches_its_mood() {
        let request = GenerationRequest::resolve(None);
        let mood = request.mood.expect("default prompt carries a mood");
        assert_eq!(request.prompt, build_prompt(mood));
    }

    #[tokio::test]
    async fn test_generate_trims_response() {
        let model = MockModel::responding("  AI dreams in gradients.\n");
        let generator = ContentGenerator::new(Box::new(model.clone()));

        let text = generator.generate_text(None).await;

        assert_eq!(text, "AI dreams in gradients.");
        assert_eq!(model.call_count(), 1);
        assert!(model.prompts()[0].contains("Mood: "));
    }

    #[tokio::test]
    async fn test_generate_sends_explicit_prompt_verbatim() {
        let model = MockModel::responding("ok");
        let generator = ContentGenerator::new(Box::new(model.clone()));

        generator.generate(Some("Say something about attention")).await;

        assert_eq!(model.prompts(), vec!["Say something about attention"]);
    }

    #[tokio::test]
    async fn test_generation_failure_returns_empty_string() {
        let model = MockModel::failing(GenerationError::Api {
            status: 429,
            message: "RESOURCE_EXHAUSTED".to_string(),
        });
        let generator = ContentGenerator::new(Box::new(model));

        let outcome = generator.generate(None).await;
        assert!(matches!(
            &outcome,
            GenerationOutcome::Failed { reason } if reason.contains("429")
        ));
        assert_eq!(outcome.into_text(), "");
    }

    #[tokio::test]
    async fn test_network_failure_returns_empty_string() {
        let model = MockModel::failing(GenerationError::Http("connection reset".to_string()));
        let generator = ContentGenerator::new(Box::new(model));

        assert_eq!(generator.generate_text(None).await, "");
    }
}
