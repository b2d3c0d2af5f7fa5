use std::{sync::Arc, time::Duration};

use tracing::{debug, instrument, warn};

use crate::{
    ai::{
        AiError, AiProvider, FallbackReason, GenerationRequest, GenerativeClient, Outcome,
        with_timeout,
    },
    config::Config,
    learning::{
        cultural::{self, CulturalContext},
        gate::GateConfig,
        level::Level,
        question,
        quiz::{self, QuizQuestion},
        rephrase::{self, RephrasedText},
        summary::{self, NewsSummary},
        writing::{self, WritingFeedback, WritingSubmission},
    },
};

/// Per-call budgets. A call that overruns is served its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub summary: Duration,
    pub cultural: Duration,
    pub generation: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            summary: Duration::from_secs(10),
            cultural: Duration::from_secs(15),
            generation: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    pub fn from_config(config: &Config) -> Self {
        Self {
            summary: config.summary_timeout(),
            cultural: config.cultural_timeout(),
            generation: config.generation_timeout(),
        }
    }
}

/// Every learning exercise backed by the generative client. Methods never
/// fail; they return generated material or its same-shape fallback.
#[derive(Clone)]
pub struct Tutor {
    client: Arc<dyn GenerativeClient>,
    timeouts: Timeouts,
    gate: GateConfig,
}

fn report<T>(task: &'static str, outcome: Outcome<T>) -> Outcome<T> {
    match outcome.reason() {
        None => debug!(task, "generated"),
        Some(FallbackReason::NotConfigured) => debug!(task, "no provider, serving fallback"),
        Some(reason) => warn!(task, %reason, "serving fallback"),
    }
    outcome
}

impl Tutor {
    pub fn new(client: Arc<dyn GenerativeClient>, timeouts: Timeouts) -> Self {
        Self {
            client,
            timeouts,
            gate: GateConfig::default(),
        }
    }

    pub fn from_config(client: Arc<dyn GenerativeClient>, config: &Config) -> Self {
        Self::new(client, Timeouts::from_config(config))
    }

    pub fn with_gate(mut self, gate: GateConfig) -> Self {
        self.gate = gate;
        self
    }

    pub fn provider(&self) -> AiProvider {
        self.client.provider()
    }

    async fn ask(&self, request: GenerationRequest, limit: Duration) -> Result<String, AiError> {
        with_timeout(limit, self.client.generate(&request)).await
    }

    #[instrument(skip_all, fields(level = %level))]
    pub async fn summarize(&self, title: &str, content: &str, level: Level) -> Outcome<NewsSummary> {
        let request = summary::prompt(title, content, level);
        let outcome = match self.ask(request, self.timeouts.summary).await {
            Ok(reply) => summary::interpret(&reply, content, level),
            Err(err) => Outcome::Fallback(NewsSummary::fallback(content, level), (&err).into()),
        };
        report("summary", outcome)
    }

    #[instrument(skip_all, fields(level = %level))]
    pub async fn cultural_context(
        &self,
        title: &str,
        content: &str,
        level: Level,
    ) -> Outcome<CulturalContext> {
        let request = cultural::prompt(title, content, level);
        let outcome = match self.ask(request, self.timeouts.cultural).await {
            Ok(reply) => cultural::interpret(&reply, title, content, level, &self.gate),
            Err(err) => Outcome::Fallback(cultural::fallback(title, content, level), (&err).into()),
        };
        report("cultural_context", outcome)
    }

    #[instrument(skip_all, fields(level = %level, keywords = keywords.len()))]
    pub async fn generate_quiz(
        &self,
        title: &str,
        content: &str,
        keywords: &[String],
        level: Level,
    ) -> Outcome<Vec<QuizQuestion>> {
        let request = quiz::prompt(title, content, keywords, level);
        let outcome = match self.ask(request, self.timeouts.generation).await {
            Ok(reply) => quiz::interpret(&reply, content, keywords),
            Err(err) => Outcome::Fallback(quiz::keyword_quiz(content, keywords), (&err).into()),
        };
        report("quiz", outcome)
    }

    /// Input beyond the exercise limit is clipped before anything else sees it.
    #[instrument(skip_all)]
    pub async fn rephrase(&self, text: &str) -> Outcome<RephrasedText> {
        let text = rephrase::clip(text);
        let outcome = match self.ask(rephrase::prompt(text), self.timeouts.generation).await {
            Ok(reply) => rephrase::interpret(&reply, text),
            Err(err) => Outcome::Fallback(rephrase::fallback(text), (&err).into()),
        };
        report("rephrase", outcome)
    }

    #[instrument(skip_all, fields(level = %submission.level))]
    pub async fn writing_feedback(&self, submission: &WritingSubmission) -> Outcome<WritingFeedback> {
        let text = submission.text.as_str();
        let request = writing::prompt(submission);
        let outcome = match self.ask(request, self.timeouts.generation).await {
            Ok(reply) => writing::interpret(&reply, text),
            Err(AiError::NotConfigured) => Outcome::Fallback(
                writing::heuristic_feedback(text),
                FallbackReason::NotConfigured,
            ),
            Err(err) => Outcome::Fallback(writing::error_feedback(text), (&err).into()),
        };
        report("writing_feedback", outcome)
    }

    #[instrument(skip_all, fields(level = %level))]
    pub async fn writing_question(&self, title: &str, content: &str, level: Level) -> Outcome<String> {
        let request = question::prompt(title, content, level);
        let outcome = match self.ask(request, self.timeouts.generation).await {
            Ok(reply) => question::interpret(&reply, level),
            Err(err) => Outcome::Fallback(question::fallback(level), (&err).into()),
        };
        report("writing_question", outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{DisabledClient, client::MockGenerativeClient};
    use async_trait::async_trait;

    fn tutor_replying(reply: &'static str) -> Tutor {
        let mut client = MockGenerativeClient::new();
        client
            .expect_generate()
            .returning(move |_| Ok(reply.to_string()));
        client.expect_provider().return_const(AiProvider::Google);
        Tutor::new(Arc::new(client), Timeouts::default())
    }

    fn failing_tutor(err: fn() -> AiError) -> Tutor {
        let mut client = MockGenerativeClient::new();
        client.expect_generate().returning(move |_| Err(err()));
        client.expect_provider().return_const(AiProvider::OpenAi);
        Tutor::new(Arc::new(client), Timeouts::default())
    }

    struct SlowClient;

    #[async_trait]
    impl GenerativeClient for SlowClient {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, AiError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(r#"{"summary": "too late"}"#.to_string())
        }

        fn provider(&self) -> AiProvider {
            AiProvider::Google
        }
    }

    const CONTENT: &str = "The council approved a new tram line for the city centre on Monday.";

    #[tokio::test]
    async fn summary_from_provider() {
        let tutor = tutor_replying(
            r#"```json
{"summary": "A tram line was approved.", "keywords": ["tram"], "grammarPoints": ["Passive voice"]}
```"#,
        );
        let outcome = tutor.summarize("Trams", CONTENT, Level::Beginner).await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().summary, "A tram line was approved.");
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_fallback() {
        let timeouts = Timeouts {
            summary: Duration::from_millis(20),
            cultural: Duration::from_millis(20),
            generation: Duration::from_millis(20),
        };
        let tutor = Tutor::new(Arc::new(SlowClient), timeouts);
        let outcome = tutor.summarize("Trams", CONTENT, Level::Intermediate).await;
        assert_eq!(outcome.reason(), Some(&FallbackReason::Timeout));
        assert_eq!(outcome.value().summary, CONTENT);

        let outcome = tutor.cultural_context("Trams", CONTENT, Level::Intermediate).await;
        assert_eq!(outcome.reason(), Some(&FallbackReason::Timeout));
    }

    #[tokio::test]
    async fn provider_errors_become_fallbacks() {
        let tutor = failing_tutor(|| AiError::Api {
            status: 500,
            body: "boom".to_string(),
        });
        let quiz = tutor
            .generate_quiz("Trams", CONTENT, &["tram".to_string()], Level::Beginner)
            .await;
        assert!(matches!(quiz.reason(), Some(FallbackReason::Provider(_))));
        assert_eq!(quiz.value()[0].word, "tram");

        let feedback = tutor
            .writing_feedback(&WritingSubmission {
                text: "My essay".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(feedback.value().grammar.score, 75);
        assert_eq!(feedback.value().grammar.comments, vec!["Error processing"]);

        let question = tutor.writing_question("Trams", CONTENT, Level::Beginner).await;
        assert_eq!(question.into_inner(), question::fallback(Level::Beginner));
    }

    #[tokio::test]
    async fn disabled_provider_uses_heuristics() {
        let tutor = Tutor::new(Arc::new(DisabledClient), Timeouts::default());
        assert_eq!(tutor.provider(), AiProvider::Disabled);

        let feedback = tutor
            .writing_feedback(&WritingSubmission {
                text: "I think it is good".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(feedback.reason(), Some(&FallbackReason::NotConfigured));
        assert_eq!(feedback.value().improved, "I believe it is good.");

        let rephrased = tutor.rephrase("Show the plan.").await.into_inner();
        assert_eq!(rephrased.advanced, "Substantiate the strategy.");
    }

    #[tokio::test]
    async fn rephrase_input_is_clipped() {
        let mut client = MockGenerativeClient::new();
        client
            .expect_generate()
            .withf(|request| !request.prompt.contains(&"x".repeat(rephrase::MAX_INPUT_CHARS + 1)))
            .returning(|_| Ok(r#"{"beginner": "a", "intermediate": "b", "advanced": "c"}"#.to_string()));
        let tutor = Tutor::new(Arc::new(client), Timeouts::default());
        let outcome = tutor.rephrase(&"x".repeat(900)).await;
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn generic_cultural_reply_is_replaced() {
        let tutor = tutor_replying(
            r#"{"title": "Culture", "description": "Different cultures have different views on trams. This topic is important."}"#,
        );
        let outcome = tutor.cultural_context("Trams", CONTENT, Level::Advanced).await;
        assert!(matches!(outcome.reason(), Some(FallbackReason::Generic(_))));
        assert!(outcome.value().description.len() >= 200);
    }
}
