use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::learning::{Level, QuizQuestion, RephrasedText, WritingFeedback, WritingSubmission};

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    pub article_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Comma separated.
    pub keywords: Option<String>,
    pub level: Option<String>,
}

impl QuizQuery {
    pub fn level(&self) -> Level {
        Level::parse_lossy(self.level.as_deref())
    }

    /// Title and content sent inline by the client, when both are present.
    pub fn inline_article(&self) -> Option<(&str, &str)> {
        Some((filled(&self.title)?, filled(&self.content)?))
    }

    pub fn article_id(&self) -> Option<&str> {
        filled(&self.article_id)
    }

    pub fn keywords(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RephraseRequest {
    pub text: Option<String>,
}

impl RephraseRequest {
    pub fn validate(&self) -> Result<&str, String> {
        filled(&self.text).ok_or_else(|| "Text is required".to_string())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RephraseResponse {
    #[serde(flatten)]
    pub rephrased: RephrasedText,
    /// Present and true when the versions were produced without the provider.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WritingFeedbackRequest {
    pub text: Option<String>,
    pub article_title: Option<String>,
    pub article_content: Option<String>,
    pub level: Option<String>,
    pub question: Option<String>,
}

impl WritingFeedbackRequest {
    pub fn validate(&self) -> Result<(), String> {
        match filled(&self.text) {
            Some(_) => Ok(()),
            None => Err("Text is required".to_string()),
        }
    }

    pub fn into_submission(self) -> WritingSubmission {
        let level = Level::parse_lossy(self.level.as_deref());
        WritingSubmission {
            text: self.text.unwrap_or_default().trim().to_string(),
            article_title: self.article_title,
            article_content: self.article_content,
            level,
            question: self.question,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WritingFeedbackResponse {
    pub feedback: WritingFeedback,
}

/// An article's title and body, shared by the question, summary and
/// cultural-context endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ArticleTextRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub level: Option<String>,
}

impl ArticleTextRequest {
    pub fn validate(&self) -> Result<(&str, &str, Level), String> {
        match (filled(&self.title), filled(&self.content)) {
            (Some(title), Some(content)) => {
                Ok((title, content, Level::parse_lossy(self.level.as_deref())))
            }
            _ => Err("Title and content are required".to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_query_keywords() {
        let query = QuizQuery {
            keywords: Some("tram, council,, budget ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.keywords(), vec!["tram", "council", "budget"]);
        assert!(QuizQuery::default().keywords().is_empty());
    }

    #[test]
    fn quiz_query_needs_both_inline_fields() {
        let query = QuizQuery {
            title: Some("Trams".to_string()),
            content: Some("  ".to_string()),
            article_id: Some("real-2".to_string()),
            ..Default::default()
        };
        assert_eq!(query.inline_article(), None);
        assert_eq!(query.article_id(), Some("real-2"));
    }

    #[test]
    fn rephrase_requires_text() {
        assert_eq!(
            RephraseRequest::default().validate(),
            Err("Text is required".to_string())
        );
        let request = RephraseRequest {
            text: Some(" Hello there. ".to_string()),
        };
        assert_eq!(request.validate(), Ok("Hello there."));
    }

    #[test]
    fn writing_request_becomes_submission() {
        let request: WritingFeedbackRequest = serde_json::from_str(
            r#"{"text": " My view. ", "articleTitle": "Trams", "level": "beginner"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        let submission = request.into_submission();
        assert_eq!(submission.text, "My view.");
        assert_eq!(submission.article_title.as_deref(), Some("Trams"));
        assert_eq!(submission.level, Level::Beginner);
    }

    #[test]
    fn article_text_requires_title_and_content() {
        let request = ArticleTextRequest {
            title: Some("Trams".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(),
            Err("Title and content are required".to_string())
        );
    }

    #[test]
    fn rephrase_flag_only_when_set() {
        let rephrased = RephrasedText {
            beginner: "a".to_string(),
            intermediate: "b".to_string(),
            advanced: "c".to_string(),
        };
        let body = serde_json::to_value(RephraseResponse {
            rephrased: rephrased.clone(),
            fallback: false,
        })
        .unwrap();
        assert!(body.get("fallback").is_none());
        assert_eq!(body["advanced"], "c");

        let body = serde_json::to_value(RephraseResponse {
            rephrased,
            fallback: true,
        })
        .unwrap();
        assert_eq!(body["fallback"], true);
    }
}
