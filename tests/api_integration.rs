mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use helpers::{ScriptedClient, app_with, get, json_body, offline_app, post_json};

const ARTICLE_PAGE: &str = include_str!("../src/extractor/tests/fixtures/article.html");

#[tokio::test]
async fn test_health_reports_provider() {
    let response = offline_app().oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await;
    assert_eq!(body, json!({"status": "OK", "provider": "disabled"}));
}

#[tokio::test]
async fn test_news_lists_samples_per_level() {
    let response = offline_app()
        .oneshot(get("/v1/news?level=beginner&real=true"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "People Meet to Help the Earth");
    assert_eq!(articles[0]["level"], "beginner");
    assert!(articles[0]["culturalContext"]["description"].as_str().unwrap().len() >= 200);
}

#[tokio::test]
async fn test_news_lookup() {
    let app = offline_app();

    let response = app.clone().oneshot(get("/v1/news/2?level=advanced")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["article"]["id"], "2");
    assert_eq!(body["article"]["title"], "Technology Advances in Artificial Intelligence");

    let response = app.oneshot(get("/v1/news/real-9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "Article not found"}));
}

#[tokio::test]
async fn test_fetch_article_requires_url() {
    let response = offline_app().oneshot(get("/v1/fetch-article")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "URL parameter is required"})
    );
}

#[tokio::test]
async fn test_fetch_article_extracts_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tides"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ARTICLE_PAGE)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let uri = format!("/v1/fetch-article?url={}/tides", server.uri());
    let response = offline_app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("Engineers in Lisbon spent the weekend"));
    assert!(!content.contains("Facebook"));
    assert_eq!(body["length"], content.chars().count());
    assert_eq!(body["language"], "en");
    assert_eq!(body["title"], "Coastal towns brace for record tides | The Harbour Post");
}

#[tokio::test]
async fn test_fetch_article_short_page_is_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/brief"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Too short.</p></body></html>")
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&server)
        .await;

    let uri = format!("/v1/fetch-article?url={}/brief", server.uri());
    let response = offline_app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "fallback": true,
            "message": "Could not extract full article content"
        })
    );
}

#[tokio::test]
async fn test_fetch_article_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let uri = format!("/v1/fetch-article?url={}/gone", server.uri());
    let response = offline_app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_quiz_from_inline_article() {
    let uri = "/v1/quiz?title=Trams&content=The%20council%20approved%20a%20tram%20line.&keywords=tram,council";
    let response = offline_app().oneshot(get(uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["id"], "quiz-1");
    assert_eq!(questions[0]["question"], "What does \"tram\" mean in this article?");
    assert_eq!(questions[0]["correctAnswer"], 0);
    assert_eq!(questions[1]["correctAnswer"], 1);
}

#[tokio::test]
async fn test_quiz_defaults_to_sample_article() {
    let response = offline_app().oneshot(get("/v1/quiz")).await.unwrap();

    let body = json_body(response).await;
    let words: Vec<_> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        words,
        vec!["climate", "renewable energy", "sustainable", "emissions", "fossil fuels"]
    );
}

#[tokio::test]
async fn test_quiz_rebalances_generated_answers() {
    let question = json!({
        "question": "What does \"tram\" mean?",
        "options": ["A rail vehicle", "A boat", "A plane", "A bike"],
        "correctAnswer": 0,
        "explanation": "A tram runs on rails.",
        "word": "tram"
    });
    let reply = json!({ "questions": vec![question; 4] }).to_string();
    let app = app_with(Arc::new(ScriptedClient::always(&reply)), None);

    let response = app
        .oneshot(get("/v1/quiz?title=Trams&content=Trams%20are%20back."))
        .await
        .unwrap();

    let body = json_body(response).await;
    let answers: Vec<_> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["correctAnswer"].as_u64().unwrap())
        .collect();
    assert_eq!(answers, vec![0, 1, 2, 3]);
    assert_eq!(body["questions"][2]["options"][2], "A rail vehicle");
}

#[tokio::test]
async fn test_rephrase() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(post_json("/v1/rephrase", json!({"text": "  "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"error": "Text is required"}));

    let response = app
        .oneshot(post_json("/v1/rephrase", json!({"text": "Show the plan."})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["fallback"], true);
    assert_eq!(body["advanced"], "Substantiate the strategy.");
}

#[tokio::test]
async fn test_rephrase_generated_has_no_flag() {
    let reply = r#"{"beginner": "Cats sleep.", "intermediate": "Cats often nap.", "advanced": "Felines habitually slumber."}"#;
    let app = app_with(Arc::new(ScriptedClient::always(reply)), None);

    let response = app
        .oneshot(post_json("/v1/rephrase", json!({"text": "Cats sleep a lot."})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "beginner": "Cats sleep.",
            "intermediate": "Cats often nap.",
            "advanced": "Felines habitually slumber."
        })
    );
}

#[tokio::test]
async fn test_writing_feedback() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(post_json("/v1/writing-feedback", json!({"level": "beginner"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/v1/writing-feedback",
            json!({"text": "I think it is good", "articleTitle": "Trams"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let feedback = &json_body(response).await["feedback"];
    assert_eq!(feedback["improved"], "I believe it is good.");
    assert!(feedback["grammar"]["score"].as_u64().unwrap() <= 100);
}

#[tokio::test]
async fn test_generate_question() {
    let app = app_with(
        Arc::new(ScriptedClient::always("Question: Should every city build trams?")),
        None,
    );

    let response = app
        .clone()
        .oneshot(post_json("/v1/generate-question", json!({"title": "Trams"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Title and content are required"})
    );

    let response = app
        .oneshot(post_json(
            "/v1/generate-question",
            json!({"title": "Trams", "content": "The council approved a tram line.", "level": "advanced"}),
        ))
        .await
        .unwrap();
    assert_eq!(
        json_body(response).await,
        json!({"question": "Should every city build trams?"})
    );
}

#[tokio::test]
async fn test_summary_and_cultural_context() {
    let reply = r#"{"summary": "A tram line was approved.", "keywords": ["tram"], "grammarPoints": ["Passive voice"], "title": "Culture", "description": "Different cultures have different views. This topic is important."}"#;
    let app = app_with(Arc::new(ScriptedClient::always(reply)), None);
    let article = json!({"title": "Trams", "content": "The council in Lyon approved a tram line on Monday."});

    let response = app
        .clone()
        .oneshot(post_json("/v1/summary", article.clone()))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["summary"], "A tram line was approved.");
    assert_eq!(body["grammarPoints"], json!(["Passive voice"]));

    let response = app
        .oneshot(post_json("/v1/cultural-context", article))
        .await
        .unwrap();
    let body = json_body(response).await;
    let description = body["description"].as_str().unwrap();
    assert!(description.len() >= 200);
    assert!(!description.contains("Different cultures"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = offline_app()
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["paths"]["/v1/fetch-article"].is_object());
}
