//! Feature endpoints driven through the full router.

mod common;

use serde_json::json;
use std::sync::Arc;

use ai_service::config::Config;
use ai_service::AppState;
use common::{delete, get, post_json, test_app, CannedLLM};

#[tokio::test]
async fn health_reports_provider() {
    let app = test_app(Arc::new(CannedLLM::default()));
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["llm_provider"], "canned");
}

#[tokio::test]
async fn service_info_reports_configured_limits() {
    let mut config = Config::default();
    config.translation.max_text_length = 1234;
    config.chatbot.max_sessions = 42;
    let app = ai_service::app(AppState::with_llm(config, Arc::new(CannedLLM::default())));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, 200);
    let limits = &body["data"]["limits"];
    assert_eq!(limits["max_text_length"], 1234);
    assert_eq!(limits["max_sessions"], 42);
    assert_eq!(limits["max_message_length"], 2000);
    assert_eq!(body["data"]["llm_model"], "gpt-4o-mini");
}

#[tokio::test]
async fn languages_payload_lists_catalog() {
    let app = test_app(Arc::new(CannedLLM::default()));
    let (_, body) = get(&app, "/translation/languages").await;

    let languages = body["data"]["languages"].as_array().unwrap();
    assert!(languages.iter().any(|l| l["code"] == "ko" && l["name"] == "Korean"));
    assert!(languages.iter().all(|l| l.get("flag").is_some()));

    let types: Vec<_> = body["data"]["translation_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, vec!["general", "resume", "interview"]);
}

#[tokio::test]
async fn categories_payload_lists_catalog() {
    let app = test_app(Arc::new(CannedLLM::default()));
    let (_, body) = get(&app, "/chatbot/categories").await;
    let ids: Vec<_> = body["data"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert!(ids.contains(&"interview".to_string()));
    assert!(ids.contains(&"general".to_string()));
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = test_app(Arc::new(CannedLLM::default()));
    let (status, body) = get(&app, "/translation/nope").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn translate_round_trip() {
    let llm = Arc::new(CannedLLM::new(["I am a backend developer with five years of experience."]));
    let app = test_app(llm.clone());

    let (status, body) = post_json(
        &app,
        "/translation/translate",
        json!({
            "text": "저는 5년 경력의 백엔드 개발자입니다.",
            "sourceLanguage": "ko",
            "targetLanguage": "en",
            "type": "resume"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let translation = &body["data"]["translation"];
    assert_eq!(
        translation["translated_text"],
        "I am a backend developer with five years of experience."
    );
    assert_eq!(translation["type"], "resume");
    assert_eq!(llm.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn translate_validation_errors() {
    let app = test_app(Arc::new(CannedLLM::default()));

    let (status, body) = post_json(
        &app,
        "/translation/translate",
        json!({"text": "   ", "source_language": "ko", "target_language": "en"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, body) = post_json(
        &app,
        "/translation/translate",
        json!({"text": "hello", "source_language": "en", "target_language": "xx"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Unsupported language: xx");
}

#[tokio::test]
async fn translate_upstream_failure_is_bad_gateway() {
    // no canned replies left means the model call fails
    let app = test_app(Arc::new(CannedLLM::default()));
    let (status, body) = post_json(
        &app,
        "/translation/translate",
        json!({"text": "hello", "source_language": "en", "target_language": "ko"}),
    )
    .await;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn evaluate_returns_scores() {
    let reply = r#"{"accuracy":{"score":8,"comment":"good"},"fluency":{"score":7},
        "consistency":{"score":8},"cultural_appropriateness":{"score":7},
        "completeness":{"score":9},"overall_comment":"Fine","strengths":["clear"],"improvements":[]}"#;
    let app = test_app(Arc::new(CannedLLM::new([reply])));

    let (status, body) = post_json(
        &app,
        "/translation/evaluate",
        json!({
            "original": "감사합니다",
            "translated": "Thank you",
            "sourceLanguage": "ko",
            "targetLanguage": "en"
        }),
    )
    .await;

    assert_eq!(status, 200);
    let evaluation = &body["data"]["evaluation"];
    assert_eq!(evaluation["overall_score"], 78);
    assert_eq!(evaluation["grade"], "B");
    assert_eq!(evaluation["accuracy"]["comment"], "good");
}

#[tokio::test]
async fn chat_session_lifecycle() {
    let llm = Arc::new(CannedLLM::new([
        "Use the STAR method.",
        "Situation, Task, Action, Result.",
    ]));
    let app = test_app(llm.clone());

    let (status, body) = post_json(
        &app,
        "/chatbot/chat",
        json!({"message": "How should I answer behavioural questions?", "category": "interview"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["response"], "Use the STAR method.");
    let session_id = body["data"]["session_id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &app,
        "/chatbot/chat",
        json!({"message": "What does STAR stand for?", "sessionId": session_id}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["category"], "interview");
    assert_eq!(llm.prompts.lock().unwrap()[1].len(), 3);

    let path = format!("/chatbot/sessions/{}", session_id);
    let (status, body) = get(&app, &path).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["messages"][0]["role"], "user");

    let (status, _) = delete(&app, &path).await;
    assert_eq!(status, 200);

    let (status, body) = get(&app, &path).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn chat_with_unknown_session_is_not_found() {
    let app = test_app(Arc::new(CannedLLM::new(["unused"])));
    let (status, _) = post_json(
        &app,
        "/chatbot/chat",
        json!({"message": "hi", "session_id": "00000000-0000-0000-0000-000000000000"}),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = test_app(Arc::new(CannedLLM::default()));
    let (status, _) = post_json(&app, "/chatbot/chat", json!({"text": "missing message field"})).await;
    assert!((400..500).contains(&status));
}
