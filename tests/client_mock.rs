//! Integration tests for TuteliqClient against a mockito server.

mod common;

use common::mock_server::{MockServerFixture, TEST_API_KEY};
use mockito::Matcher;
use serde_json::json;
use std::time::{Duration, Instant};
use tuteliq::types::{
    AnalysisType, CreateWebhookInput, EmotionMessage, EmotionTrend, GroomingRisk, PolicyConfig,
    ReportMessage, RiskLevel, UpdateWebhookInput,
};
use tuteliq::types::policy::{BullyingPolicyConfig, ThresholdConfig};
use tuteliq::{
    AnalysisContext, AnalyzeEmotionsInput, AnalyzeInput, Audience, DetectGroomingInput,
    DetectionInput, ErrorKind, GenerateReportInput, GetActionPlanInput, GroomingMessage,
};

#[tokio::test]
async fn test_detect_bullying_posts_content_with_bearer_auth() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .match_header("x-client-request-id", Matcher::Any)
        .match_body(Matcher::Json(json!({
            "text": "test message",
            "context": {"platform": "chat"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "is_bullying": true,
                "bullying_type": ["verbal_abuse"],
                "confidence": 0.85,
                "severity": "medium",
                "rationale": "Test rationale",
                "recommended_action": "monitor",
                "risk_score": 0.7
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = fixture.client();
    let result = client
        .detect_bullying(DetectionInput::new("test message").with_context("chat"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(result.is_bullying);
    assert_eq!(result.bullying_type, vec!["verbal_abuse"]);
    assert_eq!(result.risk_score, 0.7);
}

#[tokio::test]
async fn test_structured_context_and_tracking_pass_through() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .match_body(Matcher::Json(json!({
            "text": "hello",
            "context": {"ageGroup": "11-13", "relationship": "classmates"},
            "external_id": "msg-42",
            "metadata": {"room": "general"}
        })))
        .with_status(200)
        .with_body(r#"{"is_bullying": false, "external_id": "msg-42"}"#)
        .create_async()
        .await;

    let mut metadata = serde_json::Map::new();
    metadata.insert("room".into(), json!("general"));
    let input = DetectionInput::new("hello")
        .with_context(AnalysisContext {
            age_group: Some("11-13".into()),
            relationship: Some("classmates".into()),
            ..Default::default()
        })
        .with_external_id("msg-42")
        .with_metadata(metadata);

    let result = fixture.client().detect_bullying(input).await.unwrap();
    mock.assert_async().await;
    assert_eq!(result.external_id.as_deref(), Some("msg-42"));
}

#[tokio::test]
async fn test_detect_grooming_transforms_messages() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/safety/grooming")
        .match_body(Matcher::Json(json!({
            "messages": [
                {"sender_role": "adult", "text": "Keep this secret"},
                {"sender_role": "child", "text": "Ok"}
            ],
            "context": {"child_age": 12}
        })))
        .with_status(200)
        .with_body(
            json!({
                "grooming_risk": "high",
                "confidence": 0.9,
                "flags": ["secret_keeping"],
                "rationale": "Test rationale",
                "risk_score": 0.85,
                "recommended_action": "immediate_review"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let input = DetectGroomingInput::new(vec![
        GroomingMessage::adult("Keep this secret"),
        GroomingMessage::child("Ok"),
    ])
    .with_child_age(12);
    let result = fixture.client().detect_grooming(input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.grooming_risk, GroomingRisk::High);
    assert_eq!(result.flags, vec!["secret_keeping"]);
}

#[tokio::test]
async fn test_detect_unsafe() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/unsafe",
            json!({
                "unsafe": true,
                "categories": ["self_harm"],
                "severity": "critical",
                "confidence": 0.95,
                "risk_score": 0.9,
                "rationale": "Test rationale",
                "recommended_action": "immediate_intervention"
            }),
        )
        .await;

    let result = fixture
        .client()
        .detect_unsafe(DetectionInput::new("harmful content"))
        .await
        .unwrap();
    assert!(result.is_unsafe);
    assert!(result.categories.contains(&"self_harm".to_string()));
}

#[tokio::test]
async fn test_analyze_simple_string_is_safe() {
    let mut fixture = MockServerFixture::new().await;
    let _b = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/bullying",
            json!({"is_bullying": false, "risk_score": 0.1}),
        )
        .await;
    let _u = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/unsafe",
            json!({"unsafe": false, "risk_score": 0.1}),
        )
        .await;

    let result = fixture.client().analyze("test message").await.unwrap();
    assert_eq!(result.risk_level, RiskLevel::Safe);
    assert!(result.risk_score < 0.3);
    assert_eq!(result.summary, "No safety concerns detected.");
}

#[tokio::test]
async fn test_analyze_combines_results() {
    let mut fixture = MockServerFixture::new().await;
    let _b = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/bullying",
            json!({
                "is_bullying": true,
                "severity": "high",
                "risk_score": 0.8,
                "recommended_action": "flag_for_moderator"
            }),
        )
        .await;
    let _u = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/unsafe",
            json!({"unsafe": false, "categories": [], "risk_score": 0.2, "recommended_action": "none"}),
        )
        .await;

    let result = fixture.client().analyze("test message").await.unwrap();
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.risk_score, 0.8);
    assert!(result.summary.contains("Bullying detected"));
    assert_eq!(result.recommended_action, "flag_for_moderator");
}

#[tokio::test]
async fn test_analyze_critical_and_include_subset() {
    let mut fixture = MockServerFixture::new().await;
    let _b = fixture
        .mock_json(
            "POST",
            "/api/v1/safety/bullying",
            json!({"is_bullying": true, "severity": "critical", "risk_score": 0.95}),
        )
        .await;
    let unsafe_mock = fixture
        .server
        .mock("POST", "/api/v1/safety/unsafe")
        .expect(0)
        .create_async()
        .await;

    let client = fixture.client();
    let result = client
        .analyze(AnalyzeInput::new("test").with_include(vec![AnalysisType::Bullying]))
        .await
        .unwrap();

    unsafe_mock.assert_async().await;
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert!(result.unsafe_content.is_none());
}

#[tokio::test]
async fn test_analyze_emotions_shapes_content_and_history() {
    let mut fixture = MockServerFixture::new().await;
    let single = fixture
        .server
        .mock("POST", "/api/v1/analysis/emotions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [{"sender": "user", "text": "I feel stressed"}]
        })))
        .with_status(200)
        .with_body(
            json!({
                "dominant_emotions": ["anxiety", "stress"],
                "emotion_scores": {"anxiety": 0.8, "stress": 0.7},
                "trend": "worsening",
                "summary": "Test summary",
                "recommended_followup": "Test followup"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let history = fixture
        .server
        .mock("POST", "/api/v1/analysis/emotions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                {"sender": "child", "text": "I feel sad"},
                {"sender": "child", "text": "Very sad"}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"dominant_emotions": ["sadness"], "trend": "stable"}"#)
        .create_async()
        .await;

    let client = fixture.client();
    let result = client
        .analyze_emotions(AnalyzeEmotionsInput::from_content("I feel stressed"))
        .await
        .unwrap();
    assert!(result.dominant_emotions.contains(&"anxiety".to_string()));
    assert_eq!(result.trend, EmotionTrend::Worsening);

    let result = client
        .analyze_emotions(AnalyzeEmotionsInput::from_messages(vec![
            EmotionMessage::new("child", "I feel sad"),
            EmotionMessage::new("child", "Very sad"),
        ]))
        .await
        .unwrap();
    assert_eq!(result.dominant_emotions, vec!["sadness"]);

    single.assert_async().await;
    history.assert_async().await;
}

#[tokio::test]
async fn test_action_plan_role_defaults_to_parent() {
    let mut fixture = MockServerFixture::new().await;
    let child = fixture
        .server
        .mock("POST", "/api/v1/guidance/action-plan")
        .match_body(Matcher::Json(json!({
            "situation": "Someone is bullying me",
            "role": "child",
            "child_age": 12
        })))
        .with_status(200)
        .with_body(
            json!({
                "audience": "child",
                "steps": ["Step 1", "Step 2"],
                "tone": "supportive",
                "reading_level": "grade_5"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let parent = fixture
        .server
        .mock("POST", "/api/v1/guidance/action-plan")
        .match_body(Matcher::Json(json!({"situation": "test", "role": "parent"})))
        .with_status(200)
        .with_body(r#"{"audience": "parent", "steps": [], "tone": "calm"}"#)
        .create_async()
        .await;

    let client = fixture.client();
    let plan = client
        .get_action_plan(
            GetActionPlanInput::new("Someone is bullying me")
                .with_child_age(12)
                .with_audience(Audience::Child),
        )
        .await
        .unwrap();
    assert_eq!(plan.audience, "child");
    assert_eq!(plan.steps.len(), 2);

    client
        .get_action_plan(GetActionPlanInput::new("test"))
        .await
        .unwrap();

    child.assert_async().await;
    parent.assert_async().await;
}

#[tokio::test]
async fn test_generate_report() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/reports/incident")
        .match_body(Matcher::Json(json!({
            "messages": [
                {"sender": "user1", "text": "Harmful message"},
                {"sender": "child", "text": "Stop"}
            ],
            "meta": {"child_age": 14}
        })))
        .with_status(200)
        .with_body(
            json!({
                "summary": "Incident summary",
                "risk_level": "medium",
                "categories": ["bullying"],
                "recommended_next_steps": ["Document", "Contact parent"]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let report = fixture
        .client()
        .generate_report(
            GenerateReportInput::new(vec![
                ReportMessage::new("user1", "Harmful message"),
                ReportMessage::new("child", "Stop"),
            ])
            .with_child_age(14),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(report.summary, "Incident summary");
    assert_eq!(report.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn test_policy_get_and_set() {
    let mut fixture = MockServerFixture::new().await;
    let get = fixture
        .mock_json(
            "GET",
            "/api/v1/policy",
            json!({"success": true, "config": {"bullying": {"enabled": true}}}),
        )
        .await;
    let put = fixture
        .server
        .mock("PUT", "/api/v1/policy")
        .match_body(Matcher::Json(json!({
            "bullying": {"enabled": true, "minRiskScoreToFlag": 0.5}
        })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = fixture.client();
    let policy = client.get_policy().await.unwrap();
    assert!(policy.success);
    assert_eq!(
        policy.config.and_then(|c| c.bullying).and_then(|b| b.thresholds.enabled),
        Some(true)
    );

    let update = PolicyConfig {
        bullying: Some(BullyingPolicyConfig {
            thresholds: ThresholdConfig {
                enabled: Some(true),
                min_risk_score_to_flag: Some(0.5),
                ..Default::default()
            },
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(client.set_policy(&update).await.unwrap().success);

    get.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn test_webhook_lifecycle() {
    let mut fixture = MockServerFixture::new().await;
    let create = fixture
        .server
        .mock("POST", "/api/v1/webhooks")
        .match_body(Matcher::PartialJson(json!({
            "name": "alerts",
            "url": "https://example.com/hook",
            "events": ["safety.critical"]
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "wh_1",
                "name": "alerts",
                "url": "https://example.com/hook",
                "secret": "whsec_abc",
                "events": ["safety.critical"],
                "is_active": true,
                "created_at": "2026-01-01T00:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let update = fixture
        .server
        .mock("PATCH", "/api/v1/webhooks/wh_1")
        .match_body(Matcher::Json(json!({"is_active": false})))
        .with_status(200)
        .with_body(
            json!({
                "id": "wh_1",
                "name": "alerts",
                "url": "https://example.com/hook",
                "events": ["safety.critical"],
                "is_active": false,
                "updated_at": "2026-01-02T00:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let test = fixture
        .mock_json(
            "POST",
            "/api/v1/webhooks/wh_1/test",
            json!({"success": true, "status_code": 200, "latency_ms": 42}),
        )
        .await;
    let rotate = fixture
        .mock_json(
            "POST",
            "/api/v1/webhooks/wh_1/regenerate-secret",
            json!({"secret": "whsec_new"}),
        )
        .await;
    let delete = fixture
        .mock_json(
            "DELETE",
            "/api/v1/webhooks/wh_1",
            json!({"success": true, "message": "Webhook deleted"}),
        )
        .await;

    let client = fixture.client();
    let created = client
        .create_webhook(&CreateWebhookInput::new(
            "alerts",
            "https://example.com/hook",
            ["safety.critical"],
        ))
        .await
        .unwrap();
    assert_eq!(created.secret, "whsec_abc");

    let updated = client
        .update_webhook(
            &created.id,
            &UpdateWebhookInput {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);

    let tested = client.test_webhook(&created.id).await.unwrap();
    assert_eq!(tested.status_code, 200);
    assert_eq!(
        client.regenerate_webhook_secret(&created.id).await.unwrap().secret,
        "whsec_new"
    );
    assert!(client.delete_webhook(&created.id).await.unwrap().success);

    for mock in [create, update, test, rotate, delete] {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_webhook_input_is_validated_locally() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/webhooks")
        .expect(0)
        .create_async()
        .await;

    let client = fixture.client();
    let err = client
        .create_webhook(&CreateWebhookInput::new(
            "alerts",
            "http://example.com/hook",
            ["safety.critical"],
        ))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .create_webhook(&CreateWebhookInput::new(
            "alerts",
            "https://example.com/hook",
            Vec::<String>::new(),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_pricing_and_account_endpoints() {
    let mut fixture = MockServerFixture::new().await;
    let _pricing = fixture
        .mock_json(
            "GET",
            "/api/v1/pricing",
            json!({"plans": [{
                "name": "Starter",
                "price": "$29/mo",
                "period": "month",
                "description": "For small teams",
                "features": ["10k messages"],
                "is_popular": false,
                "cta": "Start",
                "cta_link": "https://tuteliq.ai/signup"
            }]}),
        )
        .await;
    let _details = fixture
        .mock_json(
            "GET",
            "/api/v1/pricing/details",
            json!({"plans": [{
                "id": "pro",
                "name": "Pro",
                "tier": "pro",
                "description": "For platforms",
                "price_monthly": 99.0,
                "price_yearly": 990.0,
                "api_calls_per_month": 100000,
                "rate_limit": 600,
                "features": [],
                "is_popular": true
            }]}),
        )
        .await;
    let _export = fixture
        .mock_json(
            "GET",
            "/api/v1/account/export",
            json!({"userId": "u1", "exportedAt": "2026-01-01T00:00:00Z", "data": {"requests": [{"id": 1}]}}),
        )
        .await;
    let _erase = fixture
        .mock_json(
            "DELETE",
            "/api/v1/account/data",
            json!({"message": "All data deleted", "deleted_count": 12}),
        )
        .await;

    let client = fixture.client();
    assert_eq!(client.get_pricing().await.unwrap().plans[0].name, "Starter");
    let details = client.get_pricing_details().await.unwrap();
    assert_eq!(details.plans[0].rate_limit, 600);
    assert!(details.plans[0].is_popular);
    let export = client.export_account_data().await.unwrap();
    assert_eq!(export.user_id, "u1");
    assert_eq!(export.data["requests"].len(), 1);
    assert_eq!(client.delete_account_data().await.unwrap().deleted_count, 12);
}

#[tokio::test]
async fn test_http_status_maps_to_error_kind() {
    let cases = [
        (401, ErrorKind::Authentication, r#"{"error":{"message":"Invalid API key"}}"#),
        (429, ErrorKind::RateLimitExceeded, r#"{"error":{"message":"Rate limit exceeded"}}"#),
        (400, ErrorKind::Validation, r#"{"error":{"message":"Invalid input"}}"#),
        (500, ErrorKind::Server, r#"{"error":{"message":"Server error"}}"#),
        (403, ErrorKind::TierAccessRestricted, r#"{"error":{"code":"TIER_ACCESS_DENIED"}}"#),
        (404, ErrorKind::NotFound, "{}"),
        (429, ErrorKind::QuotaExceeded, r#"{"error":{"code":"QUOTA_EXCEEDED","message":"Monthly limit reached"}}"#),
    ];

    for (status, kind, body) in cases {
        let mut fixture = MockServerFixture::new().await;
        let _mock = fixture
            .mock_error("POST", "/api/v1/safety/bullying", status, body)
            .await;
        let err = fixture
            .client()
            .detect_bullying(DetectionInput::new("test"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), kind, "HTTP {} should map to {}", status, kind);
    }
}

#[tokio::test]
async fn test_error_meta_is_exposed() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error(
            "POST",
            "/api/v1/safety/grooming",
            403,
            r#"{"error":{"code":"TIER_ACCESS_DENIED","message":"Grooming detection requires Pro","suggestion":"Upgrade your plan","links":{"upgrade":"https://tuteliq.ai/pricing"}}}"#,
        )
        .await;

    let err = fixture
        .client()
        .detect_grooming(DetectGroomingInput::new(vec![GroomingMessage::child("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TierAccessRestricted);
    assert_eq!(err.message(), "Grooming detection requires Pro");
    assert_eq!(err.code(), Some("TIER_ACCESS_DENIED"));
    assert_eq!(err.suggestion(), Some("Upgrade your plan"));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let client = tuteliq::TuteliqClient::builder()
        .api_key(TEST_API_KEY)
        .base_url("http://127.0.0.1:1")
        .retries(0)
        .build()
        .unwrap();
    let err = client
        .detect_bullying(DetectionInput::new("test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_network() {
    let mut fixture = MockServerFixture::new().await;
    let bullying = fixture
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = fixture.client();

    let err = client.detect_bullying(DetectionInput::new("")).await.unwrap_err();
    assert!(err.message().contains("Content is required"));

    let err = client
        .detect_bullying(DetectionInput::new("a".repeat(60_000)))
        .await
        .unwrap_err();
    assert!(err.message().contains("exceeds maximum length"));

    let err = client
        .detect_grooming(DetectGroomingInput::new(vec![]))
        .await
        .unwrap_err();
    assert!(err.message().contains("cannot be empty"));

    let err = client
        .detect_grooming(DetectGroomingInput::new(vec![GroomingMessage::child("test"); 150]))
        .await
        .unwrap_err();
    assert!(err.message().contains("exceeds maximum count"));

    let err = client
        .analyze_emotions(AnalyzeEmotionsInput::default())
        .await
        .unwrap_err();
    assert!(err.message().contains("Either content or messages is required"));

    let err = client
        .get_action_plan(GetActionPlanInput::new(""))
        .await
        .unwrap_err();
    assert!(err.message().contains("Situation description is required"));

    let err = client
        .detect_unsafe(DetectionInput::new("ok").with_external_id("x".repeat(300)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!err.is_retryable());

    bullying.assert_async().await;
}

#[tokio::test]
async fn test_usage_headers_are_captured() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .with_status(200)
        .with_header("x-monthly-limit", "10000")
        .with_header("x-monthly-used", "5000")
        .with_header("x-monthly-remaining", "5000")
        .with_header("x-ratelimit-limit", "1000")
        .with_header("x-ratelimit-remaining", "999")
        .with_header("x-request-id", "req_123")
        .with_body(r#"{"is_bullying": false}"#)
        .create_async()
        .await;

    let client = fixture.client();
    assert!(client.usage().is_none());
    client
        .detect_bullying(DetectionInput::new("test"))
        .await
        .unwrap();

    let usage = client.usage().unwrap();
    assert_eq!((usage.limit, usage.used, usage.remaining), (10000, 5000, 5000));
    let rate = client.rate_limit().unwrap();
    assert_eq!((rate.limit, rate.remaining, rate.reset), (1000, 999, None));
    assert_eq!(client.last_request_id().as_deref(), Some("req_123"));
    assert!(client.last_latency_ms().is_some());
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let mut fixture = MockServerFixture::new().await;
    let failing = fixture
        .server
        .mock("POST", "/api/v1/safety/unsafe")
        .with_status(503)
        .with_body(r#"{"error":{"message":"Service unavailable"}}"#)
        .expect(1)
        .create_async()
        .await;
    let ok = fixture
        .server
        .mock("POST", "/api/v1/safety/unsafe")
        .with_status(200)
        .with_body(r#"{"unsafe": false, "risk_score": 0.05}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fixture
        .builder()
        .retries(2)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let result = client
        .detect_unsafe(DetectionInput::new("fine"))
        .await
        .unwrap();
    assert!(!result.is_unsafe);

    failing.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_retry_after_is_honored() {
    let mut fixture = MockServerFixture::new().await;
    let limited = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .with_status(429)
        .with_header("retry-after", "1")
        .with_body(r#"{"error":{"message":"Slow down"}}"#)
        .expect(1)
        .create_async()
        .await;
    let ok = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .with_status(200)
        .with_body(r#"{"is_bullying": false}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fixture
        .builder()
        .retries(1)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let start = Instant::now();
    client
        .detect_bullying(DetectionInput::new("test"))
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_secs(1));

    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_non_retryable_error_is_not_retried() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API key"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fixture
        .builder()
        .retries(3)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let err = client
        .detect_bullying(DetectionInput::new("test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unexpected_client_status_is_not_retried() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/safety/bullying")
        .with_status(409)
        .with_body(r#"{"error":{"message":"Conflict"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fixture
        .builder()
        .retries(3)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let err = client
        .detect_bullying(DetectionInput::new("test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status_code(), Some(409));
    assert!(!err.is_retryable());
    mock.assert_async().await;
}
