mod test_utils;

use serde_json::{Value, json};
use std::sync::Arc;
use storyteller_error::{GenerationErrorKind, RetrievalErrorKind};
use storyteller_webhook::{
    Endpoint, EndpointConfig, EndpointMode, EnvelopeFormat, FallbackMessages, FallbackOverrides,
    FieldSpec, Outcome, WebhookMetrics,
};
use test_utils::{MockGenerator, MockRetriever, RetrieverBehavior, story};

fn story_search() -> EndpointConfig {
    EndpointConfig::new("/query", EndpointMode::Search).with_fields(vec![
        FieldSpec::new("sessionInfo.parameters.protagonist"),
        FieldSpec::new("sessionInfo.parameters.theme"),
        FieldSpec::new("sessionInfo.parameters.moral"),
    ])
}

fn generate_story() -> EndpointConfig {
    EndpointConfig::new("/generate_story", EndpointMode::Generate)
        .with_fields(vec![FieldSpec::new("word").with_default("an adventure")])
        .with_envelope(EnvelopeFormat::KeyValue {
            key: "story".to_string(),
        })
        .with_prompt("Tell a short children's story about {word}".to_string())
        .with_messages(FallbackOverrides {
            generation_failed: Some("Error: unable to generate story.".to_string()),
            internal: Some("Error processing request.".to_string()),
            ..Default::default()
        })
}

fn recommend() -> EndpointConfig {
    EndpointConfig::new("/recommend", EndpointMode::Recommend)
        .with_fields(vec![FieldSpec::new("queryResult.queryText")])
        .with_envelope(EnvelopeFormat::KeyValue {
            key: "fulfillmentText".to_string(),
        })
        .with_prompt("Tell me a story about {query}".to_string())
}

fn bind(config: EndpointConfig, retriever: &MockRetriever, generator: &MockGenerator) -> Endpoint {
    Endpoint::new(
        config,
        &FallbackMessages::default(),
        Arc::new(retriever.clone()),
        Arc::new(generator.clone()),
        WebhookMetrics::new(),
    )
}

fn fulfillment_text(body: &Value) -> &str {
    body["fulfillment_response"]["messages"][0]["text"]["text"][0]
        .as_str()
        .unwrap_or_default()
}

fn abc() -> Value {
    json!({"sessionInfo": {"parameters": {"protagonist": "A", "theme": "B", "moral": "C"}}})
}

#[tokio::test]
async fn test_empty_payload_asks_for_clarification_without_searching() -> anyhow::Result<()> {
    let retriever = MockRetriever::with_stories(vec![story("Unused", "unused")]);
    let generator = MockGenerator::echo();
    let endpoint = bind(story_search(), &retriever, &generator);

    let body = endpoint.handle(&json!({})).await;

    assert_eq!(
        fulfillment_text(&body),
        FallbackMessages::default().clarification
    );
    assert_eq!(retriever.call_count(), 0);
    assert_eq!(generator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_search_is_called_once_with_query_and_limit() -> anyhow::Result<()> {
    let retriever = MockRetriever::with_stories(vec![story("Knight", "The brave knight.")]);
    let generator = MockGenerator::echo();
    let endpoint = bind(story_search(), &retriever, &generator);

    let body = endpoint.handle(&abc()).await;

    assert_eq!(fulfillment_text(&body), "The brave knight.");
    assert_eq!(retriever.calls(), vec![("A B C".to_string(), 3)]);
    assert_eq!(generator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_documents_are_joined_and_capped_at_limit() -> anyhow::Result<()> {
    let retriever = MockRetriever::with_stories(vec![
        story("One", "first"),
        story("Blank", "   "),
        story("Two", "second"),
        story("Three", "third"),
    ]);
    let config = story_search()
        .with_limit(2)
        .with_prefix("Here are some stories: ".to_string())
        .with_separator(", ".to_string());
    let endpoint = bind(config, &retriever, &MockGenerator::echo());

    let body = endpoint.handle(&abc()).await;

    assert_eq!(
        fulfillment_text(&body),
        "Here are some stories: first, second"
    );
    assert_eq!(retriever.calls()[0].1, 2);
    Ok(())
}

#[tokio::test]
async fn test_zero_results_differs_from_unavailable() -> anyhow::Result<()> {
    let defaults = FallbackMessages::default();

    let empty = MockRetriever::with_stories(Vec::new());
    let endpoint = bind(story_search(), &empty, &MockGenerator::echo());
    let nothing = endpoint.handle(&abc()).await;
    assert_eq!(fulfillment_text(&nothing), defaults.nothing_found);

    let blank = MockRetriever::with_stories(vec![story("Blank", "")]);
    let endpoint = bind(story_search(), &blank, &MockGenerator::echo());
    let blank_body = endpoint.handle(&abc()).await;
    assert_eq!(fulfillment_text(&blank_body), defaults.nothing_found);

    let down = MockRetriever::failing(RetrievalErrorKind::Connect("connection refused".into()));
    let endpoint = bind(story_search(), &down, &MockGenerator::echo());
    let unavailable = endpoint.handle(&abc()).await;
    assert_eq!(fulfillment_text(&unavailable), defaults.unavailable);
    assert_ne!(defaults.nothing_found, defaults.unavailable);
    assert_eq!(down.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_error_detail_is_not_sent_to_caller() -> anyhow::Result<()> {
    let retriever = MockRetriever::failing(RetrievalErrorKind::Status {
        status_code: 500,
        message: "secret stack trace".to_string(),
    });
    let endpoint = bind(story_search(), &retriever, &MockGenerator::echo());

    let body = endpoint.handle(&abc()).await;
    assert!(!body.to_string().contains("secret"));
    Ok(())
}

#[tokio::test]
async fn test_generate_story_for_word() -> anyhow::Result<()> {
    let retriever = MockRetriever::with_stories(Vec::new());
    let generator = MockGenerator::echo();
    let endpoint = bind(generate_story(), &retriever, &generator);

    let body = endpoint.handle(&json!({"word": "dragon"})).await;

    assert_eq!(
        body,
        json!({"story": "Story: Tell a short children's story about dragon"})
    );
    assert_eq!(
        generator.prompts(),
        vec!["Tell a short children's story about dragon".to_string()]
    );
    assert_eq!(retriever.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_generate_story_uses_default_word() -> anyhow::Result<()> {
    let generator = MockGenerator::echo();
    let endpoint = bind(generate_story(), &MockRetriever::with_stories(Vec::new()), &generator);

    endpoint.handle(&Value::Null).await;

    assert_eq!(
        generator.prompts(),
        vec!["Tell a short children's story about an adventure".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_generate_story_without_credential() -> anyhow::Result<()> {
    let generator =
        MockGenerator::failing(GenerationErrorKind::MissingCredential("OPENAI_API_KEY".into()));
    let endpoint = bind(generate_story(), &MockRetriever::with_stories(Vec::new()), &generator);

    let body = endpoint.handle(&json!({"word": "dragon"})).await;

    assert_eq!(body, json!({"story": "Error: unable to generate story."}));
    Ok(())
}

#[tokio::test]
async fn test_blank_reply_counts_as_failure() -> anyhow::Result<()> {
    let generator = MockGenerator::replying("  \n ");
    let endpoint = bind(generate_story(), &MockRetriever::with_stories(Vec::new()), &generator);

    assert_eq!(
        endpoint.run(&json!({"word": "dragon"})).await,
        Outcome::GenerationFailed
    );
    Ok(())
}

#[tokio::test]
async fn test_recommend_summarizes_nearest_story() -> anyhow::Result<()> {
    let long_text = "x".repeat(800);
    let retriever = MockRetriever::with_stories(vec![
        story("The Brave Knight", &long_text),
        story("The Dragon", "The dragon slept."),
    ]);
    let generator = MockGenerator::replying("A knight learns courage.");
    let endpoint = bind(recommend(), &retriever, &generator);

    let body = endpoint
        .handle(&json!({"queryResult": {"queryText": "a story about knights"}}))
        .await;

    assert_eq!(
        body,
        json!({"fulfillmentText": "I have a story called 'The Brave Knight'. Here's a brief summary: A knight learns courage."})
    );
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        format!("Summarize this story in 1-2 sentences: {}", "x".repeat(500))
    );
    Ok(())
}

#[tokio::test]
async fn test_recommend_writes_new_story_when_nothing_matches() -> anyhow::Result<()> {
    let retriever = MockRetriever::with_stories(Vec::new());
    let generator = MockGenerator::echo();
    let endpoint = bind(recommend(), &retriever, &generator);

    let body = endpoint
        .handle(&json!({"queryResult": {"queryText": "space pirates"}}))
        .await;

    assert_eq!(
        body,
        json!({"fulfillmentText": "Story: Tell me a story about space pirates"})
    );
    assert_eq!(retriever.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_recommend_reports_unavailable_database() -> anyhow::Result<()> {
    let retriever = MockRetriever::failing(RetrievalErrorKind::Timeout(10_000));
    let generator = MockGenerator::echo();
    let endpoint = bind(recommend(), &retriever, &generator);

    let outcome = endpoint
        .run(&json!({"queryResult": {"queryText": "space pirates"}}))
        .await;

    assert_eq!(outcome, Outcome::Unavailable);
    assert_eq!(generator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_panic_is_answered_with_internal_sentence() -> anyhow::Result<()> {
    let retriever = MockRetriever::new(RetrieverBehavior::Panic);
    let metrics = WebhookMetrics::new();
    let endpoint = Endpoint::new(
        story_search(),
        &FallbackMessages::default(),
        Arc::new(retriever),
        Arc::new(MockGenerator::echo()),
        metrics.clone(),
    );

    let body = endpoint.handle(&abc()).await;

    assert_eq!(fulfillment_text(&body), FallbackMessages::default().internal);
    assert_eq!(metrics.snapshot().internal_errors, 1);
    Ok(())
}

#[tokio::test]
async fn test_metrics_count_outcomes() -> anyhow::Result<()> {
    let metrics = WebhookMetrics::new();
    let endpoint = Endpoint::new(
        story_search(),
        &FallbackMessages::default(),
        Arc::new(MockRetriever::with_stories(vec![story("Knight", "The brave knight.")])),
        Arc::new(MockGenerator::echo()),
        metrics.clone(),
    );

    endpoint.handle(&abc()).await;
    endpoint.handle(&abc()).await;
    endpoint.handle(&json!({})).await;

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests, 3);
    assert_eq!(snapshot.answered, 2);
    assert_eq!(snapshot.clarifications, 1);
    assert_eq!(snapshot.seconds_since_answer, Some(0));
    assert!((snapshot.answer_rate - 2.0 / 3.0).abs() < 1e-9);
    Ok(())
}
