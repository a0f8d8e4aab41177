//! Tests for the narrative client against a mock HTTP server.

use dq_engine::{ColumnKpi, KpiSummary};
use dq_narrative::{NarrativeClient, NarrativeConfig, NarrativeError};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

fn summary() -> KpiSummary {
    KpiSummary {
        overall_completeness_before: 0.75,
        overall_completeness_after: 1.0,
        total_violations: 3,
    }
}

fn column_kpis() -> Vec<ColumnKpi> {
    vec![ColumnKpi {
        column_name: "city".to_string(),
        null_count_before: 1,
        null_count_after: 0,
        null_percent_before: 25.0,
        null_percent_after: 0.0,
        violation_count: 1,
    }]
}

#[tokio::test]
async fn test_generate_posts_question_and_reads_answer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/answerQuestion")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .match_body(Matcher::PartialJson(json!({
            "plot": false,
            "markdown_response": true,
            "verbose": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r###"{"answer": "## Data quality improved"}"###)
        .create_async()
        .await;

    let config = NarrativeConfig::new(server.url()).with_credentials("user", "pass");
    let client = NarrativeClient::from_config(config).unwrap();

    let narrative = client.generate(&summary(), &column_kpis()).await;

    mock.assert_async().await;
    assert_eq!(narrative, Some("## Data quality improved".to_string()));
}

#[tokio::test]
async fn test_generate_falls_back_to_response_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/answerQuestion")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "fallback"}"#)
        .create_async()
        .await;

    let client = NarrativeClient::from_config(NarrativeConfig::new(server.url())).unwrap();

    assert_eq!(
        client.generate(&summary(), &column_kpis()).await,
        Some("fallback".to_string())
    );
}

#[tokio::test]
async fn test_question_contains_kpis() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/answerQuestion")
        .match_body(Matcher::Regex("total_violations".to_string()))
        .with_status(200)
        .with_body(r#"{"answer": "ok"}"#)
        .create_async()
        .await;

    let client = NarrativeClient::from_config(NarrativeConfig::new(server.url())).unwrap();
    client.generate(&summary(), &column_kpis()).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_yields_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/answerQuestion")
        .with_status(500)
        .create_async()
        .await;

    let client = NarrativeClient::from_config(NarrativeConfig::new(server.url())).unwrap();

    let err = client.answer_question("q").await.unwrap_err();
    assert!(matches!(err, NarrativeError::Http { status: 500 }));
    assert_eq!(client.generate(&summary(), &column_kpis()).await, None);
}

#[tokio::test]
async fn test_invalid_body_yields_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/answerQuestion")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = NarrativeClient::from_config(NarrativeConfig::new(server.url())).unwrap();

    assert_eq!(client.generate(&summary(), &column_kpis()).await, None);
}

#[tokio::test]
async fn test_disabled_client_does_no_io() {
    let client = NarrativeClient::from_config(NarrativeConfig::default()).unwrap();

    assert!(!client.is_enabled());
    assert_eq!(client.answer_question("q").await.unwrap(), None);
    assert_eq!(client.generate(&summary(), &column_kpis()).await, None);
}
