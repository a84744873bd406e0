//! Integration tests for `RedditClient` against a wiremock HTTP double.
//!
//! Covers the token exchange, search parsing, the keyword post-filter, and
//! the degradation path the `ForumSource` impl provides.

use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kwr_core::{AppConfig, ForumSource};
use kwr_sources::{RedditClient, SourceError};

fn test_config() -> AppConfig {
    AppConfig {
        openai_api_key: "sk-test".to_string(),
        reddit_client_id: "client-id".to_string(),
        reddit_client_secret: "client-secret".to_string(),
        reddit_user_agent: "kwr-test/0.1".to_string(),
        email_app_password: "password".to_string(),
        config_path: "./config/config.json".into(),
        keywords_path: "./config/keywords.txt".into(),
        failure_log_path: "./failed_queries.log".into(),
        social_search_bin: "snscrape".to_string(),
        social_max_results: 100,
        social_max_attempts: 3,
        social_retry_delay_secs: 0,
        reddit_limit: 20,
        llm_model: "gpt-3.5-turbo".to_string(),
        llm_timeout_secs: 5,
        request_timeout_secs: 5,
        max_concurrent_keywords: 4,
        log_level: "info".to_string(),
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"access_token": "token-123"})),
        )
        .mount(server)
        .await;
}

fn listing(children: serde_json::Value) -> serde_json::Value {
    json!({"data": {"children": children}})
}

fn child(title: &str, selftext: &str, score: i64) -> serde_json::Value {
    json!({
        "data": {
            "title": title,
            "selftext": selftext,
            "url": format!("https://example.com/{}", title.replace(' ', "-")),
            "permalink": "/r/all/comments/x",
            "score": score
        }
    })
}

#[tokio::test]
async fn search_returns_filtered_posts() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .and(query_param("q", "launch"))
        .and(query_param("sort", "relevance"))
        .and(query_param("t", "week"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing(json!([
            child("Launch day megathread", "", 120),
            child("Completely unrelated", "nothing to see", 999),
            child("Weekly chat", "did anyone catch the launch stream", 40)
        ]))))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::with_base_urls(&config, &server.uri(), &server.uri())
        .await
        .expect("token exchange should succeed");

    let posts = client.search_posts("launch").await.expect("search should succeed");
    assert_eq!(
        posts.len(),
        2,
        "loose search matches without the literal keyword are filtered out"
    );
    assert_eq!(posts[0].engagement, 120);
    assert_eq!(posts[1].engagement, 40);
}

#[tokio::test]
async fn token_exchange_failure_is_a_reddit_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = test_config();
    let result = RedditClient::with_base_urls(&config, &server.uri(), &server.uri()).await;
    assert!(
        matches!(result, Err(SourceError::Reddit(_))),
        "expected SourceError::Reddit for a 401 token exchange"
    );
}

#[tokio::test]
async fn search_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::with_base_urls(&config, &server.uri(), &server.uri())
        .await
        .expect("token exchange should succeed");

    let result = client.search_posts("launch").await;
    assert!(
        matches!(result, Err(SourceError::Reddit(_))),
        "expected SourceError::Reddit for a 503 search response"
    );
}

#[tokio::test]
async fn malformed_search_body_is_an_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::with_base_urls(&config, &server.uri(), &server.uri())
        .await
        .expect("token exchange should succeed");

    let result = client.search_posts("launch").await;
    assert!(
        matches!(result, Err(SourceError::Reddit(_))),
        "expected SourceError::Reddit for an unparseable body"
    );
}

#[tokio::test]
async fn forum_source_degrades_to_empty_on_failure() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::with_base_urls(&config, &server.uri(), &server.uri())
        .await
        .expect("token exchange should succeed");

    let posts = ForumSource::fetch_posts(&client, "launch").await;
    assert!(posts.is_empty(), "trait impl must degrade failures to empty");
}

#[tokio::test]
async fn empty_listing_yields_no_posts() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing(json!([]))))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::with_base_urls(&config, &server.uri(), &server.uri())
        .await
        .expect("token exchange should succeed");

    let posts = client.search_posts("launch").await.expect("search should succeed");
    assert!(posts.is_empty());
}
