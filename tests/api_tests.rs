use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use courtside::api::{router, AppState};
use courtside::config::{AppConfig, ProviderKind, UpstreamConfig};
use courtside::metrics::Metrics;
use courtside::service::StatsService;
use courtside::upstream::LiveClient;
use mockito::Matcher;
use tower::ServiceExt;

const SCOREBOARD_FIXTURE: &str = include_str!("fixtures/scoreboard.json");
const BOXSCORE_FIXTURE: &str = include_str!("fixtures/boxscore.json");

fn test_config(upstream_url: &str) -> AppConfig {
    AppConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        request_timeout: Duration::from_secs(5),
        shutdown_timeout: Duration::from_secs(1),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        upstream: UpstreamConfig {
            provider: ProviderKind::Live,
            stats_base_url: upstream_url.to_string(),
            cdn_base_url: upstream_url.to_string(),
            wnba_cdn_base_url: upstream_url.to_string(),
            timeout: Duration::from_secs(5),
        },
    }
}

fn test_app(config: &AppConfig) -> Router {
    let client = LiveClient::try_new(&config.upstream).unwrap();
    let state = AppState {
        service: StatsService::new(Arc::new(client)),
        metrics: Metrics::new().unwrap(),
    };

    router(state, config).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_returns_greeting() {
    let config = test_config("http://localhost:1");
    let app = test_app(&config);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Hello World!");
}

#[tokio::test]
async fn scoreboard_returns_transformed_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("LeagueID".into(), "00".into()),
            Matcher::UrlEncoded("GameDate".into(), "2022-10-01".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(SCOREBOARD_FIXTURE)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/scoreboard?date=2022-10-01&league=nba"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    mock.assert_async().await;

    let date = body["date"].as_str().unwrap();
    assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    assert_eq!(date, "2022-10-01");

    let game = &body["games"][0];
    assert_eq!(game["id"], "0022200001");
    assert_eq!(game["starts_at"], "2022-10-01T23:30:00Z");
    assert_eq!(game["home_team"]["tricode"], "BOS");
    assert_eq!(game["away_team"]["tricode"], "PHI");
    // scoreboard teams carry identity only
    assert_eq!(game["home_team"]["stats"]["min"], "");
    assert!(game["home_team"].get("players").is_none());
}

#[tokio::test]
async fn scoreboard_defaults_missing_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("LeagueID".into(), "00".into()),
            Matcher::UrlEncoded("GameDate".into(), "".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(r#"{"scoreboard": {"gameDate": "", "games": []}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app.oneshot(get("/stats/scoreboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    mock.assert_async().await;

    assert_eq!(body["games"], serde_json::json!([]));
}

#[tokio::test]
async fn scoreboard_routes_wnba_league_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("LeagueID".into(), "10".into()),
            Matcher::UrlEncoded("GameDate".into(), "2022-08-12".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(r#"{"scoreboard": {"gameDate": "2022-08-12", "games": []}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/scoreboard?date=2022-08-12&league=wnba"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn scoreboard_failure_returns_fixed_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/scoreboard?date=2022-10-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "failed to get scoreboard");
}

#[tokio::test]
async fn boxscore_returns_transformed_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/static/json/liveData/boxscore/boxscore_0022200001.json",
        )
        .with_header("content-type", "application/json")
        .with_body(BOXSCORE_FIXTURE)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/boxscore?gameId=0022200001&league=nba"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    mock.assert_async().await;

    assert_eq!(body["game_id"], "0022200001");

    let home = &body["home_team"];
    assert_eq!(home["id"], 1610612738);
    assert_eq!(home["name"], "Celtics");
    assert_eq!(home["tricode"], "BOS");
    // the 240-minute team total does not fit the clock pattern
    assert_eq!(home["stats"]["min"], "0:00");
    assert_eq!(home["stats"]["fgm"], 40);
    assert_eq!(home["stats"]["fgp"], 45.5);
    assert_eq!(home["stats"]["ftp"], 81.8);
    assert_eq!(home["stats"]["team_reb"], 9);
    assert_eq!(home["stats"]["tot"], 14);
    assert_eq!(home["stats"]["fd"], 21);
    assert_eq!(home["stats"]["plus_minus"], 13.0);

    let tatum = &home["players"][0];
    assert_eq!(tatum["first_name"], "Jayson");
    assert_eq!(tatum["last_name"], "Tatum");
    assert_eq!(tatum["slug"], "jayson-tatum");
    assert_eq!(tatum["position"], "SF");
    assert_eq!(tatum["stats"]["min"], "36:45");
    assert_eq!(tatum["stats"]["fgp"], 50.0);
    assert_eq!(tatum["stats"]["3fgp"], 37.5);
    assert_eq!(tatum["stats"]["plus_minus"], 8.5);

    let hauser = &home["players"][1];
    assert_eq!(hauser["stats"]["min"], "5:09");

    // a team without players serializes without the key
    assert!(body["away_team"].get("players").is_none());
    assert_eq!(body["away_team"]["stats"]["min"], "0:00");
}

#[tokio::test]
async fn boxscore_failure_returns_fixed_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock(
            "GET",
            "/static/json/liveData/boxscore/boxscore_0022200001.json",
        )
        .with_status(503)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/boxscore?gameId=0022200001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "failed to get boxscore");
}

#[tokio::test]
async fn malformed_upstream_payload_is_a_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .oneshot(get("/stats/scoreboard?date=2022-10-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "failed to get scoreboard");
}

#[tokio::test]
async fn preflight_allows_configured_origin() {
    let config = test_config("http://localhost:1");
    let app = test_app(&config);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/stats/scoreboard")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|value| value.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn preflight_ignores_unknown_origin() {
    let config = test_config("http://localhost:1");
    let app = test_app(&config);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/stats/scoreboard")
        .header(header::ORIGIN, "https://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn metrics_report_request_counts() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stats/scoreboardv3")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"scoreboard": {"gameDate": "2022-10-01", "games": []}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let app = test_app(&config);

    let response = app
        .clone()
        .oneshot(get("/stats/scoreboard?date=2022-10-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let exported = body_string(response).await;
    assert!(exported.contains("courtside_scoreboard_requests_total 1"));
}
