#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use contributors::auth::{installation_token, AppCredentials};
use contributors::error::ContribError;
use contributors::github::client::build_http_client;
use contributors::github::{ContributorSource, GitHubClient, SponsorDirectory};
use contributors::model::{DateWindow, Repository};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// The client is blocking, so every call runs off the async runtime that
// drives the mock server.
async fn with_client<T, F>(server: &MockServer, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&GitHubClient) -> T + Send + 'static,
{
    let base = server.uri();
    tokio::task::spawn_blocking(move || {
        let client = GitHubClient::new(
            build_http_client().unwrap(),
            &base,
            &format!("{base}/graphql"),
            "t".to_string(),
        );
        call(&client)
    })
    .await
    .unwrap()
}

fn repo(full_name: &str) -> Repository {
    Repository {
        full_name: full_name.to_string(),
        fork: false,
    }
}

#[tokio::test]
async fn contributors_follow_link_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contributors"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "login": "bob", "avatar_url": "https://a/bob", "contributions": 1 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contributors"))
        .and(query_param("per_page", "100"))
        .and(header("authorization", "Bearer t"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(
                        "<{}/repos/o/r/contributors?page=2>; rel=\"next\", <{}/repos/o/r/contributors?page=2>; rel=\"last\"",
                        server.uri(),
                        server.uri()
                    )
                    .as_str(),
                )
                .set_body_json(json!([
                    { "login": "alice", "avatar_url": "https://a/alice", "contributions": 7 }
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let users = with_client(&server, |c| c.contributors(&repo("o/r")).unwrap()).await;
    let logins: Vec<_> = users.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "bob"]);
    assert_eq!(users[0].contributions, 7);
}

#[tokio::test]
async fn empty_repository_yields_no_contributors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/empty/contributors"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let users = with_client(&server, |c| c.contributors(&repo("o/empty")).unwrap()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn commit_check_sends_author_and_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("author", "alice"))
        .and(query_param("since", "2023-01-01"))
        .and(query_param("until", "2023-06-30"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "sha": "abc" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("author", "idle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
    );
    let (active, idle) = with_client(&server, move |c| {
        (
            c.has_commits(&repo("o/r"), "alice", &window).unwrap(),
            c.has_commits(&repo("o/r"), "idle", &window).unwrap(),
        )
    })
    .await;
    assert!(active);
    assert!(!idle);
}

#[tokio::test]
async fn error_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"Not Found\"}"))
        .mount(&server)
        .await;

    let err = with_client(&server, |c| c.repository("o", "missing").unwrap_err()).await;
    match err {
        ContribError::Api { status, url, message } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/repos/o/missing"));
            assert!(message.contains("Not Found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn organization_repositories_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(header("authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "full_name": "acme/app", "fork": false },
            { "full_name": "acme/lib-fork", "fork": true }
        ])))
        .mount(&server)
        .await;

    let repos = with_client(&server, |c| c.organization_repositories("acme").unwrap()).await;
    assert_eq!(repos.len(), 2);
    assert!(!repos[0].fork);
    assert!(repos[1].fork);
}

#[tokio::test]
async fn sponsors_listing_is_queried_over_graphql() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer t"))
        .and(body_partial_json(json!({ "variables": { "username": "alice" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repositoryOwner": { "hasSponsorsListing": true } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "username": "ghost" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repositoryOwner": null },
            "errors": [{ "message": "Could not resolve to a RepositoryOwner" }]
        })))
        .mount(&server)
        .await;

    let (alice, ghost) = with_client(&server, |c| {
        (c.has_sponsors_listing("alice"), c.has_sponsors_listing("ghost"))
    })
    .await;
    assert!(alice.unwrap());
    assert!(ghost.is_err());
}

#[tokio::test]
async fn installation_token_is_exchanged_with_app_jwt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/installations/456/access_tokens"))
        .and(header_exists("authorization"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "ghs_installation",
            "expires_at": "2030-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let token = tokio::task::spawn_blocking(move || {
        let creds = AppCredentials {
            app_id: 123,
            installation_id: 456,
            private_key: include_str!("fixtures/app_key.pem").to_string(),
            enterprise_only: false,
        };
        installation_token(&build_http_client().unwrap(), &creds, &base)
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(token, "ghs_installation");

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("Bearer ey"));
}
