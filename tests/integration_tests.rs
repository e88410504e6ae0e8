use httpmock::prelude::*;
use profile_store::{
    CommitPolicy, FetchOutcome, HttpProfileSource, ProfileModule, RootStore, StoreError,
};
use std::sync::Arc;
use std::time::Duration;

fn store_for(endpoint: &str, policy: CommitPolicy) -> RootStore {
    let source = HttpProfileSource::new(endpoint, Duration::from_secs(5)).unwrap();
    RootStore::new(ProfileModule::new(Arc::new(source), policy))
}

#[tokio::test]
async fn test_fetch_name_commits_literal_names_on_success() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/satinCommentApi")
                .query_param("id", "27610708")
                .query_param("page", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"code": 200, "data": [{"name": "someone else"}]}));
        })
        .await;

    let endpoint = format!("{}/satinCommentApi?id=27610708&page=1", server.base_url());
    let store = store_for(&endpoint, CommitPolicy::Literal);
    assert_eq!(store.profile().first_name(), "");

    let outcome = store.profile().fetch_name(42).await.unwrap();

    api_mock.assert_async().await;
    let raw = outcome.response().expect("request should succeed");
    assert_eq!(raw.status, 200);
    assert!(raw.body.contains("someone else"));
    assert_eq!(store.profile().first_name(), "lin");
    assert_eq!(store.profile().last_name(), "guangyu");
    assert_eq!(store.version(), "v1.0.0");
}

#[tokio::test]
async fn test_request_target_does_not_depend_on_id() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/satinCommentApi")
                .query_param("id", "27610708")
                .query_param("page", "1");
            then.status(200).body("{}");
        })
        .await;

    let endpoint = format!("{}/satinCommentApi?id=27610708&page=1", server.base_url());
    let store = store_for(&endpoint, CommitPolicy::Literal);

    let first = store.profile().fetch_name(1).await.unwrap();
    let second = store.profile().fetch_name(999).await.unwrap();

    api_mock.assert_hits_async(2).await;
    assert_eq!(
        first.response().unwrap().url,
        second.response().unwrap().url
    );
}

#[tokio::test]
async fn test_server_error_settles_as_failed_outcome() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/profile");
            then.status(500);
        })
        .await;

    let store = store_for(&server.url("/profile"), CommitPolicy::Literal);
    let outcome = store.profile().fetch_name(7).await.unwrap();

    api_mock.assert_async().await;
    match outcome {
        FetchOutcome::Failed(StoreError::HttpStatusError { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected a failed outcome, got {:?}", other),
    }
    assert_eq!(store.profile().first_name(), "lin");
    assert_eq!(store.profile().last_name(), "guangyu");
}

#[tokio::test]
async fn test_connection_failure_settles_as_failed_outcome() {
    let store = store_for("http://127.0.0.1:1/profile", CommitPolicy::Literal);

    let outcome = store.profile().fetch_name(7).await.unwrap();

    assert!(matches!(outcome.error(), Some(StoreError::ApiError(_))));
    assert_eq!(store.getter("profile/firstName").unwrap(), "lin");
    assert_eq!(store.getter("profile/lastName").unwrap(), "guangyu");
}

#[tokio::test]
async fn test_timeout_is_an_ordinary_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(2)).body("{}");
        })
        .await;

    let source = HttpProfileSource::new(server.url("/slow"), Duration::from_millis(200)).unwrap();
    let profile = ProfileModule::new(Arc::new(source), CommitPolicy::Literal);

    let outcome = profile.fetch_name(1).await.unwrap();

    match outcome.error() {
        Some(StoreError::ApiError(e)) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
    assert_eq!(profile.first_name(), "lin");
}

#[tokio::test]
async fn test_response_policy_commits_parsed_body() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/42");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"firstName": "Ada", "lastName": "Lovelace"}));
        })
        .await;

    let store = store_for(&server.url("/users/{id}"), CommitPolicy::Response);
    let result = store
        .dispatch("profile/fetchName", serde_json::json!(42))
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(result["status"], 200);
    assert_eq!(store.getter("profile/firstName").unwrap(), "Ada");
    assert_eq!(store.getter("profile/lastName").unwrap(), "Lovelace");
}

#[tokio::test]
async fn test_response_policy_propagates_failure_without_commit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/5");
            then.status(404);
        })
        .await;

    let store = store_for(&server.url("/users/{id}"), CommitPolicy::Response);
    store.profile().set_profile(profile_store::ProfilePayload::new("keep", "me"));

    let err = store.profile().fetch_name(5).await.unwrap_err();

    assert!(matches!(err, StoreError::HttpStatusError { status: 404, .. }));
    assert_eq!(store.profile().first_name(), "keep");
    assert_eq!(store.profile().last_name(), "me");
}

#[tokio::test]
async fn test_overlapping_fetches_settle_to_literal_names() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/profile");
            then.status(200).delay(Duration::from_millis(50)).body("{}");
        })
        .await;

    let store = store_for(&server.url("/profile"), CommitPolicy::Literal);
    let mutations = Arc::new(std::sync::Mutex::new(0usize));
    let counter = mutations.clone();
    store.subscribe(move |_| *counter.lock().unwrap() += 1);

    let (a, b) = tokio::join!(store.profile().fetch_name(1), store.profile().fetch_name(2));

    assert!(a.unwrap().is_response());
    assert!(b.unwrap().is_response());
    api_mock.assert_hits_async(2).await;
    assert_eq!(*mutations.lock().unwrap(), 2);
    assert_eq!(store.profile().first_name(), "lin");
    assert_eq!(store.profile().last_name(), "guangyu");
}
