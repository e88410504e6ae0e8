use anyhow::Result;
use httpmock::prelude::*;
use profile_store::utils::validation::Validate;
use profile_store::{CommitPolicy, RootStore, StoreConfig};
use profile_store::domain::ports::ConfigProvider;
use tempfile::TempDir;

/// 從 TOML 檔案建立 store，並透過命名空間呼叫 action
#[tokio::test]
async fn test_store_from_toml_file() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/satinCommentApi");
            then.status(200).body("[]");
        })
        .await;

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("store.toml");
    let config_content = format!(
        r#"
[profile]
endpoint = "{}/satinCommentApi?id=27610708&page=1"
timeout_seconds = 3
"#,
        server.base_url()
    );
    tokio::fs::write(&config_path, config_content).await?;

    let config = StoreConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.commit_policy(), CommitPolicy::Literal);

    let store = RootStore::from_config(&config)?;
    assert_eq!(store.profile().commit_policy(), CommitPolicy::Literal);

    let result = store
        .dispatch("profile/fetchName", serde_json::json!(27610708))
        .await?;

    api_mock.assert_async().await;
    assert_eq!(result["body"], "[]");
    assert_eq!(
        store.state(),
        serde_json::json!({
            "version": "v1.0.0",
            "profile": {"firstName": "lin", "lastName": "guangyu"}
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_endpoint_rejected_before_any_request() -> Result<()> {
    let config = StoreConfig::from_toml_str("[profile]\nendpoint = \"not a url\"\n")?;
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_setprofile_then_getters_through_namespace() {
    let store = RootStore::from_config(&StoreConfig::default()).unwrap();

    for (first, last) in [("A", "B"), ("", ""), ("名", "姓")] {
        store
            .commit(
                "profile/setProfile",
                serde_json::json!({"firstName": first, "lastName": last}),
            )
            .unwrap();
        assert_eq!(store.getter("profile/firstName").unwrap(), first);
        assert_eq!(store.getter("profile/lastName").unwrap(), last);
    }
    assert_eq!(store.version(), "v1.0.0");
}
