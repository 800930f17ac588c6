use anyhow::Result;
use assert_cmd::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn podalert_bin() -> Result<Command> {
    let mut cmd = Command::cargo_bin("podalert")?;
    for key in ["SLACK_TOKEN", "SLACK_CHANNEL", "SLACK_WEBHOOK", "RUST_LOG"] {
        cmd.env_remove(key);
    }
    Ok(cmd)
}

#[test]
fn test_fails_without_any_slack_settings() -> Result<()> {
    let mut cmd = podalert_bin()?;
    cmd.arg("message").arg("hello");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no Slack provider could be configured"));

    Ok(())
}

#[test]
fn test_fails_with_missing_config_file() -> Result<()> {
    let mut cmd = podalert_bin()?;
    cmd.arg("--config")
        .arg("/tmp/this/file/does/not/exist.toml")
        .arg("message")
        .arg("hello");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("configuration file not found"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sends_message_through_webhook() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(json!({ "text": "hello", "channel": "#ops" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = podalert_bin()?;
    cmd.env("SLACK_WEBHOOK", format!("{}/hook", server.uri()))
        .env("SLACK_CHANNEL", "#ops")
        .arg("message")
        .arg("hello");

    cmd.assert().success();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sends_event_from_file() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = NamedTempFile::new()?;
    write!(
        config,
        "[app]\ncluster_name = \"dev\"\n[alert.slack]\nwebhook = \"{}/hook\"\n",
        server.uri()
    )?;

    let mut event = NamedTempFile::new()?;
    write!(
        event,
        "{}",
        json!({
            "pod_name": "test-pod",
            "container_name": "test-container",
            "namespace": "default",
            "reason": "OOMKILLED",
        })
    )?;

    let mut cmd = podalert_bin()?;
    cmd.arg("--config")
        .arg(config.path())
        .arg("event")
        .arg("--file")
        .arg(event.path());

    cmd.assert().success();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["blocks"][2]["fields"][0]["text"], "*Cluster*\ndev");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delivery_failure_exits_non_zero() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut cmd = podalert_bin()?;
    cmd.env("SLACK_WEBHOOK", server.uri())
        .arg("message")
        .arg("hello");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to deliver to Slack"));
    Ok(())
}
