// tests/uptime_tests.rs
use std::path::Path;

use uptime_monitor::checker::USER_AGENT;
use uptime_monitor::config::MonitorConfig;
use uptime_monitor::logger::LOG_HEADER;
use uptime_monitor::monitor::run;
use uptime_monitor::MonitorError;

fn config_for(sites: Vec<String>, log_file: &Path) -> MonitorConfig {
    let mut config = MonitorConfig {
        sites,
        log_file: log_file.to_path_buf(),
        timeout_secs: 5,
        max_concurrent: 2,
        ..MonitorConfig::default()
    };
    config.git.enabled = false;
    config
}

#[tokio::test]
async fn test_run_logs_results_and_files_issue() {
    let mut server = mockito::Server::new_async().await;
    let _good = server
        .mock("GET", "/good")
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/bad")
        .with_status(500)
        .create_async()
        .await;
    let issue = server
        .mock("POST", "/repos/acme/status/issues")
        .match_header("authorization", "Bearer token-123")
        .match_body(mockito::Matcher::Regex(
            r"returned status \*\*500\*\*".to_string(),
        ))
        .with_status(201)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("logs/uptime.log");
    let mut config = config_for(
        vec![
            format!("{}/good", server.url()),
            "ftp://ignored.example".to_string(),
            format!("{}/bad", server.url()),
        ],
        &log_file,
    );
    config.github.api_url = server.url();
    config.github.token = Some("token-123".to_string());
    config.github.repository = Some("acme/status".to_string());

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.total_sites, 2);
    assert_eq!(summary.failed_sites, 1);
    assert_eq!(summary.log_file_path, log_file);
    issue.assert_async().await;

    let contents = tokio::fs::read_to_string(&log_file).await.unwrap();
    assert!(contents.starts_with(LOG_HEADER));
    let lines: Vec<&str> = contents.lines().collect();
    let separator = lines.iter().position(|l| *l == "---").expect("separator");
    assert!(lines[separator + 1].contains("/good → Status: 200, Response: "));
    assert!(lines[separator + 2].contains("/bad → Status: 500, Response: "));
    assert!(!lines[separator + 2].contains("Error:"));
}

#[tokio::test]
async fn test_successful_run_appends_without_issue() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/")
        .with_status(204)
        .expect(2)
        .create_async()
        .await;
    let issue = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("uptime.log");
    let mut config = config_for(vec![format!("{}/", server.url())], &log_file);
    config.github.api_url = server.url();

    for _ in 0..2 {
        let summary = run(&config).await.unwrap();
        assert_eq!(summary.failed_sites, 0);
        assert_eq!(summary.total_sites, 1);
    }

    issue.assert_async().await;
    let contents = tokio::fs::read_to_string(&log_file).await.unwrap();
    assert_eq!(contents.matches("---").count(), 2);
    assert_eq!(contents.matches("Status: 204").count(), 2);
}

#[tokio::test]
async fn test_unreachable_site_is_logged_with_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("uptime.log");
    let mut config = config_for(vec![format!("http://{addr}/")], &log_file);
    config.create_issue = false;

    let summary = run(&config).await.unwrap();
    assert_eq!(summary.failed_sites, 1);

    let contents = tokio::fs::read_to_string(&log_file).await.unwrap();
    assert!(contents.contains("→ Status: 0, Response: "));
    assert!(contents.contains(", Error: "));
}

#[tokio::test]
async fn test_missing_token_fails_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _bad = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("uptime.log");
    let mut config = config_for(vec![format!("{}/", server.url())], &log_file);
    config.github.token = Some(String::new());
    config.github.repository = Some("acme/status".to_string());

    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, MonitorError::MissingToken));

    // results are logged before alerting
    let contents = tokio::fs::read_to_string(&log_file).await.unwrap();
    assert!(contents.contains("Status: 503"));
}

async fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = tokio::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}

#[tokio::test]
async fn test_run_commits_and_pushes_log() {
    let remote_dir = tempfile::tempdir().unwrap();
    if git(remote_dir.path(), &["init", "--bare", "--quiet"]).await.is_none() {
        return;
    }

    let work_dir = tempfile::tempdir().unwrap();
    let remote_path = remote_dir.path().to_string_lossy().into_owned();
    for args in [
        vec!["init", "--quiet"],
        vec!["remote", "add", "origin", remote_path.as_str()],
        vec!["config", "push.default", "current"],
        vec!["config", "commit.gpgsign", "false"],
    ] {
        git(work_dir.path(), &args).await.expect("git setup");
    }

    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let log_file = work_dir.path().join("uptime.log");
    let mut config = config_for(vec![format!("{}/", server.url())], &log_file);
    config.git.enabled = true;
    config.git.repo_dir = Some(work_dir.path().to_path_buf());
    config.commit_message = "uptime check".to_string();

    let summary = run(&config).await.unwrap();
    assert_eq!(summary.failed_sites, 0);

    let pushed = git(remote_dir.path(), &["log", "--all", "--format=%s"])
        .await
        .expect("remote log");
    assert_eq!(pushed.trim(), "uptime check");

    let tracked = git(work_dir.path(), &["ls-files"]).await.expect("ls-files");
    assert_eq!(tracked.trim(), "uptime.log");
}
