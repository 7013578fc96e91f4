// ABOUTME: Integration tests for the digests-cli binary.
// ABOUTME: Runs full scrape cycles against a mock server and checks the JSON file and report.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const PARAGRAPH: &str = "Automated assistants let small support teams answer common questions quickly while keeping humans in the loop for hard cases.";

fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("digests-cli").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BLOG_URL")
        .env_remove("NUM_ARTICLES")
        .env("SCRAPER_DELAY_MS", "0")
        .env("SCRAPER_LOG", "warn");
    cmd
}

fn mount_blog(server: &MockServer, count: usize) {
    let cards: String = (1..=count)
        .map(|i| format!(r#"<article><h2>Entry {i}</h2><a href="/blogs/entry-{i}">more</a></article>"#))
        .collect();
    server.mock(|when, then| {
        when.method(GET).path("/blogs");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(format!("<html><body>{cards}</body></html>"));
    });
    for i in 1..=count {
        server.mock(|when, then| {
            when.method(GET).path(format!("/blogs/entry-{i}"));
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(format!(
                    "<html><body><article><p>{PARAGRAPH} ({i}a)</p><p>{PARAGRAPH} ({i}b)</p><p>{PARAGRAPH} ({i}c)</p></article></body></html>"
                ));
        });
    }
}

#[test]
fn scrapes_and_writes_json_file() {
    let server = MockServer::start();
    mount_blog(&server, 7);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("articles.json");

    cli_cmd()
        .env("BLOG_URL", server.url("/blogs"))
        .env("NUM_ARTICLES", "3")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 3 articles"))
        .stdout(predicate::str::contains(format!("Saved to {}", output.display())))
        .stdout(predicate::str::contains("1. Entry 5"))
        .stdout(predicate::str::contains("3. Entry 7"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let items = saved.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "Entry 5");
    assert_eq!(items[2]["url"], server.url("/blogs/entry-7"));
    assert!(items[2]["content"].as_str().unwrap().contains("(7c)"));
    assert_eq!(items[0]["source"], "BeyondChats");
}

#[test]
fn newest_flag_selects_head() {
    let server = MockServer::start();
    mount_blog(&server, 4);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("articles.json");

    cli_cmd()
        .arg("--blog-url")
        .arg(server.url("/blogs"))
        .arg("--num-articles")
        .arg("2")
        .arg("--selection")
        .arg("newest")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Entry 1"))
        .stdout(predicate::str::contains("2. Entry 2"));
}

#[test]
fn listing_failure_exits_cleanly_without_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/blogs");
        then.status(404);
    });

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("articles.json");

    cli_cmd()
        .env("BLOG_URL", server.url("/blogs"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 0 articles"))
        .stdout(predicate::str::contains("Saved to").not());

    assert!(!output.exists());
}

#[test]
fn empty_listing_still_reports_saved_file() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/blogs");
        then.status(200).body("<html><body><p>Nothing here yet.</p></body></html>");
    });

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("articles.json");

    cli_cmd()
        .env("BLOG_URL", server.url("/blogs"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 0 articles"))
        .stdout(predicate::str::contains("Saved to"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn unwritable_output_is_not_reported_as_saved() {
    let server = MockServer::start();
    mount_blog(&server, 1);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("missing").join("articles.json");

    cli_cmd()
        .env("BLOG_URL", server.url("/blogs"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 1 articles"))
        .stdout(predicate::str::contains("Saved to").not());
}

#[test]
fn unknown_selection_is_rejected() {
    cli_cmd()
        .arg("--selection")
        .arg("nwest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown selection policy 'nwest'"));
}
