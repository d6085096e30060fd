//! Integration tests for the `rentline` binary. None of them reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn rentline() -> Command {
    let mut cmd = Command::cargo_bin("rentline").unwrap();
    cmd.env_remove("RENTLINE_API_BASE_URL").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_canonical_prints_path_and_breadcrumbs() {
    rentline()
        .args(["canonical", "/ae/dubai/listing/cars/brand/bmw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/ae/dubai/listing/cars/brand/bmw\n"))
        .stdout(predicate::str::contains("UAE"))
        .stdout(predicate::str::contains("Bmw"))
        .stdout(predicate::str::contains("Redirect").not());
}

#[test]
fn test_canonical_reports_redirect() {
    rentline()
        .args(["canonical", "/AE/Dubai/listing/?page=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Redirect 308 /ae/dubai/listing/cars?page=2"));
}

#[test]
fn test_canonical_json() {
    rentline()
        .args(["canonical", "/ae/dubai/listing/cars/suv", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""canonicalPath": "/ae/dubai/listing/cars/suv""#,
        ))
        .stdout(predicate::str::contains(r#""redirect": null"#));
}

#[test]
fn test_unrecognized_listing_path_fails() {
    rentline()
        .args(["canonical", "/ae/dubai/listing/cars/suv/city/marina"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Invalid listing path"));
}

#[test]
fn test_resolve_offline_city_page() {
    rentline()
        .args(["resolve", "/ae/dubai/listing/cars/city/downtown-dubai", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downtown Dubai"))
        .stdout(predicate::str::contains("Source: generated"));
}

#[test]
fn test_resolve_offline_json() {
    rentline()
        .args(["resolve", "/ae/dubai/listing/bikes", "--offline", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""canonicalPath": "/ae/dubai/listing/bikes""#))
        .stdout(predicate::str::contains(r#""@context": "https://schema.org""#));
}

#[test]
fn test_resolve_requires_api_config() {
    rentline()
        .args(["resolve", "/ae/dubai/listing/cars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RENTLINE_API_BASE_URL"));
}

#[test]
fn test_filters_counts_applied() {
    rentline()
        .args(["filters", "brand=bmw&color=red&color=blue&period=week&page=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied filters: 2"))
        .stdout(predicate::str::contains("Color: red, blue"));
}

#[test]
fn test_filters_json_skips_malformed_values() {
    let output = rentline()
        .args(["filters", "brand=bmw&price=cheap&color=&seats=4", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(out["appliedCount"], json!(2));
    assert_eq!(out["selection"]["brand"], json!("bmw"));
    assert_eq!(out["selection"]["seats"], json!("4"));
    assert_eq!(out["selection"]["price"], Value::Null);
    assert_eq!(out["selection"]["color"], json!([]));
}

#[test]
fn test_filters_json_normalizes_price() {
    let output = rentline()
        .args(["filters", "price=900-250", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(out["selection"]["price"], json!("250-900"));
    assert_eq!(out["appliedCount"], json!(1));
}
