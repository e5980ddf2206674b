use super::*;
use std::fs;
use tempfile::TempDir;

fn write(dir: &Path, file: &str, content: &str) {
    fs::create_dir_all(dir).expect("mkdir");
    fs::write(dir.join(file), content).expect("write manifest");
}

fn lookup(path: &Path) -> Option<PackageInfo> {
    find_up_package(path.to_str().expect("utf8 path")).expect("lookup")
}

#[test]
fn finds_cargo_manifest_from_nested_file() {
    let tmp = TempDir::new().expect("tempdir");
    write(
        tmp.path(),
        "Cargo.toml",
        r#"
[package]
name = "demo-cli"
version = "1.2.3"
description = "A demo"
homepage = "https://example.com"
"#,
    );
    let src = tmp.path().join("src").join("bin");
    fs::create_dir_all(&src).expect("mkdir");

    let info = lookup(&src.join("main.rs")).expect("package");
    assert_eq!(info.name, "demo-cli");
    assert_eq!(info.version, "1.2.3");
    assert_eq!(info.description.as_deref(), Some("A demo"));
    assert_eq!(info.homepage.as_deref(), Some("https://example.com"));
    assert_eq!(info.kind, Some(ManifestKind::Cargo));
    assert_eq!(info.root, std::path::absolute(tmp.path()).expect("absolute"));
}

#[test]
fn finds_package_json() {
    let tmp = TempDir::new().expect("tempdir");
    write(
        tmp.path(),
        "package.json",
        r#"{"name": "@scope/test-cli", "version": "0.1.0", "description": 42}"#,
    );

    let info = lookup(tmp.path()).expect("package");
    assert_eq!(info.name, "@scope/test-cli");
    assert_eq!(info.version, "0.1.0");
    assert_eq!(info.description, None);
    assert_eq!(info.kind, Some(ManifestKind::Npm));
}

#[test]
fn accepts_file_urls() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "package.json", r#"{"name": "url-cli", "version": "2.0.0"}"#);
    let url = format!("file://{}", tmp.path().join("cli.js").display());

    let info = find_up_package(&url).expect("lookup").expect("package");
    assert_eq!(info.name, "url-cli");
}

#[test]
fn skips_virtual_workspace_and_unparseable_manifests() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "package.json", r#"{"name": "outer", "version": "9.9.9"}"#);
    let inner = tmp.path().join("inner");
    write(&inner, "Cargo.toml", "[workspace]\nmembers = []\n");
    write(&inner, "package.json", "{ not json");

    let info = lookup(&inner).expect("package");
    assert_eq!(info.name, "outer");
}

#[test]
fn cargo_wins_over_package_json_in_same_directory() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "package.json", r#"{"name": "npm-side", "version": "1.0.0"}"#);
    write(
        tmp.path(),
        "Cargo.toml",
        "[package]\nname = \"cargo-side\"\nversion = \"0.1.0\"\n",
    );

    assert_eq!(lookup(tmp.path()).expect("package").name, "cargo-side");
}

#[test]
fn resolves_workspace_inherited_fields() {
    let tmp = TempDir::new().expect("tempdir");
    write(
        tmp.path(),
        "Cargo.toml",
        r#"
[workspace]
members = ["crates/tool"]

[workspace.package]
version = "4.5.6"
homepage = "https://tool.dev"
"#,
    );
    let member = tmp.path().join("crates").join("tool");
    write(
        &member,
        "Cargo.toml",
        r#"
[package]
name = "tool"
version.workspace = true
homepage = { workspace = true }
"#,
    );

    let info = lookup(&member).expect("package");
    assert_eq!(info.name, "tool");
    assert_eq!(info.version, "4.5.6");
    assert_eq!(info.homepage.as_deref(), Some("https://tool.dev"));
    assert_eq!(info.description, None);
}

#[test]
fn missing_name_and_version_are_empty() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "package.json", "{}");

    let info = lookup(tmp.path()).expect("package");
    assert_eq!(info.name, "");
    assert_eq!(info.version, "");
}

#[test]
fn read_manifest_reports_parse_errors() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "package.json", "[1, 2]");

    let err = read_manifest(&tmp.path().join("package.json"), ManifestKind::Npm)
        .expect_err("array is not a manifest");
    assert!(matches!(err, ClirkError::ManifestParse { .. }));
}
