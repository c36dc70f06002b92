#![cfg(test)]

use super::*;
use clap::error::ErrorKind;
use std::fs;
use tempfile::TempDir;

fn cli(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("stub").chain(args.iter().copied()))
}

#[test]
fn test_cli_requires_file_and_title() {
    assert_eq!(
        cli(&[]).unwrap_err().kind(),
        ErrorKind::MissingRequiredArgument
    );
    assert_eq!(
        cli(&["login.html"]).unwrap_err().kind(),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_cli_ignores_extra_arguments() {
    let cli = cli(&["login.html", "Login Flow", "more", "stuff"]).unwrap();
    assert_eq!(cli.file, "login.html");
    assert_eq!(cli.title, "Login Flow");
    assert_eq!(cli.extra, vec!["more", "stuff"]);
}

#[test]
fn test_cli_flags() {
    let cli = cli(&["-vv", "--escape", "--insert", "a.html", "A"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(cli.escape);
    assert!(cli.insert);
}

#[test]
fn test_run_writes_stub_and_link() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();

    let generated = run(&cli(&["--dir", root, "login.html", "Login Flow"]).unwrap()).unwrap();

    assert_eq!(generated.stub, dir.path().join("login.html"));
    assert!(fs::read_to_string(&generated.stub)
        .unwrap()
        .contains("<h1>Login Flow</h1>"));
    assert_eq!(
        fs::read_to_string(dir.path().join("index.html")).unwrap(),
        "<li>login.html</li>"
    );
}

#[test]
fn test_run_uses_config() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();
    fs::write(
        dir.path().join(config::CONFIG_FILE),
        "escape = true\nindex = \"all.html\"\n",
    )
    .unwrap();

    run(&cli(&["--dir", root, "a.html", "<b>"]).unwrap()).unwrap();

    assert!(fs::read_to_string(dir.path().join("a.html"))
        .unwrap()
        .contains("<title>&lt;b&gt;</title>"));
    assert_eq!(
        fs::read_to_string(dir.path().join("all.html")).unwrap(),
        "<li>a.html</li>"
    );
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn test_run_uses_config_insert() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();
    fs::write(dir.path().join(config::CONFIG_FILE), "insert = true\n").unwrap();
    fs::write(
        dir.path().join("index.html"),
        "<ul>\n<li>a.html</li>\n</ul>\n<p>footer</p>",
    )
    .unwrap();

    run(&cli(&["--dir", root, "b.html", "B"]).unwrap()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("index.html")).unwrap(),
        "<ul>\n<li>a.html</li>\n<li>b.html</li></ul>\n<p>footer</p>"
    );
}

#[test]
fn test_run_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let e = run(&cli(&["--dir", missing.to_str().unwrap(), "a.html", "A"]).unwrap()).unwrap_err();

    assert_eq!(
        e.downcast_ref::<tool_dir::Error>(),
        Some(&tool_dir::Error::ToolDirNotFound(missing))
    );
}
