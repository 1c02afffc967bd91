//! End-to-end tests: source file in, HTML and assets out.

use std::fs;
use std::path::{Path, PathBuf};

use present_html::{Error, Present};
use tempfile::TempDir;

const MAIN_GO: &str = "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\") // HL\n}\n";

const TALK: &str = "\
Go in Practice
Lessons from production
15:04 2 Jan 2006
Tags: go, talks

Gopher
Engineer, Example Corp
https://example.com/
@gopher

* Intro

Some *bold* claims.

- first
- second

: remember to breathe

* Demo

.play main.go /^func main/,/^}/

* Listing

.code main.go
";

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn write_talk(dir: &Path) -> PathBuf {
    fs::write(dir.join("main.go"), MAIN_GO).unwrap();
    let input = dir.join("talk.slide");
    fs::write(&input, TALK).unwrap();
    input
}

fn compile(input: &Path, output: &Path, play: bool) -> String {
    Present::new()
        .with_base_dir(repo_root())
        .with_play(play)
        .compile(input, Some(output))
        .unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_built_in_templates_match_repo_copies() {
    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());
    let bundled_out = dir.path().join("bundled/talk.html");
    let on_disk_out = dir.path().join("disk/talk.html");

    Present::new()
        .with_play(true)
        .compile(&input, Some(&bundled_out))
        .unwrap();
    compile(&input, &on_disk_out, true);

    assert_eq!(
        fs::read_to_string(&bundled_out).unwrap(),
        fs::read_to_string(&on_disk_out).unwrap()
    );
    assert!(dir.path().join("bundled/static/slides.js").is_file());
}

#[test]
fn test_slides_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());

    let written = Present::new()
        .with_base_dir(repo_root())
        .compile(&input, None::<&Path>)
        .unwrap();
    assert_eq!(written, dir.path().join("talk.html"));

    let html = fs::read_to_string(&written).unwrap();
    assert!(html.contains("<title>Go in Practice</title>"));
    assert!(html.contains("Lessons from production"));
    assert!(html.contains("2 January 2006"));
    assert!(html.contains("<b>bold</b>"));
    assert!(html.contains("<li>second</li>"));
    assert!(html.contains("twitter.com"));
    assert!(html.contains("fmt.Println(&quot;hi&quot;)"));
    assert!(!html.contains("remember to breathe"));
}

#[test]
fn test_assets_copied_next_to_output() {
    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());
    let out = dir.path().join("site/index.html");
    compile(&input, &out, false);

    for asset in ["styles.css", "article.css", "slides.js", "play.js"] {
        let copied = dir.path().join("site/static").join(asset);
        let original = repo_root().join("assets/static").join(asset);
        assert_eq!(fs::read(&copied).unwrap(), fs::read(&original).unwrap(), "{}", asset);
    }
}

#[test]
fn test_play_toggle_only_changes_marker() {
    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());

    let off = compile(&input, &dir.path().join("off.html"), false);
    let on = compile(&input, &dir.path().join("on.html"), true);

    assert!(!off.contains("playground"));
    // Only the .play excerpt of a .go file is marked.
    assert_eq!(on.matches("class=\"code playground\"").count(), 1);
    assert_eq!(on.replace(" playground", ""), off);
}

#[test]
fn test_non_go_play_is_never_marked() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("run.sh"), "echo hi\n").unwrap();
    let input = dir.path().join("shell.slide");
    fs::write(&input, "Shell\n\n* Script\n\n.play run.sh\n").unwrap();

    let html = compile(&input, &dir.path().join("shell.html"), true);
    assert!(html.contains("echo hi"));
    assert!(!html.contains("playground"));
}

#[test]
fn test_notes_toggle() {
    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());
    let out = dir.path().join("notes.html");

    Present::new()
        .with_base_dir(repo_root())
        .with_notes(true)
        .compile(&input, Some(&out))
        .unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("remember to breathe"));
}

#[test]
fn test_article_has_toc() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("post.article");
    fs::write(
        &input,
        "A Post\nSummary: short\n\n* First\n\nIntro text.\n\n** Detail\n\nMore.\n\n* Second\n\nEnd.\n",
    )
    .unwrap();

    let out = Present::new()
        .with_base_dir(repo_root())
        .compile(&input, None::<&Path>)
        .unwrap();
    assert_eq!(out, dir.path().join("post.html"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("href=\"#TOC_1\""));
    assert!(html.contains("href=\"#TOC_1.1\""));
    assert!(html.contains("id=\"TOC_2\""));
    assert!(html.contains("<meta name=\"description\" content=\"short\">"));
    assert!(dir.path().join("static/article.css").exists());
}

#[test]
fn test_parse_error_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.slide");
    fs::write(&input, "Title\n\n* One\n\n.bogus thing\n").unwrap();

    let result = Present::new()
        .with_base_dir(repo_root())
        .compile(&input, None::<&Path>);
    assert!(matches!(result, Err(Error::Parse(_))));
    assert!(!dir.path().join("bad.html").exists());
    assert!(!dir.path().join("static").exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Notes\n").unwrap();

    let result = Present::new()
        .with_base_dir(repo_root())
        .compile(&input, None::<&Path>);
    assert!(matches!(result, Err(Error::UnsupportedDocumentKind(_))));
    assert!(!dir.path().join("notes.html").exists());
}

#[test]
fn test_missing_assets_dir() {
    let base = TempDir::new().unwrap();
    let templates = base.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    for name in ["action.tmpl", "slides.tmpl", "article.tmpl"] {
        fs::copy(repo_root().join("templates").join(name), templates.join(name)).unwrap();
    }

    let dir = TempDir::new().unwrap();
    let input = write_talk(dir.path());
    let result = Present::new()
        .with_base_dir(base.path())
        .compile(&input, None::<&Path>);
    assert!(matches!(result, Err(Error::AssetCopy { .. })));
}
