use assert_cmd::Command;
use std::fs;
use std::path::Path;

#[allow(deprecated)]
pub fn folio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a writing with the given slug and date
pub fn write_post(root: &Path, slug: &str, date: &str) {
    let dir = root.join("content/writings");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{}.md", slug)),
        format!(
            "---\ntitle: Post {slug}\ndate: {date}\nslug: {slug}\n---\n\nSome words about {slug}.\n"
        ),
    )
    .unwrap();
}

/// A small site: four writings, one page, projects and technologies
pub fn sample_site(root: &Path) {
    fs::write(
        root.join("_config.yml"),
        "title: Test Folio\nauthor: Jane Roe\nbio: Writes code.\nurl: https://example.com\nhome_projects: 2\n",
    )
    .unwrap();

    write_post(root, "new-year", "2024-01-01");
    write_post(root, "late-summer", "2024-09-06");
    write_post(root, "may-day", "2023-05-05");
    write_post(root, "old-news", "2022-01-01");

    fs::write(
        root.join("content/uses.md"),
        "---\ntitle: Uses\nlayout: about\n---\n\nMy desk.\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(
        root.join("data/projects.yml"),
        r#"- title: Alpha
  description: First project
  link: https://example.com/alpha
- title: Beta
  description: Second project
  link: https://example.com/beta
  featured: true
- title: Gamma
  description: Third project
  link: https://example.com/gamma
"#,
    )
    .unwrap();
    fs::write(
        root.join("data/technologies.yml"),
        "- name: Rust\n  icon: rust\n  link: https://www.rust-lang.org\n- name: Zig\n  icon: zig\n  link: https://ziglang.org\n",
    )
    .unwrap();
}
