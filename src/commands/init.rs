//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: folio
description: ''
author: John Doe
bio: I build software and occasionally write about it.
avatar:
language: en
socials:
  - name: GitHub
    link: https://github.com/
  - name: Email
    link: mailto:john@example.com

# URL
url: http://example.com
root: /

# Directory
content_dir: content
writings_dir: writings
data_dir: data
static_dir: static
public_dir: public

# Home page
recent_posts: 3
home_projects: 4

# Writing
words_per_minute: 200
render_drafts: false
highlight_theme: base16-ocean.dark
line_numbers: false

# Date format (moment-style)
date_format: MMM D, YYYY

# Feed
feed_limit: 20
"#;

const USES_PAGE: &str = r#"---
title: Uses
layout: about
---

The tools and technologies I reach for most days.
"#;

const PROJECTS: &str = r#"- title: folio
  description: A small static site generator for a portfolio and blog.
  link: https://example.com/folio
  tech: [rust]
  featured: true
"#;

const TECHNOLOGIES: &str = r#"- name: Rust
  icon: rust
  link: https://www.rust-lang.org
- name: TypeScript
  icon: typescript
  link: https://www.typescriptlang.org
- name: Linux
  icon: linux
  link: https://kernel.org
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/writings"))?;
    fs::create_dir_all(target_dir.join("data"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("content/uses.md"), USES_PAGE)?;
    fs::write(target_dir.join("data/projects.yml"), PROJECTS)?;
    fs::write(target_dir.join("data/technologies.yml"), TECHNOLOGIES)?;

    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
slug: hello-world
tags: [meta]
---

Welcome to your new site. This is your very first writing.

<!-- more -->

## Quick Start

### Create a new writing

```bash
$ folio new "My New Post"
```

### Run server

```bash
$ folio serve
```

### Build static files

```bash
$ folio build
```
"#,
        today.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("content/writings/hello-world.md"), sample_post)?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}
