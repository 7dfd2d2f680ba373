//! Scaffold a new wiki in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `wikiplum init`, relative to the project root.
const SCAFFOLD: &[(&str, &str)] = &[
    ("wikiplum.toml", DEFAULT_CONFIG),
    ("content/index.md", DEFAULT_INDEX),
    ("content/guide/getting-started.md", DEFAULT_GETTING_STARTED),
    ("templates/base.html", DEFAULT_BASE_TEMPLATE),
    ("templates/page.html", DEFAULT_PAGE_TEMPLATE),
    ("static/style.css", DEFAULT_CSS),
];

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing wikiplum...");

    if Path::new("content").exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    let written = scaffold(Path::new("."), yes)?;

    tracing::info!("Initialization complete! Wrote {} files.", written);
    tracing::info!("Run 'wikiplum build' to generate the site.");

    Ok(())
}

/// Write the scaffold under `root`, keeping existing files unless `overwrite`.
fn scaffold(root: &Path, overwrite: bool) -> Result<usize> {
    let mut written = 0;

    for (relative, content) in SCAFFOLD {
        let path = root.join(relative);
        if path.exists() && !overwrite {
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);

        written += 1;
    }

    Ok(written)
}

const DEFAULT_CONFIG: &str = r#"# wikiplum configuration

[site]
# Markdown sources
content_dir = "content"

# Output directory for the built site
build_dir = "build"

# Pages named like this never show up in the sidebar
root_page = "index"

[api]
host = "127.0.0.1"
port = 8080

# Read pages from the remote repository instead of content_dir
remote = false
default_branch = "main"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
---

# Welcome to your wiki

This site is built by **wikiplum** from the markdown files in `content/`.

Start with the [getting started](guide/getting-started.md) guide.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
author: wikiplum
---

# Getting Started

Every markdown file under `content/` becomes an HTML page under `build/`.
Links to other pages use their markdown names, like [home](../index.md).

## Building

```bash
wikiplum build
```

## Frontmatter API

```bash
wikiplum serve
curl http://127.0.0.1:8080/api/guide/getting-started
```
"#;

const DEFAULT_BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ meta.title or title }}</title>
  <link rel="stylesheet" href="{{ rel }}/static/style.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      <a class="home" href="{{ rel }}/index.html">Home</a>
      <ul>
      {% for item in sidebar %}
        <li><a href="{{ item.link }}">{{ item.title }}</a></li>
      {% endfor %}
      </ul>
    </nav>
    <main class="content">
      {% block content %}{% endblock %}
    </main>
  </div>
</body>
</html>
"#;

const DEFAULT_PAGE_TEMPLATE: &str = r#"{% extends "base.html" %}

{% block content %}
<article>
  {{ html }}
</article>
{% endblock %}
"#;

const DEFAULT_CSS: &str = r#"* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  color: #2b2233;
}

.layout {
  display: grid;
  grid-template-columns: 240px 1fr;
  min-height: 100vh;
}

.sidebar {
  padding: 1.5rem;
  background: #f4eef7;
  border-right: 1px solid #e0d4e8;
}

.sidebar ul {
  list-style: none;
  padding: 0;
}

.sidebar a {
  color: #6b3f86;
  text-decoration: none;
}

.content {
  padding: 2rem;
  max-width: 800px;
}

pre {
  background: #f5f5f5;
  padding: 1rem;
  border-radius: 0.5rem;
  overflow-x: auto;
}
"#;
