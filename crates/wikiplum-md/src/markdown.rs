//! Markdown to HTML rendering.

use pulldown_cmark::{html, Options, Parser};

use crate::frontmatter::split_frontmatter;

/// Rewrite links to markdown sources so they point at the generated pages.
///
/// This is a plain substring replacement of `.md` with `.html` over the whole
/// document. It does not look at markdown structure, so prose and code that
/// mention `.md` are rewritten too (`see my.md file` becomes
/// `see my.html file`).
pub fn rewrite_md_links(source: &str) -> String {
    source.replace(".md", ".html")
}

/// Render a markdown document to an HTML fragment.
///
/// Links are rewritten with [`rewrite_md_links`] before conversion. A leading
/// block that parses as frontmatter is left out of the output; any other
/// `---` block is ordinary markdown. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD.
pub fn render_markdown(source: &[u8]) -> String {
    let source = String::from_utf8_lossy(source);
    let body = split_frontmatter(&source).map_or(&*source, |(_, body)| body);
    let content = rewrite_md_links(body);

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(&content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown() {
        let html = render_markdown(b"# Hello\n\nWorld");

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn rewrites_link_targets() {
        let html = render_markdown(b"[link](other.md)");

        assert!(html.contains(r#"<a href="other.html">link</a>"#));
    }

    #[test]
    fn rewrites_md_in_prose() {
        let html = render_markdown(b"see my.md file");

        assert!(html.contains("see my.html file"));
        assert!(!html.contains("my.md"));
    }

    #[test]
    fn rewrites_nested_links() {
        assert_eq!(
            rewrite_md_links("[a](guide/setup.md) and [b](../index.md)"),
            "[a](guide/setup.html) and [b](../index.html)"
        );
    }

    #[test]
    fn skips_frontmatter_block() {
        let html = render_markdown(b"---\ntitle: Hello\n---\n\nBody text");

        assert!(!html.contains("title: Hello"));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn renders_dash_block_that_is_not_frontmatter() {
        let html = render_markdown(b"---\ntitle: x\n\nBody para\n\n---\nmore");

        assert!(html.contains("<p>title: x</p>"));
        assert!(html.contains("<p>Body para</p>"));
        assert!(html.contains("<p>more</p>"));
    }

    #[test]
    fn replaces_invalid_utf8() {
        let html = render_markdown(b"# Caf\xe9\n");

        assert_eq!(html, "<h1>Caf\u{fffd}</h1>\n");
    }
}
