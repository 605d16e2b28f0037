//! Markdown rendering with table-of-contents extraction.
//!
//! Uses pulldown-cmark directly for markdown → HTML conversion. Headings get
//! slugified `id` anchors, and a separate TOC fragment is built from the
//! headings whose level falls inside the configured depth range. Conversion
//! happens fresh on every render; nothing is cached.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html::push_html};

/// Heading-depth range included in the TOC, inclusive on both ends.
///
/// Roadmap page bodies use 2–2 (h2 only); roadmap intros use 2–3. The two
/// call sites genuinely differ, see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocDepth {
    pub min: u8,
    pub max: u8,
}

impl TocDepth {
    /// h2 only.
    pub const H2: TocDepth = TocDepth { min: 2, max: 2 };
    /// h2 through h3.
    pub const H2_H3: TocDepth = TocDepth { min: 2, max: 3 };

    fn contains(&self, level: u8) -> bool {
        level >= self.min && level <= self.max
    }
}

/// A heading collected while walking the event stream.
struct TocEntry {
    level: u8,
    slug: String,
    text: String,
}

/// Convert markdown to `(body_html, toc_html)`.
///
/// Body rendering enables tables, strikethrough and task lists (fenced code
/// is core CommonMark). Every heading receives a slugified `id`; the TOC
/// fragment only lists headings inside `depth`.
pub fn render_markdown_with_toc(text: &str, depth: TocDepth) -> (String, String) {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(text, options);

    let mut events: Vec<Event<'_>> = Vec::new();
    let mut toc: Vec<TocEntry> = Vec::new();
    let mut used_slugs: Vec<String> = Vec::new();

    let mut in_heading: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut heading_events: Vec<Event<'_>> = Vec::new();

    for event in parser {
        match &event {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = Some(*level);
                heading_text.clear();
                heading_events.clear();
                heading_events.push(event);
            }
            Event::End(TagEnd::Heading(level)) if in_heading == Some(*level) => {
                let level_num = heading_level_num(*level);
                let slug = unique_slug(&heading_text, &mut used_slugs);

                if slug.is_empty() {
                    events.extend(heading_events.drain(..));
                    events.push(event);
                } else {
                    events.push(Event::Html(
                        format!("<h{} id=\"{}\">", level_num, slug).into(),
                    ));
                    // Inner events minus the buffered Start(Heading).
                    for e in heading_events.drain(..).skip(1) {
                        events.push(e);
                    }
                    events.push(Event::Html(format!("</h{}>", level_num).into()));

                    if depth.contains(level_num) {
                        toc.push(TocEntry {
                            level: level_num,
                            slug,
                            text: heading_text.clone(),
                        });
                    }
                }
                in_heading = None;
            }
            Event::Text(text) if in_heading.is_some() => {
                heading_text.push_str(text);
                heading_events.push(event);
            }
            Event::Code(code) if in_heading.is_some() => {
                heading_text.push_str(code);
                heading_events.push(event);
            }
            _ if in_heading.is_some() => {
                heading_events.push(event);
            }
            _ => {
                events.push(event);
            }
        }
    }

    let mut html = String::with_capacity(text.len() * 2);
    push_html(&mut html, events.into_iter());

    (html, build_toc_html(&toc))
}

fn heading_level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Slugify text for use as an HTML id attribute.
///
/// Lowercases, replaces non-alphanumeric runs with hyphens, strips
/// leading/trailing hyphens. Shared with model slug derivation.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true; // suppress leading hyphen
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slugify and disambiguate against earlier headings in the same document
/// (`intro`, `intro-1`, `intro-2`, ...).
fn unique_slug(text: &str, used: &mut Vec<String>) -> String {
    let base = slugify(text);
    if base.is_empty() {
        return base;
    }
    let mut candidate = base.clone();
    let mut n = 0usize;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    used.push(candidate.clone());
    candidate
}

/// Build the nested `<ul>` TOC fragment from the collected headings.
///
/// Levels nest relative to the shallowest collected heading; the whole
/// fragment is wrapped in `<div class="toc">`. Empty input yields an empty
/// string so templates can test for presence.
fn build_toc_html(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let base = entries.iter().map(|e| e.level).min().unwrap_or(2);
    let mut html = String::from("<div class=\"toc\"><ul>");
    let mut current = base;
    let mut first = true;

    for entry in entries {
        // The first item has no open <li> to nest inside, so its level is
        // clamped to the base; later items can only nest under an open item.
        let level = if first { base } else { entry.level.max(base) };
        if level > current {
            // Deeper: nest inside the still-open <li>.
            for _ in current..level {
                html.push_str("<ul>");
            }
            current = level;
        } else if !first {
            // Sibling or shallower: close the previous item, unwinding any
            // nested lists on the way up.
            html.push_str("</li>");
            while current > level {
                html.push_str("</ul></li>");
                current -= 1;
            }
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            entry.slug,
            escape_html(&entry.text)
        ));
        first = false;
    }

    html.push_str("</li>");
    while current > base {
        html.push_str("</ul></li>");
        current -= 1;
    }
    html.push_str("</ul></div>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let (html, toc) = render_markdown_with_toc("# Hello\n\nWorld", TocDepth::H2_H3);
        assert!(html.contains(r#"<h1 id="hello">"#));
        assert!(html.contains("<p>World</p>"));
        // h1 is outside the 2-3 range.
        assert_eq!(toc, "");
    }

    #[test]
    fn test_toc_depth_restriction() {
        let md = "## Setup\n\n### Install\n\n#### Deep\n\ntext";
        let (_, toc) = render_markdown_with_toc(md, TocDepth::H2_H3);
        assert!(toc.contains(r##"<a href="#setup">Setup</a>"##));
        assert!(toc.contains(r##"<a href="#install">Install</a>"##));
        assert!(!toc.contains("Deep"));

        let (_, toc_h2) = render_markdown_with_toc(md, TocDepth::H2);
        assert!(toc_h2.contains("Setup"));
        assert!(!toc_h2.contains("Install"));
    }

    #[test]
    fn test_toc_nesting() {
        let md = "## A\n\n### A1\n\n### A2\n\n## B\n";
        let (_, toc) = render_markdown_with_toc(md, TocDepth::H2_H3);
        assert!(toc.starts_with("<div class=\"toc\"><ul>"));
        assert!(toc.ends_with("</ul></div>"));
        // A's children sit in a nested list that closes before B starts.
        let a2 = toc.find("A2").unwrap();
        let b = toc.find(">B<").unwrap();
        assert!(a2 < b);
        assert!(toc[a2..b].contains("</ul>"));
    }

    #[test]
    fn test_toc_first_heading_deeper_than_later() {
        // A document can open on an h3 before its first h2; the TOC must
        // stay balanced instead of nesting a list with no open item.
        let md = "### Deep First\n\n## Shallow Later\n";
        let (_, toc) = render_markdown_with_toc(md, TocDepth::H2_H3);

        assert_eq!(toc.matches("<li>").count(), toc.matches("</li>").count());
        assert_eq!(toc.matches("<ul>").count(), toc.matches("</ul>").count());
        assert!(toc.contains(r##"<a href="#deep-first">Deep First</a>"##));
        assert!(toc.contains(r##"<a href="#shallow-later">Shallow Later</a>"##));
        // The leading deep heading sits at the top level, not inside a
        // phantom nested list.
        assert!(!toc.contains("<ul><ul>"));
    }

    #[test]
    fn test_heading_anchor_ids() {
        let (html, _) = render_markdown_with_toc("## Hello World\n", TocDepth::H2);
        assert!(html.contains(r#"<h2 id="hello-world">"#));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let (html, _) = render_markdown_with_toc("## Intro\n\n## Intro\n", TocDepth::H2);
        assert!(html.contains(r#"<h2 id="intro">"#));
        assert!(html.contains(r#"<h2 id="intro-1">"#));
    }

    #[test]
    fn test_fenced_code_and_tables() {
        let md = "```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let (html, _) = render_markdown_with_toc(md, TocDepth::H2);
        assert!(html.contains("<code"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_empty_input() {
        let (html, toc) = render_markdown_with_toc("", TocDepth::H2);
        assert_eq!(html, "");
        assert_eq!(toc, "");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Leading & Trailing  "), "leading-trailing");
        assert_eq!(slugify("CamelCase123"), "camelcase123");
        assert_eq!(slugify("!!!"), "");
    }
}
