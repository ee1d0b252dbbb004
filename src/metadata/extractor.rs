//! HTML metadata extraction.
//!
//! [`extract`] turns a fetched document into a [`MetadataCandidate`] by running
//! three cascades over the parsed DOM:
//!
//! | Field       | Rules, in order                                                     |
//! |-------------|---------------------------------------------------------------------|
//! | title       | `og:title`, `twitter:title`, first `<h1>`, `<title>`, source URL    |
//! | favicon     | `rel="icon"`, `rel="shortcut icon"`, `rel="apple-touch-icon"`, `/favicon.ico` |
//! | description | `description`, `og:description`, `twitter:description`, empty       |
//!
//! Relative favicon references are made absolute against the source URL's
//! origin.

use linkmeta_common::MetadataCandidate;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::cascade::{first_present, Rule};

/// Favicon path used when the page declares none.
pub const DEFAULT_FAVICON_PATH: &str = "/favicon.ico";

const TITLE_RULES: &[Rule<Html>] = &[og_title, twitter_title, first_heading, title_element];

const FAVICON_RULES: &[Rule<Html>] = &[icon_link, shortcut_icon_link, apple_touch_icon_link];

const DESCRIPTION_RULES: &[Rule<Html>] =
    &[meta_description, og_description, twitter_description];

/// Extract title, favicon and description from `html` fetched from `source_url`.
///
/// Never fails. If `source_url` cannot be parsed the degraded candidate
/// `{title: source_url, favicon: "", description: ""}` is returned.
pub fn extract(html: &str, source_url: &str) -> MetadataCandidate {
    let source = match Url::parse(source_url) {
        Ok(url) => url,
        Err(e) => {
            debug!(stage = "extract", url = source_url, error = %e, "Unparseable source URL; degrading");
            return MetadataCandidate::degraded(source_url);
        }
    };

    let doc = Html::parse_document(html);

    let title = first_present(&doc, TITLE_RULES).unwrap_or_else(|| source_url.to_string());
    let favicon_href =
        first_present(&doc, FAVICON_RULES).unwrap_or_else(|| DEFAULT_FAVICON_PATH.to_string());
    let favicon = resolve_favicon(&favicon_href, &source);
    let description = first_present(&doc, DESCRIPTION_RULES).unwrap_or_default();

    debug!(
        stage = "extract",
        url = source_url,
        title = %title,
        favicon = %favicon,
        has_description = !description.is_empty(),
        "Extracted page metadata"
    );

    MetadataCandidate {
        title,
        favicon,
        description,
    }
}

/// Join the first `count` paragraphs longer than `min_chars` with a space.
///
/// Paragraph text is trimmed but otherwise kept verbatim. Returns `None` when
/// no paragraph qualifies.
pub fn extract_paragraphs(html: &str, min_chars: usize, count: usize) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("p").ok()?;

    let paragraphs: Vec<String> = doc
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| text.chars().count() > min_chars)
        .take(count)
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join(" "))
    }
}

/// Make a favicon reference absolute.
///
/// Absolute URLs pass through, scheme-relative ones take the source scheme,
/// and anything else is appended to the source origin (with a `/` inserted
/// when the reference lacks one). Returns an empty string when the source has
/// no usable origin.
pub fn resolve_favicon(href: &str, source: &Url) -> String {
    let href = href.trim();

    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    if href.starts_with("//") {
        return format!("{}:{}", source.scheme(), href);
    }

    let origin = source.origin();
    if !origin.is_tuple() {
        return String::new();
    }
    let origin = origin.ascii_serialization();

    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn og_title(doc: &Html) -> Option<String> {
    meta_content(doc, r#"meta[property="og:title"]"#)
}

fn twitter_title(doc: &Html) -> Option<String> {
    meta_content(doc, r#"meta[name="twitter:title"]"#)
}

fn first_heading(doc: &Html) -> Option<String> {
    element_text(doc, "h1")
}

fn title_element(doc: &Html) -> Option<String> {
    element_text(doc, "title")
}

fn icon_link(doc: &Html) -> Option<String> {
    link_href(doc, r#"link[rel="icon"]"#)
}

fn shortcut_icon_link(doc: &Html) -> Option<String> {
    link_href(doc, r#"link[rel="shortcut icon"]"#)
}

fn apple_touch_icon_link(doc: &Html) -> Option<String> {
    link_href(doc, r#"link[rel="apple-touch-icon"]"#)
}

fn meta_description(doc: &Html) -> Option<String> {
    meta_content(doc, r#"meta[name="description"]"#)
}

fn og_description(doc: &Html) -> Option<String> {
    meta_content(doc, r#"meta[property="og:description"]"#)
}

fn twitter_description(doc: &Html) -> Option<String> {
    meta_content(doc, r#"meta[name="twitter:description"]"#)
}

/// `attr` of the first element matching `selector`, trimmed.
fn first_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector)
        .next()?
        .value()
        .attr(attr)
        .map(|v| v.trim().to_string())
}

fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    first_attr(doc, selector, "content")
}

fn link_href(doc: &Html, selector: &str) -> Option<String> {
    first_attr(doc, selector, "href")
}

fn element_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let text = doc.select(&selector).next()?.text().collect::<String>();
    Some(text.trim().to_string())
}
