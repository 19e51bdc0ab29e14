//! Submission → list item markup

use crate::config::PROFILE_BASE_URL;
use crate::domain::models::SubmissionEvent;

/// How event fields are interpolated into the fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    /// Fields are HTML-escaped before interpolation
    #[default]
    Escaped,
    /// Fields are interpolated as received (matches the legacy content script)
    Verbatim,
}

impl Markup {
    pub fn render(&self, event: &SubmissionEvent) -> String {
        match self {
            Markup::Escaped => render_escaped(event),
            Markup::Verbatim => render(event),
        }
    }
}

/// Render a submission with every field substituted verbatim
pub fn render(event: &SubmissionEvent) -> String {
    build_fragment(
        &event.item.thumbnail.src,
        &event.item.href,
        &event.item.title,
        &event.user.name,
    )
}

/// Render a submission with every field HTML-escaped
pub fn render_escaped(event: &SubmissionEvent) -> String {
    build_fragment(
        &escape_html(&event.item.thumbnail.src),
        &escape_html(&event.item.href),
        &escape_html(&event.item.title),
        &escape_html(&event.user.name),
    )
}

fn build_fragment(src: &str, href: &str, title: &str, author: &str) -> String {
    let mut html = String::with_capacity(
        192 + src.len() + href.len() + title.len() + 2 * author.len(),
    );
    html.push_str("<li>");
    html.push_str("<img src=\"");
    html.push_str(src);
    html.push_str("\">");
    html.push_str("<p>");
    html.push_str("<a target=\"_new\" href=\"");
    html.push_str(href);
    html.push_str("\">");
    html.push_str(title);
    html.push_str("</a>");
    html.push_str("</p>");
    html.push_str("<div class=\"meta\">");
    html.push_str("<span class=\"author\">submitted by <a href=\"");
    html.push_str(PROFILE_BASE_URL);
    html.push_str(author);
    html.push_str("\">");
    html.push_str(author);
    html.push_str("</a></span>");
    html.push_str("</div>");
    html.push_str("</li>");
    html
}

/// Escape text for use in element content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
