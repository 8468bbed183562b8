use scraper::Html;

/// Turns user text into something safe to store and display.
///
/// `clean` makes raw input safe to keep, `render` produces the HTML shown on
/// topic pages. Markup languages (BBCode and friends) plug in here.
pub trait ContentRenderer: Send + Sync {
    fn clean(&self, raw: &str) -> String;
    fn render(&self, safe: &str) -> String;
}

/// Default renderer: HTML-escapes everything and keeps line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapingRenderer;

impl ContentRenderer for EscapingRenderer {
    fn clean(&self, raw: &str) -> String {
        html_escape::encode_safe(raw).into_owned()
    }

    fn render(&self, safe: &str) -> String {
        safe.lines().collect::<Vec<_>>().join("<br />")
    }
}

/// Removes markup tags and keeps their text.
///
/// The parser decodes entities, so angle brackets that were escaped in the
/// input are escaped again; the result never contains a tag.
pub fn strip_tags(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment
        .root_element()
        .text()
        .flat_map(str::chars)
        .fold(String::with_capacity(raw.len()), |mut out, c| {
            match c {
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
            out
        })
}

/// A post body must contain something other than whitespace.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}
