//! HTML rendering of highlighted text
//!
//! Markup escaping is applied here, on top of the token kinds; the tokenizer
//! itself never escapes anything.

use super::tokens::Token;

/// Escape `&`, `<` and `>` for inclusion in HTML
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render tokens of `source` as inline-styled HTML spans
pub fn render_html(source: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for token in tokens {
        let text = escape_markup(token.text(source));
        match token.kind.html_color() {
            Some(color) => {
                out.push_str("<span style=\"color:");
                out.push_str(color);
                out.push_str("\">");
                out.push_str(&text);
                out.push_str("</span>");
            }
            None => out.push_str(&text),
        }
    }
    out
}

/// Standalone document wrapping the rendered code in a `<pre>` block
pub fn render_document(title: &str, source: &str, tokens: &[Token]) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body><pre style=\"font-family:Consolas,'Courier New',monospace\">{}</pre></body>\n</html>\n",
        escape_markup(title),
        render_html(source, tokens)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_render_html() {
        let source = "if (a < 1) x";
        let html = render_html(source, &tokenize(source, "js"));
        assert_eq!(
            html,
            "<span style=\"color:#0000ff\">if</span> (a &lt; \
             <span style=\"color:#098658\">1</span>) x"
        );
    }

    #[test]
    fn test_html_tags_escaped_inside_span() {
        let source = "<b>";
        let html = render_html(source, &tokenize(source, "html"));
        assert_eq!(html, "<span style=\"color:#267f99\">&lt;b&gt;</span>");
    }

    #[test]
    fn test_render_document() {
        let doc = render_document("a<b>.js", "x", &tokenize("x", "js"));
        assert!(doc.contains("<title>a&lt;b&gt;.js</title>"));
        assert!(doc.contains("<pre"));
    }
}
