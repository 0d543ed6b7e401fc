//! HTML fragment output for rendered block nodes.

use crate::core::markdown::BlockNode;

/// Escape text for use inside an HTML element
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Serialize nodes to a single HTML fragment with the preview stylesheet's classes
pub fn to_html(nodes: &[BlockNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            BlockNode::Heading { level, text } => {
                out.push_str(&format!(
                    "<h{level} class=\"text-h{level}\">{}</h{level}>",
                    escape(text)
                ));
            }
            BlockNode::Paragraph(text) => {
                out.push_str(&format!("<p class=\"text-body\">{}</p>", escape(text)));
            }
            BlockNode::Break => out.push_str("<br />"),
            BlockNode::ListOpen(kind) => {
                out.push_str(&format!("<{tag} class=\"markdown-{tag}\">", tag = kind.tag()));
            }
            BlockNode::ListItem(text) => {
                out.push_str(&format!("<li class=\"markdown-li\">{}</li>", escape(text)));
            }
            BlockNode::ListClose(kind) => {
                out.push_str(&format!("</{}>", kind.tag()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markdown::render;

    #[test]
    fn test_list_and_heading_markup() {
        let html = to_html(&render("- a\n# Title"));
        assert_eq!(
            html,
            "<ul class=\"markdown-ul\"><li class=\"markdown-li\">a</li></ul>\
             <h1 class=\"text-h1\">Title</h1>"
        );
    }

    #[test]
    fn test_paragraph_break_and_ordered() {
        let html = to_html(&render("intro\n\n1. x"));
        assert_eq!(
            html,
            "<p class=\"text-body\">intro</p><br /><ol class=\"markdown-ol\">\
             <li class=\"markdown-li\">x</li></ol>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = to_html(&render("<b>&\"x\"</b>"));
        assert_eq!(
            html,
            "<p class=\"text-body\">&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;</p>"
        );
    }
}
