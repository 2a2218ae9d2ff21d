//! HTML minification of template sources and rendered output.

use minify_html::{minify, Cfg};

/// Minify an HTML fragment without disturbing document structure.
///
/// The configuration stays conservative: closing tags, doctypes, and attribute
/// spacing are preserved so minified output stays valid for fragments that are
/// stitched into larger documents. Brace template syntax survives, since this
/// also runs over unparsed sources when minify-on-load is enabled.
pub(crate) fn minify_fragment(input: &[u8]) -> Vec<u8> {
    let cfg = Cfg {
        keep_closing_tags: true,
        keep_html_and_head_opening_tags: true,
        keep_spaces_between_attributes: true,
        do_not_minify_doctype: true,
        ensure_spec_compliant_unquoted_attribute_values: true,
        preserve_brace_template_syntax: true,
        ..Cfg::default()
    };
    minify(input, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let input = b"<div>\n    <p>hello     there</p>\n</div>\n";
        let output = minify_fragment(input);
        assert!(output.len() < input.len());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("hello there"));
    }

    #[test]
    fn test_keeps_closing_tags() {
        let text = String::from_utf8(minify_fragment(b"<ul><li>one</li></ul>")).unwrap();
        assert!(text.contains("</li>"));
        assert!(text.contains("</ul>"));
    }
}
