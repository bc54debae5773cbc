//! Tests for tree construction.

use brindle_dom::serialize::{serialize, serialize_default};
use brindle_dom::{DomTree, NodeId, NodeKind, OutputSettings};
use brindle_html::{ErrorState, HtmlTreeBuilder, InsertionMode, parse, tree_dump, unescape};

/// First element named `tag` in document order.
fn element(tree: &DomTree, tag: &str) -> NodeId {
    tree.elements_by_tag_name(tree.root(), tag, None, None)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

/// Tag names (or `#text` / `#comment`) of the children of `id`.
fn child_names(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| match tree.get(child).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => data.tag_name.clone(),
            Some(NodeKind::Text(_)) => "#text".to_string(),
            Some(NodeKind::Comment(_)) => "#comment".to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

fn compact_html(tree: &DomTree) -> String {
    serialize(tree, tree.root(), &OutputSettings::default().pretty_print(false))
}

// ========== scenarios ==========

#[test]
fn test_paragraph_with_line_break() {
    let (tree, errors) = parse("<p>Hello<br>World</p>");
    assert!(errors.is_empty(), "{errors:?}");

    let p = element(&tree, "p");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["p"]);
    assert_eq!(child_names(&tree, p), vec!["#text", "br", "#text"]);

    let br = element(&tree, "br");
    assert!(tree.children(br).is_empty());
    assert!(tree.tags().lookup("br").is_self_closing);
    assert_eq!(tree.text(p), "Hello World");
}

#[test]
fn test_list_items_close_implicitly() {
    let (tree, errors) = parse("<ul><li>a<li>b</ul>");
    assert!(errors.is_empty(), "{errors:?}");

    let ul = element(&tree, "ul");
    assert_eq!(child_names(&tree, ul), vec!["li", "li"]);
    for &li in tree.children(ul) {
        assert_eq!(child_names(&tree, li), vec!["#text"]);
    }
}

#[test]
fn test_list_item_closes_open_paragraph_inside_it() {
    let (tree, errors) = parse("<ul><li><p>a<li>b</ul>");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(child_names(&tree, element(&tree, "ul")), vec!["li", "li"]);

    let (tree, _) = parse("<p>a<li>b");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["p", "li"]);
}

#[test]
fn test_definition_terms_close_each_other() {
    let (tree, errors) = parse("<dl><dt>a<dd>b<dt>c</dl>");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(child_names(&tree, element(&tree, "dl")), vec!["dt", "dd", "dt"]);
}

#[test]
fn test_table_rows_close_each_other() {
    let (tree, _) = parse("<table><tr><td>a</td><tr><td>b</td></table>");
    assert_eq!(child_names(&tree, element(&tree, "table")), vec!["tr", "tr"]);
}

#[test]
fn test_script_content_is_literal() {
    let (tree, errors) = parse("<script>if (a<b) {}</script>");
    assert!(errors.is_empty(), "{errors:?}");

    let script = element(&tree, "script");
    let children = tree.children(script);
    assert_eq!(children.len(), 1);
    let text = tree.as_text(children[0]).map(|t| (t.text.as_str(), t.escape));
    assert_eq!(text, Some(("if (a<b) {}", false)));
    assert_eq!(compact_html(&tree), "<script>if (a<b) {}</script>");
}

#[test]
fn test_script_survives_default_serialization() {
    let (tree, _) = parse("<script>// note\nrun()</script>");
    let html = serialize_default(&tree, tree.root());
    assert_eq!(html, "<script>// note\nrun()</script>");

    let (reparsed, _) = parse(&html);
    let script = element(&reparsed, "script");
    assert_eq!(
        reparsed.whole_text(reparsed.children(script)[0]),
        Some("// note\nrun()")
    );
}

#[test]
fn test_headings_do_not_nest() {
    let (tree, errors) = parse("<h1>A<h2>B</h2>");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["h1", "h2"]);

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Unexpected token [<h2>] when in state [InBody]"
    );
    assert_eq!(errors[0].state, ErrorState::TreeBuilder(InsertionMode::InBody));
}

#[test]
fn test_unmatched_end_tag_is_dropped() {
    let (tree, errors) = parse("<p>text</div>");
    let p = element(&tree, "p");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["p"]);
    assert_eq!(tree.text(p), "text");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position, 13);
    assert_eq!(
        errors[0].to_string(),
        "Unexpected token [</div>] when in state [InBody] at offset 13 in InBody"
    );
}

#[test]
fn test_errors_serialize_to_json() {
    let (_, errors) = parse("<p>text</div>");
    let json = serde_json::to_value(&errors[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "position": 13,
            "message": "Unexpected token [</div>] when in state [InBody]",
            "state": "InBody",
        })
    );
}

#[test]
fn test_misnested_end_tag_unwinds_to_match() {
    let (tree, errors) = parse("<div><span>x</div>y");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["div", "#text"]);
    assert_eq!(child_names(&tree, element(&tree, "div")), vec!["span"]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_adjacent_text_merges() {
    let (tree, errors) = parse("a</div>b");
    assert_eq!(errors.len(), 1);
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["#text"]);
    assert_eq!(tree.whole_text(tree.children(NodeId::ROOT)[0]), Some("ab"));
}

// ========== special tags ==========

#[test]
fn test_image_becomes_img() {
    let (tree, _) = parse("<image src=a.png>after");
    let img = element(&tree, "img");
    assert_eq!(tree.attr(img, "src"), Some("a.png"));
    assert!(tree.children(img).is_empty());
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["img", "#text"]);
}

#[test]
fn test_self_closing_tags_are_not_opened() {
    let (tree, errors) = parse("<x-icon/><div/>text");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(
        child_names(&tree, NodeId::ROOT),
        vec!["x-icon", "div", "#text"]
    );

    assert!(tree.tags().lookup("x-icon").is_self_closing);
    assert!(!tree.tags().lookup("div").is_self_closing);
    assert_eq!(compact_html(&tree), "<x-icon/><div></div>text");
}

#[test]
fn test_self_closing_tag_after_text_is_not_an_error() {
    let (tree, errors) = parse("a<br/>");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["#text", "br"]);

    let (_, errors) = parse("<p>x<x-icon/>y</p>");
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_self_closed_raw_text_element_still_takes_content() {
    let (tree, errors) = parse("<style/>a{}</style><p>x</p>");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["style", "p"]);
    assert_eq!(tree.text(element(&tree, "style")), "a{}");
}

#[test]
fn test_textarea_content_is_escaped_text() {
    let (tree, errors) = parse("<textarea>a<b>&amp;</textarea>");
    assert!(errors.is_empty(), "{errors:?}");

    let textarea = element(&tree, "textarea");
    assert_eq!(tree.value(textarea), "a<b>&");
    assert_eq!(compact_html(&tree), "<textarea>a&lt;b&gt;&amp;</textarea>");
}

#[test]
fn test_unclosed_script_at_end_of_input() {
    let (tree, errors) = parse("<script>var x");
    assert_eq!(tree.text(element(&tree, "script")), "var x");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected token [EOF] when in state [Text]");
    assert_eq!(errors[0].state, ErrorState::TreeBuilder(InsertionMode::Text));
}

#[test]
fn test_doctype_and_comments() {
    let (tree, errors) = parse("<!DOCTYPE html><p><!-- c -->x</p>");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(child_names(&tree, NodeId::ROOT), vec!["#text", "p"]);
    assert_eq!(child_names(&tree, element(&tree, "p")), vec!["#comment", "#text"]);
    assert_eq!(compact_html(&tree), "<!DOCTYPE html><p><!-- c -->x</p>");
}

#[test]
fn test_entities_in_text_and_attributes() {
    let (tree, _) = parse(r#"<p title="a&amp;b">1 &lt; 2</p>"#);
    let p = element(&tree, "p");
    assert_eq!(tree.attr(p, "title"), Some("a&b"));
    assert_eq!(tree.text(p), "1 < 2");
    assert_eq!(compact_html(&tree), r#"<p title="a&amp;b">1 &lt; 2</p>"#);
    assert_eq!(unescape("1 &lt; 2 &amp&c", false), "1 < 2 &&c");
}

// ========== whole documents ==========

#[test]
fn test_round_trip_of_canonical_markup() {
    let input = concat!(
        r#"<div id="a" class="b c"><p>Hello <b>bold</b> &amp; more</p>"#,
        r#"<img src="x.png"/><ul><li>one</li><li>two</li></ul></div>"#
    );
    let (tree, errors) = parse(input);
    assert!(errors.is_empty(), "{errors:?}");

    let html = compact_html(&tree);
    assert_eq!(html, input);

    let (reparsed, _) = parse(&html);
    assert_eq!(compact_html(&reparsed), html);
    assert_eq!(reparsed.text(reparsed.root()), tree.text(tree.root()));
}

#[test]
fn test_deep_nesting() {
    const DEPTH: usize = 10_000;
    let input = format!("{}x{}", "<div>".repeat(DEPTH), "</div>".repeat(DEPTH));
    let (tree, errors) = parse(&input);

    assert!(errors.is_empty());
    assert_eq!(
        tree.elements_by_tag_name(tree.root(), "div", None, None).len(),
        DEPTH
    );
    assert_eq!(tree.text(tree.root()), "x");
}

#[test]
fn test_malformed_input_still_builds_a_tree() {
    for input in [
        "",
        "<",
        "</",
        "<!",
        "<!--",
        "<a b='",
        "&#",
        "<!DOCTYPE",
        "<table><tr><td>",
        "<<<>>>",
        "</p></p><p",
        "<textarea>",
        "<script><!--<script>",
    ] {
        let (tree, _) = parse(input);
        assert!(matches!(
            tree.get(tree.root()).map(|n| &n.kind),
            Some(NodeKind::Document)
        ));
    }
}

#[test]
fn test_error_cap() {
    let (_, errors) = HtmlTreeBuilder::new("</a></b></c>")
        .with_max_errors(2)
        .run_with_errors();
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_tree_dump() {
    let (tree, _) = parse(r#"<p class="x">a b</p><!--c-->"#);
    assert_eq!(
        tree_dump(&tree, tree.root()),
        "Document\n  <p class=\"x\">\n    \"a\u{00B7}b\"\n  <!-- c -->\n"
    );
}
