//! Integration tests for the HTML parser.

use thicket_dom::{CommentKind, NodeId, NodeKind, TagKind};
use thicket_html::{Document, IssueKind, ParserSettings};

/// Helper to get the first element with the given tag name, depth-first.
fn first(doc: &Document, tag: &str) -> NodeId {
    doc.get_elements_by_tag_name(tag, true)[0]
}

/// Helper to get the kinds of a node's children.
fn child_kinds(doc: &Document, id: NodeId) -> Vec<NodeKind> {
    doc.tree()
        .children(id)
        .iter()
        .map(|&child| doc.tree()[child].kind.clone())
        .collect()
}

fn issue_kinds(doc: &Document) -> Vec<IssueKind> {
    doc.issues().iter().map(|issue| issue.kind).collect()
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_well_formed_markup_round_trips() {
    let html = "<html><head><title>T</title></head>\
                <body><p class=\"a\">x &amp; y</p><!-- c --></body></html>";
    let doc = Document::new(html);

    assert_eq!(doc.outer_html(), html);
    assert_eq!(doc.to_string(), html);
    assert!(doc.issues().is_empty());
}

#[test]
fn test_every_node_belongs_to_the_document() {
    let doc = Document::new("<ul><li>a</li><li>b<br></li></ul>");
    let br = first(&doc, "br");
    assert_eq!(doc.tree().document(br), Some(NodeId::ROOT));
    assert_eq!(doc.tree().ancestors(br).count(), 3);
}

// =============================================================================
// Void and self-closing elements
// =============================================================================

#[test]
fn test_void_element_becomes_unpaired() {
    let doc = Document::new("<img src=\"a.png\">");
    let img = first(&doc, "img");

    assert_eq!(doc.outer_html(), "<img src=\"a.png\" />");
    assert!(doc.tree().children(img).is_empty());

    let reparsed = Document::new(&doc.outer_html());
    assert_eq!(reparsed.outer_html(), "<img src=\"a.png\" />");
    assert!(reparsed.tree().children(first(&reparsed, "img")).is_empty());
}

#[test]
fn test_void_element_inside_text() {
    let doc = Document::new("<p>a<br>b</p>");
    assert_eq!(doc.outer_html(), "<p>a<br />b</p>");
    assert_eq!(doc.inner_text(), "ab");
}

#[test]
fn test_explicitly_closed_void_element_is_paired() {
    let doc = Document::new("<br></br>");
    let br = first(&doc, "br");
    assert_eq!(
        doc.tree().as_tag(br).map(|tag| tag.kind),
        Some(TagKind::Paired { closed: true })
    );
    assert_eq!(doc.outer_html(), "<br></br>");
}

#[test]
fn test_self_closing_syntax_on_any_element() {
    let doc = Document::new("<div/><span class=x />");
    assert_eq!(doc.outer_html(), "<div /><span class=\"x\" />");
}

#[test]
fn test_unquoted_value_ending_in_slash_gt() {
    let doc = Document::new("<a href=/x/>");
    assert_eq!(doc.outer_html(), "<a href=\"/x\" />");
}

// =============================================================================
// Closing-tag resolution
// =============================================================================

#[test]
fn test_orphan_closing_tag_is_recovered_in_place() {
    let doc = Document::new("<div>text</span></div>");
    let div = first(&doc, "div");

    assert!(doc.tree().as_tag(div).is_some_and(|tag| tag.is_closed()));
    assert_eq!(
        child_kinds(&doc, div),
        vec![
            NodeKind::Text("text".to_string()),
            NodeKind::Comment(CommentKind::Recovery, "</span>".to_string()),
        ]
    );
    assert_eq!(doc.issues().len(), 1);
    assert_eq!(doc.issues()[0].kind, IssueKind::OrphanClosingTag);
    assert_eq!(doc.issues()[0].position, 9);
    assert_eq!(doc.issues()[0].fragment, "</span>");
    assert_eq!(doc.outer_html(), "<div>text</span></div>");
}

#[test]
fn test_closing_an_ancestor_unwinds_open_children() {
    let doc = Document::new("<a><b>text</a>after");
    let a = first(&doc, "a");
    let b = first(&doc, "b");

    assert!(doc.tree().as_tag(a).is_some_and(|tag| tag.is_closed()));
    assert!(doc.tree().as_tag(b).is_some_and(|tag| !tag.is_closed()));
    assert_eq!(doc.tree().children(NodeId::ROOT).len(), 2);
    assert_eq!(doc.outer_html(), "<a><b>text</a>after");
    assert!(doc.issues().is_empty());
}

#[test]
fn test_late_close_of_unwound_element_is_absorbed() {
    let doc = Document::new("<a><b></a></b>x");
    let b = first(&doc, "b");

    assert!(doc.tree().as_tag(b).is_some_and(|tag| tag.is_closed()));
    assert_eq!(doc.outer_html(), "<a><b></b></a>x");
    assert!(doc.issues().is_empty());
}

#[test]
fn test_closing_tag_names_match_exactly() {
    let doc = Document::new("<div>x</DIV>");
    let div = first(&doc, "div");

    assert!(doc.tree().as_tag(div).is_some_and(|tag| !tag.is_closed()));
    assert_eq!(issue_kinds(&doc), vec![IssueKind::OrphanClosingTag]);
}

#[test]
fn test_closing_tag_with_trailing_junk() {
    let doc = Document::new("<p>x</p foo>y");
    assert!(doc.tree().as_tag(first(&doc, "p")).is_some_and(|tag| tag.is_closed()));
    assert_eq!(doc.inner_text(), "xy");
}

#[test]
fn test_unclosed_elements_serialize_without_closing_tag() {
    let doc = Document::new("<ul><li>one<li>two");
    assert_eq!(doc.outer_html(), "<ul><li>one<li>two");
    assert_eq!(doc.get_elements_by_tag_name("li", true).len(), 2);
    assert_eq!(doc.get_elements_by_tag_name("li", false).len(), 0);
}

// =============================================================================
// Raw-text elements
// =============================================================================

#[test]
fn test_script_body_is_not_parsed_as_markup() {
    let doc = Document::new("<script>var x = '<div>'; </script>");
    let script = first(&doc, "script");

    assert!(doc.get_elements_by_tag_name("div", true).is_empty());
    assert_eq!(
        child_kinds(&doc, script),
        vec![NodeKind::PlainText("var x = '<div>'; ".to_string())]
    );
    assert_eq!(
        doc.tree().as_tag(script).map(|tag| tag.kind),
        Some(TagKind::RawText { closed: true })
    );
    assert_eq!(doc.outer_html(), "<script>var x = '<div>'; </script>");
}

#[test]
fn test_script_text_is_not_decoded() {
    let doc = Document::new("<script>s = \"&amp;\"; // &lt;\n</script>");
    let script = first(&doc, "script");
    assert_eq!(doc.tree().inner_text(script), "s = \"&amp;\"; // &lt;\n");
}

#[test]
fn test_style_block_comments() {
    let doc = Document::new("<style>p { color: red; } /* <b> */</style><b>x</b>");
    let style = first(&doc, "style");

    assert_eq!(
        child_kinds(&doc, style),
        vec![
            NodeKind::PlainText("p { color: red; } ".to_string()),
            NodeKind::Comment(CommentKind::StyleBlock, " <b> ".to_string()),
        ]
    );
    assert_eq!(doc.get_elements_by_tag_name("b", true).len(), 1);
}

#[test]
fn test_unterminated_script_runs_to_end() {
    let doc = Document::new("<script>x = 1;");
    let script = first(&doc, "script");

    assert!(doc.tree().as_tag(script).is_some_and(|tag| !tag.is_closed()));
    assert_eq!(issue_kinds(&doc), vec![IssueKind::UnterminatedRawText]);
    assert_eq!(doc.outer_html(), "<script>x = 1;");
}

// =============================================================================
// Comments and declarations
// =============================================================================

#[test]
fn test_service_nodes_and_names() {
    let doc = Document::new("<?xml version=\"1.0\"?><!DOCTYPE html><p>x</p>");
    let children = doc.tree().children(NodeId::ROOT);

    assert_eq!(doc.tree()[children[0]].service_name(), Some("xml"));
    assert_eq!(doc.tree()[children[1]].service_name(), Some("DOCTYPE"));
    assert_eq!(doc.tree()[children[2]].service_name(), None);
    assert_eq!(doc.outer_html(), "<?xml version=\"1.0\"?><!DOCTYPE html><p>x</p>");
}

#[test]
fn test_comment_without_dashes_ends_at_gt() {
    let doc = Document::new("<!-- a > b");
    assert_eq!(
        child_kinds(&doc, NodeId::ROOT),
        vec![
            NodeKind::Comment(CommentKind::Markup, " a ".to_string()),
            NodeKind::Text(" b".to_string()),
        ]
    );
    assert_eq!(issue_kinds(&doc), vec![IssueKind::UnterminatedComment]);
}

#[test]
fn test_comment_hides_markup() {
    let doc = Document::new("<!-- <p>x</p> -->");
    assert!(doc.get_elements_by_tag_name("p", true).is_empty());
    assert_eq!(doc.inner_text(), "");
}

#[test]
fn test_bogus_declaration_is_recovered() {
    let doc = Document::new("<!foo>x");
    assert_eq!(
        child_kinds(&doc, NodeId::ROOT),
        vec![
            NodeKind::Comment(CommentKind::Recovery, "<!foo>".to_string()),
            NodeKind::Text("x".to_string()),
        ]
    );
    assert_eq!(issue_kinds(&doc), vec![IssueKind::BogusComment]);
    assert_eq!(doc.outer_html(), "<!foo>x");
}

// =============================================================================
// Malformed tags and text
// =============================================================================

#[test]
fn test_truncated_tag_at_end_of_input() {
    let doc = Document::new("<p>a<b");
    let p = first(&doc, "p");

    assert_eq!(
        child_kinds(&doc, p),
        vec![
            NodeKind::Text("a".to_string()),
            NodeKind::Comment(CommentKind::Recovery, "<b".to_string()),
        ]
    );
    assert_eq!(issue_kinds(&doc), vec![IssueKind::TruncatedTag]);
    assert_eq!(doc.issues()[0].position, 4);
    assert_eq!(doc.outer_html(), "<p>a<b");
}

#[test]
fn test_tag_interrupted_by_another_tag() {
    let doc = Document::new("<div class=\"x\"<p>y</p>");
    assert!(doc.get_elements_by_tag_name("div", true).is_empty());
    assert_eq!(doc.get_elements_by_tag_name("p", true).len(), 1);
    assert_eq!(issue_kinds(&doc), vec![IssueKind::TruncatedTag]);
    assert_eq!(doc.outer_html(), "<div class=\"x\"<p>y</p>");
}

#[test]
fn test_stray_less_than_is_text() {
    let doc = Document::new("a < b <3");
    assert_eq!(
        child_kinds(&doc, NodeId::ROOT),
        vec![NodeKind::Text("a < b <3".to_string())]
    );
    assert!(doc.issues().is_empty());
}

#[test]
fn test_inner_text_decodes_entities() {
    let doc = Document::new("<p>Tom &amp; Jerry &lt;3 &#169;</p>");
    assert_eq!(doc.inner_text(), "Tom & Jerry <3 \u{00A9}");
}

#[test]
fn test_non_ascii_text_and_attributes() {
    let doc = Document::new("<p title=\"café\">naïve → ok</p>");
    let p = first(&doc, "p");
    assert_eq!(
        doc.tree().as_tag(p).and_then(|tag| tag.attributes.value("title")),
        Some("café")
    );
    assert_eq!(doc.inner_text(), "naïve → ok");
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_duplicate_attribute_keeps_first() {
    let doc = Document::new("<a href=\"1\" href=\"2\">x</a>");
    let a = first(&doc, "a");
    let tag = doc.tree().as_tag(a).unwrap();

    assert_eq!(tag.attributes.len(), 1);
    assert_eq!(tag.attributes.value("href"), Some("1"));
}

#[test]
fn test_attribute_forms() {
    let doc = Document::new("<input type=checkbox checked data-q='say \"hi\"' x = \"y\">");
    assert_eq!(
        doc.outer_html(),
        "<input checked data-q='say \"hi\"' type=\"checkbox\" x=\"y\" />"
    );
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_whitespace_collapsing() {
    let settings = ParserSettings::default().with_remove_white_spaces(true);
    let doc = Document::with_settings("a   b\r\n\r\nc", settings);
    assert_eq!(doc.inner_text(), "a b\r\nc");
}

#[test]
fn test_whitespace_kept_by_default() {
    let doc = Document::new("a   b");
    assert_eq!(doc.inner_text(), "a   b");
}

#[test]
fn test_whitespace_collapsing_leaves_script_alone() {
    let settings = ParserSettings::default().with_remove_white_spaces(true);
    let doc = Document::with_settings("<p>a  b</p><script>x  =  1</script>", settings);
    assert_eq!(doc.outer_html(), "<p>a b</p><script>x  =  1</script>");
}

#[test]
fn test_remove_comments_does_not_change_the_tree() {
    let html = "<!-- c --><p>x<!-- d --></p>";
    let settings = ParserSettings::default().with_remove_comments(true);
    let with_flag = Document::with_settings(html, settings);
    let without_flag = Document::new(html);

    assert_eq!(with_flag.outer_html(), without_flag.outer_html());
    assert_eq!(with_flag.outer_html(), html);
}

#[test]
fn test_settings_from_json_drive_the_parse() {
    let settings = ParserSettings::from_json(r#"{"remove_white_spaces": true}"#).unwrap();
    let doc = Document::with_settings("x \t y", settings);
    assert_eq!(doc.settings(), settings);
    assert_eq!(doc.inner_text(), "x y");
}

// =============================================================================
// Deep nesting
// =============================================================================

const DEPTH: usize = 100_000;

#[test]
fn test_deeply_nested_divs_round_trip() {
    let html = "<div>".repeat(DEPTH) + &"</div>".repeat(DEPTH);
    let doc = Document::new(&html);

    assert_eq!(doc.outer_html(), html);
    assert_eq!(doc.get_elements_by_tag_name("div", true).len(), DEPTH);
    assert_eq!(doc.get_elements_by_tag_name("div", false).len(), 1);
    assert_eq!(doc.inner_text(), "");
    assert!(doc.issues().is_empty());
}

#[test]
fn test_deeply_nested_unclosed_divs() {
    let html = "<div>".repeat(DEPTH) + "x";
    let doc = Document::new(&html);

    assert_eq!(doc.outer_html(), html);
    assert_eq!(doc.inner_text(), "x");
    let divs = doc.get_elements_by_tag_name("div", true);
    let innermost = divs[DEPTH - 1];
    // Every div plus the Document.
    assert_eq!(doc.tree().ancestors(innermost).count(), DEPTH);
    assert!(!doc.tree().as_tag(innermost).unwrap().is_closed());
}

#[test]
fn test_ancestor_close_unwinds_deep_nesting() {
    let html = "<section>".to_string() + &"<div>".repeat(DEPTH) + "</section>after";
    let doc = Document::new(&html);

    assert_eq!(doc.outer_html(), html);
    let tail = *doc.tree().children(doc.root()).last().unwrap();
    assert_eq!(doc.tree()[tail].kind, NodeKind::Text("after".to_string()));
}
