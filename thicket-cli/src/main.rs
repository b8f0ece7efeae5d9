//! Thicket CLI
//!
//! Parse an HTML file or string and inspect the resulting tree.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;
use thicket_dom::{CommentKind, DomTree, NodeId, NodeKind, TagKind};
use thicket_html::{Document, IssueKind, ParserSettings, print_tree};

/// Thicket - parse HTML and inspect the document tree
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    thicket ./index.html

    # Parse inline HTML and print its text
    thicket --html '<p>Tom &amp; Jerry</p>' --inner-text

    # Find every element with class "note", direct children only
    thicket page.html --by-class note --shallow

    # Dump the tree as JSON
    thicket page.html --json
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Collapse whitespace runs in text nodes
    #[arg(short = 'w', long)]
    remove_whitespace: bool,

    /// Load parser settings from a JSON file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Print the serialized markup
    #[arg(long)]
    outer_html: bool,

    /// Print the decoded text
    #[arg(long)]
    inner_text: bool,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the markup errors recovered while parsing
    #[arg(long)]
    issues: bool,

    /// Find elements by `id`
    #[arg(long, value_name = "ID")]
    by_id: Option<String>,

    /// Find elements by class
    #[arg(long, value_name = "CLASS")]
    by_class: Option<String>,

    /// Find elements by tag name (case-insensitive)
    #[arg(long, value_name = "TAG")]
    by_tag: Option<String>,

    /// Find elements by `name` attribute
    #[arg(long, value_name = "NAME")]
    by_name: Option<String>,

    /// Find elements carrying an attribute, optionally with a given value
    #[arg(long, value_name = "NAME[=VALUE]")]
    by_attr: Option<String>,

    /// Only search the document's direct children
    #[arg(long)]
    shallow: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    let html = load_source(&cli)?;
    let doc = Document::with_settings(&html, settings);

    let queries = run_queries(&cli, &doc);
    let printed_queries = !queries.is_empty();
    for (label, matches) in queries {
        print_matches(&doc, &label, &matches);
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&node_to_json(doc.tree(), doc.root()))?;
        println!("{json}");
    }
    if cli.outer_html {
        println!("{}", doc.outer_html());
    }
    if cli.inner_text {
        println!("{}", doc.inner_text());
    }
    if cli.issues {
        print_issues(&doc);
    }

    if !(printed_queries || cli.json || cli.outer_html || cli.inner_text || cli.issues) {
        print_document(&doc);
    }

    Ok(())
}

/// Settings from `--settings`, then `--remove-whitespace` on top.
fn load_settings(cli: &Cli) -> Result<ParserSettings> {
    let mut settings = match cli.settings {
        Some(ref path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            ParserSettings::from_json(&json)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => ParserSettings::default(),
    };
    if cli.remove_whitespace {
        settings = settings.with_remove_white_spaces(true);
    }
    Ok(settings)
}

/// Load the HTML source from CLI arguments
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("expected a file path or --html")
    }
}

fn run_queries(cli: &Cli, doc: &Document) -> Vec<(String, Vec<NodeId>)> {
    let recursive = !cli.shallow;
    let mut results = Vec::new();

    if let Some(ref id) = cli.by_id {
        results.push((format!("id={id}"), doc.get_elements_by_id(id, recursive)));
    }
    if let Some(ref class) = cli.by_class {
        results.push((
            format!("class={class}"),
            doc.get_elements_by_class_name(class, recursive),
        ));
    }
    if let Some(ref tag) = cli.by_tag {
        results.push((format!("tag={tag}"), doc.get_elements_by_tag_name(tag, recursive)));
    }
    if let Some(ref name) = cli.by_name {
        results.push((format!("name={name}"), doc.get_elements_by_name(name, recursive)));
    }
    if let Some(ref attr) = cli.by_attr {
        let matches = match attr.split_once('=') {
            Some((name, value)) => {
                doc.get_elements_by_attribute_name_value(name, value, recursive)
            }
            None => doc.get_elements_by_attribute_name(attr, recursive),
        };
        results.push((format!("attr {attr}"), matches));
    }
    results
}

fn print_matches(doc: &Document, label: &str, matches: &[NodeId]) {
    println!(
        "{}",
        format!("=== Matches for {label} ({}) ===", matches.len()).bold()
    );
    for &id in matches {
        println!("{}", doc.tree().outer_html(id));
    }
}

/// Print the tree, and the recovered errors if there were any
fn print_document(doc: &Document) {
    println!("{}", "=== DOM Tree ===".bold());
    print_tree(doc.tree(), doc.root(), 0);

    if !doc.issues().is_empty() {
        println!();
        print_issues(doc);
    }
}

fn print_issues(doc: &Document) {
    println!(
        "{}",
        format!("=== Parse Issues ({}) ===", doc.issues().len()).bold()
    );
    for kind in IssueKind::iter() {
        let count = doc.issues().iter().filter(|issue| issue.kind == kind).count();
        if count > 0 {
            println!("  {count} x {}", kind.yellow());
        }
    }
    for issue in doc.issues() {
        println!("  - {issue}");
    }
}

/// Convert a subtree to JSON
///
/// Nodes are converted children first, so deep trees never recurse.
fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let mut order = Vec::new();
    let mut pending = vec![id];
    while let Some(next) = pending.pop() {
        order.push(next);
        pending.extend(tree.children(next).iter().rev());
    }

    let mut converted: HashMap<NodeId, Value> = HashMap::new();
    for &node in order.iter().rev() {
        let children: Vec<Value> = tree
            .children(node)
            .iter()
            .filter_map(|child| converted.remove(child))
            .collect();
        let _ = converted.insert(node, node_json(tree, node, children));
    }
    converted.remove(&id).unwrap_or(Value::Null)
}

fn node_json(tree: &DomTree, id: NodeId, children: Vec<Value>) -> Value {
    match &tree[id].kind {
        NodeKind::Document => json!({
            "type": "document",
            "children": Value::Array(children),
        }),
        NodeKind::Tag(data) => {
            let attributes: Map<String, Value> = data
                .attributes
                .iter()
                .map(|attr| (attr.name.clone(), Value::String(attr.value.clone())))
                .collect();
            let kind = match data.kind {
                TagKind::Paired { .. } => "paired",
                TagKind::Unpaired => "unpaired",
                TagKind::RawText { .. } => "raw-text",
            };
            json!({
                "type": "element",
                "tagName": data.name,
                "kind": kind,
                "closed": data.is_closed(),
                "attributes": attributes,
                "children": Value::Array(children),
            })
        }
        NodeKind::Text(text) => json!({ "type": "text", "content": text }),
        NodeKind::PlainText(text) => json!({ "type": "plain-text", "content": text }),
        NodeKind::Comment(kind, text) => {
            let flavor = match kind {
                CommentKind::Markup => "markup",
                CommentKind::ScriptLine => "script-line",
                CommentKind::ScriptBlock => "script-block",
                CommentKind::StyleBlock => "style-block",
                CommentKind::Recovery => "recovery",
            };
            json!({ "type": "comment", "flavor": flavor, "content": text })
        }
        NodeKind::Service(text) => json!({
            "type": "service",
            "name": tree[id].service_name(),
            "content": text,
        }),
    }
}
