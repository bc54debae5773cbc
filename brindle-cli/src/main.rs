//! Brindle command line driver.
//!
//! Parses HTML from a file, an inline string or stdin and prints it back
//! in one of several forms:
//! - brindle page.html            # pretty-printed HTML
//! - brindle --tree page.html     # indented node dump
//! - brindle --errors page.html   # HTML followed by parse errors
//! - brindle --json page.html     # tree and errors as JSON

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use brindle_common::warning;
use brindle_dom::{DomTree, NodeId, NodeKind, OutputSettings};
use brindle_html::{HtmlTreeBuilder, ParseError, tree_dump};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Brindle: a forgiving HTML parser
#[derive(Parser, Debug)]
#[command(name = "brindle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Pretty-print a file
    brindle ./index.html

    # Parse inline HTML
    brindle --html '<p>Hello<br>World'

    # Read from stdin, print compact output
    cat page.html | brindle --no-pretty

    # Show the node tree and every parse error
    brindle --tree --errors ./broken.html

    # Escape for an ASCII-only terminal
    brindle --charset ascii --escape extended ./index.html
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to an HTML file (stdin when omitted)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Disable pretty printing
    #[arg(long)]
    no_pretty: bool,

    /// Spaces per nesting level when pretty printing
    #[arg(long, value_name = "N", default_value = "1")]
    indent: usize,

    /// Entity escape mode: minimal or extended
    #[arg(long, value_name = "MODE")]
    escape: Option<String>,

    /// Output charset: utf-8, us-ascii or iso-8859-1
    #[arg(long, value_name = "NAME")]
    charset: Option<String>,

    /// Print the visible text instead of HTML
    #[arg(long)]
    text: bool,

    /// Print an indented dump of the node tree
    #[arg(long)]
    tree: bool,

    /// Print the tree and errors as JSON
    #[arg(long)]
    json: bool,

    /// List every parse error
    #[arg(long)]
    errors: bool,

    /// Stop recording parse errors after this many
    #[arg(long, value_name = "N")]
    max_errors: Option<usize>,

    /// Silence parser warnings on stderr
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn output_settings(&self) -> anyhow::Result<OutputSettings> {
        let mut settings = OutputSettings::default()
            .pretty_print(!self.no_pretty)
            .indent_amount(self.indent);
        if let Some(ref name) = self.charset {
            settings = settings.with_charset_name(name)?;
        }
        if let Some(ref name) = self.escape {
            settings = settings.with_escape_mode_name(name)?;
        }
        Ok(settings)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(ref html) = self.html {
            return Ok(html.clone());
        }
        if let Some(ref path) = self.path {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut input = String::new();
        let _ = io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        Ok(input)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    document: Value,
    errors: &'a [ParseError],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        warning::set_enabled(false);
    }

    let settings = cli.output_settings()?;
    let input = cli.read_input()?;

    let mut builder = HtmlTreeBuilder::new(&input);
    if let Some(max) = cli.max_errors {
        builder = builder.with_max_errors(max);
    }
    let (mut tree, errors) = builder.run_with_errors();
    *tree.output_settings_mut() = settings;

    if cli.json {
        let report = Report {
            document: node_to_json(&tree, tree.root()),
            errors: &errors,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.tree {
        print!("{}", tree_dump(&tree, tree.root()));
    } else if cli.text {
        println!("{}", tree.text(tree.root()));
    } else {
        println!("{}", tree.outer_html(tree.root()));
    }

    if cli.errors {
        print_errors(&errors);
    }
    Ok(())
}

fn print_errors(errors: &[ParseError]) {
    if errors.is_empty() {
        println!("{}", "No parse errors".green());
        return;
    }
    for error in errors {
        println!(
            "{} {} {}",
            format!("{:>6}", error.position).dimmed(),
            error.message.red(),
            format!("[{}]", error.state).cyan()
        );
    }
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    println!("{}", format!("{} parse {noun}", errors.len()).yellow().bold());
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let mut obj = Map::new();
    match tree.get(id).map(|n| &n.kind) {
        Some(NodeKind::Document) | None => {
            let _ = obj.insert("type".to_string(), json!("document"));
        }
        Some(NodeKind::Element(data)) => {
            let _ = obj.insert("type".to_string(), json!("element"));
            let _ = obj.insert("tagName".to_string(), json!(data.tag_name));
            let attrs: Map<String, Value> = data
                .attrs
                .iter()
                .map(|a| (a.key().to_string(), json!(a.value())))
                .collect();
            let _ = obj.insert("attributes".to_string(), Value::Object(attrs));
        }
        Some(NodeKind::Text(text)) => {
            let _ = obj.insert("type".to_string(), json!("text"));
            let _ = obj.insert("content".to_string(), json!(text.text));
        }
        Some(NodeKind::Comment(data)) => {
            let _ = obj.insert("type".to_string(), json!("comment"));
            let _ = obj.insert("content".to_string(), json!(data));
        }
    }

    let children = tree.children(id);
    if !children.is_empty() {
        let children = children.iter().map(|&child| node_to_json(tree, child)).collect();
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
