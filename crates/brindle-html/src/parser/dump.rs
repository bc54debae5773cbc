use std::fmt::Write;
use std::ops::ControlFlow;

use brindle_dom::traverse::{NodeVisitor, traverse};
use brindle_dom::{DomTree, NodeId, NodeKind};

struct TreeDump {
    out: String,
}

impl NodeVisitor for TreeDump {
    fn head(&mut self, tree: &DomTree, id: NodeId, depth: usize) -> ControlFlow<()> {
        let Some(node) = tree.get(id) else {
            return ControlFlow::Continue(());
        };
        let prefix = "  ".repeat(depth);
        let _ = match &node.kind {
            NodeKind::Document => writeln!(self.out, "{prefix}Document"),
            NodeKind::Element(data) => {
                let mut line = format!("{prefix}<{}", data.tag_name);
                for attr in &data.attrs {
                    if attr.value().is_empty() {
                        let _ = write!(line, " {}", attr.key());
                    } else {
                        let _ = write!(line, " {}=\"{}\"", attr.key(), attr.value());
                    }
                }
                writeln!(self.out, "{line}>")
            }
            NodeKind::Text(data) => {
                let display = data.text.replace('\n', "\\n").replace(' ', "\u{00B7}");
                writeln!(self.out, "{prefix}\"{display}\"")
            }
            NodeKind::Comment(data) => writeln!(self.out, "{prefix}<!-- {data} -->"),
        };
        ControlFlow::Continue(())
    }
}

/// An indented outline of the subtree at `id`, one node per line.
///
/// Spaces in text are shown as `·` and newlines as `\n`.
#[must_use]
pub fn tree_dump(tree: &DomTree, id: NodeId) -> String {
    let mut dump = TreeDump { out: String::new() };
    let _ = traverse(tree, id, &mut dump);
    dump.out
}

/// Print [`tree_dump`] of the subtree at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", tree_dump(tree, id));
}
