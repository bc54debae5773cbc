//! Tests for tree mutation: append, insert, remove, replace, clone.

use brindle_dom::{Attributes, DomTree, NodeId, NodeKind};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(tag, Attributes::new())
}

/// Every child's stored sibling index must equal its position.
fn assert_indexes_consistent(tree: &DomTree, parent: NodeId) {
    for (position, &child) in tree.children(parent).iter().enumerate() {
        assert_eq!(tree.sibling_index(child), position);
        assert_eq!(tree.parent(child), Some(parent));
    }
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.sibling_index(child), 0);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, a);

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_indexes_consistent(&tree, parent);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_indexes_consistent(&tree, parent);
}

#[test]
#[should_panic(expected = "not a child of the given parent")]
fn test_remove_child_wrong_parent_panics() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let other = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, parent);
    tree.append_child(NodeId::ROOT, other);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.remove_child(other, child);
}

// ========== append_child ==========

#[test]
fn test_append_reparents_attached_node() {
    let mut tree = DomTree::new();
    let first = alloc_element(&mut tree, "div");
    let second = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, first);
    tree.append_child(NodeId::ROOT, second);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(first, a);
    tree.append_child(first, b);

    tree.append_child(second, a);

    assert_eq!(tree.children(first), &[b]);
    assert_eq!(tree.children(second), &[a]);
    assert_indexes_consistent(&tree, first);
    assert_indexes_consistent(&tree, second);
}

#[test]
fn test_append_existing_child_moves_it_last() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "ul");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "li");
    let b = alloc_element(&mut tree, "li");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, a);

    assert_eq!(tree.children(parent), &[b, a]);
    assert_indexes_consistent(&tree, parent);
}

#[test]
#[should_panic(expected = "cannot insert a node into its own subtree")]
fn test_append_ancestor_panics() {
    let mut tree = DomTree::new();
    let outer = alloc_element(&mut tree, "div");
    let inner = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, outer);
    tree.append_child(outer, inner);

    tree.append_child(inner, outer);
}

// ========== insert_before / insert_children_at ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    // new_child should be first, existing second
    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_moves_later_sibling_forward() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.insert_before(parent, c, a);

    assert_eq!(tree.children(parent), &[c, a, b]);
    assert_indexes_consistent(&tree, parent);
}

#[test]
fn test_insert_children_at_clamps_index() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    tree.append_child(parent, a);

    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.insert_children_at(parent, 0, &[b]);
    tree.insert_children_at(parent, 99, &[c]);

    assert_eq!(tree.children(parent), &[b, a, c]);
    assert_indexes_consistent(&tree, parent);
}

// ========== replace / empty / remove ==========

#[test]
fn test_replace_keeps_position() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    let x = alloc_element(&mut tree, "x");
    tree.replace(b, x);

    assert_eq!(tree.children(parent), &[a, x, c]);
    assert_eq!(tree.parent(b), None);
    assert_indexes_consistent(&tree, parent);
}

#[test]
fn test_empty_and_remove() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    tree.empty(parent);
    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(a), None);

    tree.remove(parent);
    assert!(tree.children(NodeId::ROOT).is_empty());

    // Removing an orphan is a no-op.
    tree.remove(parent);
    assert_eq!(tree.parent(parent), None);
}

// ========== deep_clone ==========

#[test]
fn test_deep_clone_is_orphan_copy() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, body);
    let filler = alloc_element(&mut tree, "hr");
    tree.append_child(body, filler);

    let div = alloc_element(&mut tree, "div");
    tree.set_attr(div, "class", "card");
    tree.append_child(body, div);
    let span = alloc_element(&mut tree, "span");
    tree.append_child(div, span);
    let text = tree.alloc_text("hi", true);
    tree.append_child(span, text);

    let copy = tree.deep_clone(div);

    assert_ne!(copy, div);
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.sibling_index(copy), 0);
    assert_eq!(tree.attr(copy, "class"), Some("card"));

    let span_copy = tree.children(copy)[0];
    assert_ne!(span_copy, span);
    assert_eq!(tree.parent(span_copy), Some(copy));
    assert_eq!(tree.text(copy), "hi");

    // Mutating the copy leaves the original alone.
    tree.set_attr(copy, "class", "other");
    assert_eq!(tree.attr(div, "class"), Some("card"));
    assert_eq!(tree.children(body), &[filler, div]);
}

#[test]
fn test_clone_into_attaches_copy() {
    let mut tree = DomTree::new();
    let list = alloc_element(&mut tree, "ul");
    tree.append_child(NodeId::ROOT, list);
    let item = alloc_element(&mut tree, "li");
    tree.append_child(list, item);

    let copy = DomTree::clone_into(&mut tree, item, list);

    assert_eq!(tree.children(list), &[item, copy]);
    assert_eq!(tree.sibling_index(copy), 1);
    assert!(matches!(
        tree.get(copy).map(|n| &n.kind),
        Some(NodeKind::Element(data)) if data.tag_name == "li"
    ));
}

// ========== element conveniences ==========

#[test]
fn test_class_helpers() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.set_attr(div, "CLASS", "  card Wide card ");

    assert_eq!(tree.class_names(div), ["card", "Wide"]);
    assert!(tree.has_class(div, "wide"));

    tree.add_class(div, "new");
    tree.remove_class(div, "WIDE");
    assert_eq!(tree.attr(div, "class"), Some("card new"));
}

#[test]
fn test_value_and_set_text() {
    let mut tree = DomTree::new();
    let input = alloc_element(&mut tree, "input");
    tree.set_attr(input, "value", "42");
    assert_eq!(tree.value(input), "42");

    let area = alloc_element(&mut tree, "textarea");
    tree.set_text(area, "  typed  ");
    assert_eq!(tree.value(area), "typed");
    assert_eq!(tree.children(area).len(), 1);

    let plain = alloc_element(&mut tree, "span");
    assert_eq!(tree.value(plain), "");
}
