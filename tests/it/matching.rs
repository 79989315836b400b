use super::{a_b_c, build_list, build_tree, kinds, two_level_tree, Element};
use synrt::{Ast, SyntaxKind};

use Element::*;

#[test]
fn equals_ignores_text() {
    let left: Ast = Ast::create(4u32, "left");
    let right: Ast = Ast::create(4u32, "right");
    assert!(left.equals(Some(&right)));
    assert!(!left.equals(None));
    right.set_kind(5u32);
    assert!(!left.equals(Some(&right)));
}

#[test]
fn same_shape_trees_are_equal() {
    let host = build_tree(&a_b_c());
    let other = build_tree(&Node(0, vec![Token(1, "other"), Token(2, "texts")]));
    assert!(host.equals_tree(Some(&other)));
    assert!(host.equals_tree_partial(Some(&other)));
}

#[test]
fn missing_child_is_only_a_partial_match() {
    let host = build_tree(&a_b_c());
    let sub = build_tree(&Node(0, vec![Token(1, "b")]));
    assert!(!sub.equals_tree(Some(&host)));
    assert!(!host.equals_tree(Some(&sub)));
    assert!(host.equals_tree_partial(Some(&sub)));
    assert!(!sub.equals_tree_partial(Some(&host)));
}

#[test]
fn proper_prefix_never_matches_exactly() {
    let long = build_list(&[Token(1, "b"), Token(2, "c")]).unwrap();
    let short = build_list(&[Token(1, "b")]).unwrap();
    assert!(!long.equals_list(Some(&short)));
    assert!(!short.equals_list(Some(&long)));

    // host may have more trailing siblings, but not fewer
    assert!(long.equals_list_partial(Some(&short)));
    assert!(!short.equals_list_partial(Some(&long)));
}

#[test]
fn prefix_mismatch_at_depth() {
    let host = build_list(&[Node(0, vec![Token(1, "x"), Token(1, "y")])]).unwrap();
    let other = build_list(&[Node(0, vec![Token(1, "x")])]).unwrap();
    assert!(!host.equals_list(Some(&other)));
    assert!(host.equals_list_partial(Some(&other)));
}

#[test]
fn empty_targets() {
    let tree = build_tree(&two_level_tree());
    assert!(!tree.equals_list(None));
    assert!(!tree.equals_tree(None));
    assert!(tree.equals_list_partial(None));
    assert!(tree.equals_tree_partial(None));
    assert!(tree.find_all(None).is_empty());
    assert!(tree.find_all_partial(None).is_empty());
}

#[test]
fn childless_host_matches_any_children() {
    // a host without children places no constraint on the other tree's children, in exact mode too
    let leaf: Ast = Ast::create(0u32, "a");
    let tree = build_tree(&a_b_c());
    assert!(leaf.equals_tree(Some(&tree)));
    assert!(leaf.equals_tree_partial(Some(&tree)));
    assert!(!tree.equals_tree(Some(&leaf)));
    assert!(tree.equals_tree_partial(Some(&leaf)));
}

#[test]
fn equals_tree_ignores_siblings_of_both_roots() {
    let host = build_list(&[a_b_c(), Token(9, "extra")]).unwrap();
    let other = build_tree(&a_b_c());
    assert!(host.equals_tree(Some(&other)));
    assert!(!host.equals_list(Some(&other)));
}

#[test]
fn find_all_in_preorder() {
    let tree = build_tree(&two_level_tree());
    // every node of kind 1 with exactly two leaf children
    let pattern = build_tree(&Node(1, vec![Token(5, ""), Token(5, "")]));
    let found = tree.find_all(Some(&pattern));
    assert_eq!(found.len(), 1);
    let found = found[0].upgrade().unwrap();
    assert_eq!(found.to_string_tree(), " ( n1 0.0 0.1 )");

    let partial: Vec<_> = tree
        .find_all_partial(Some(&pattern))
        .iter()
        .map(|weak| weak.upgrade().unwrap())
        .collect();
    assert_eq!(partial.len(), 2);
    assert_eq!(partial[0].to_string_tree(), " ( n1 0.0 0.1 )");
    assert_eq!(partial[1].to_string_tree(), " ( n1 2.0 2.1 2.2 )");
}

#[test]
fn find_all_visits_siblings_of_start() {
    let list = build_list(&[Token(5, "a"), Node(1, vec![Token(5, "b")]), Token(5, "c")]).unwrap();
    let pattern: Ast = Ast::create(5u32, "");
    let found: Vec<_> = list
        .find_all(Some(&pattern))
        .iter()
        .map(|weak| weak.upgrade().unwrap())
        .collect();
    let texts: Vec<_> = found.iter().map(Ast::text).collect();
    assert_eq!(texts, ["a", "b", "c"]);
    assert_eq!(kinds(&found), [SyntaxKind(5); 3]);
}

#[test]
fn find_all_results_do_not_own_nodes() {
    let tree = build_tree(&two_level_tree());
    let pattern: Ast = Ast::create(2u32, "");
    let found = tree.find_all_partial(Some(&pattern));
    assert_eq!(found.len(), 1);
    assert!(found[0].upgrade().is_some());

    drop(tree);
    assert!(found[0].upgrade().is_none());
}
