//! Key-shape comparison between locales.
//!
//! Two trees have the same shape when they hold the same keys at every depth and
//! every key is a string in both or a group in both. String contents are ignored,
//! so `{"title": "Hi"}` and `{"title": "Bonjour"}` match.

use crate::model::{MessageNode, MessageTree};
use std::collections::BTreeSet;
use std::fmt;

/// Compares two nodes without key context.
///
/// Two strings at the top level compare by value. Groups compare by shape.
pub fn shapes_match(a: &MessageNode, b: &MessageNode) -> bool {
    match (a, b) {
        (MessageNode::Text(a), MessageNode::Text(b)) => a == b,
        (MessageNode::Group(a), MessageNode::Group(b)) => trees_match(a, b),
        _ => false,
    }
}

/// True when both trees have the same key shape at every depth.
pub fn trees_match(a: &MessageTree, b: &MessageTree) -> bool {
    let keys_a: BTreeSet<&str> = a.keys().map(String::as_str).collect();
    let keys_b: BTreeSet<&str> = b.keys().map(String::as_str).collect();

    keys_a == keys_b
        && a.iter().all(|(key, node)| {
            b.get(key)
                .is_some_and(|other| keyed_nodes_match(node, other))
        })
}

fn keyed_nodes_match(a: &MessageNode, b: &MessageNode) -> bool {
    match (a, b) {
        (MessageNode::Text(_), MessageNode::Text(_)) => true,
        (MessageNode::Group(a), MessageNode::Group(b)) => trees_match(a, b),
        _ => false,
    }
}

/// One place where two trees disagree on shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShapeDifference {
    /// The key exists only in the left tree.
    OnlyLeft(Vec<String>),
    /// The key exists only in the right tree.
    OnlyRight(Vec<String>),
    /// The key is a string on one side and a group on the other.
    KindMismatch(Vec<String>),
}

impl fmt::Display for ShapeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeDifference::OnlyLeft(path) => write!(f, "- {}", path.join(".")),
            ShapeDifference::OnlyRight(path) => write!(f, "+ {}", path.join(".")),
            ShapeDifference::KindMismatch(path) => write!(f, "~ {}", path.join(".")),
        }
    }
}

/// Lists every key path where the two trees disagree, left tree order first.
pub fn shape_diff(left: &MessageTree, right: &MessageTree) -> Vec<ShapeDifference> {
    let mut differences = Vec::new();
    let mut path = Vec::new();
    collect_differences(left, right, &mut path, &mut differences);
    differences
}

fn collect_differences(
    left: &MessageTree,
    right: &MessageTree,
    path: &mut Vec<String>,
    differences: &mut Vec<ShapeDifference>,
) {
    for (key, node) in left {
        path.push(key.clone());
        match (node, right.get(key)) {
            (_, None) => differences.push(ShapeDifference::OnlyLeft(path.clone())),
            (MessageNode::Group(l), Some(MessageNode::Group(r))) => {
                collect_differences(l, r, path, differences);
            },
            (MessageNode::Text(_), Some(MessageNode::Text(_))) => {},
            _ => differences.push(ShapeDifference::KindMismatch(path.clone())),
        }
        path.pop();
    }

    for key in right.keys().filter(|key| !left.contains_key(*key)) {
        path.push(key.clone());
        differences.push(ShapeDifference::OnlyRight(path.clone()));
        path.pop();
    }
}
