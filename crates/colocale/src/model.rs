//! The tree-shaped data model shared by the extract and load pipelines.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Section used for translations files that sit directly under the source root.
pub const DEFAULT_SECTION: &str = "common";

/// A node of a message tree: either a translated string or a nested group.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageNode {
    Text(String),
    Group(MessageTree),
}

/// A recursively nested mapping from key to message. Key order is preserved.
pub type MessageTree = IndexMap<String, MessageNode>;

/// Ordered list of keys from a tree root down to a group.
pub type KeyPath = Vec<String>;

/// Per-locale content of one translations file: locale code to leaf group.
pub type FragmentMessages = IndexMap<String, MessageTree>;

impl MessageNode {
    pub fn as_group(&self) -> Option<&MessageTree> {
        match self {
            MessageNode::Group(tree) => Some(tree),
            MessageNode::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, MessageNode::Text(_))
    }
}

impl From<&str> for MessageNode {
    fn from(value: &str) -> Self {
        MessageNode::Text(value.to_string())
    }
}

impl From<MessageTree> for MessageNode {
    fn from(value: MessageTree) -> Self {
        MessageNode::Group(value)
    }
}

/// Navigation helpers over [`MessageTree`].
pub trait MessageTreeExt {
    /// True when every direct child is a string (an empty tree counts as a leaf group).
    fn is_leaf_group(&self) -> bool;

    /// The group at `path`, if every segment exists and is a group.
    fn group_at(&self, path: &[String]) -> Option<&MessageTree>;

    /// Only the string children, in their original order.
    fn texts(&self) -> MessageTree;
}

impl MessageTreeExt for MessageTree {
    fn is_leaf_group(&self) -> bool {
        self.values().all(MessageNode::is_text)
    }

    fn group_at(&self, path: &[String]) -> Option<&MessageTree> {
        path.iter()
            .try_fold(self, |tree, key| tree.get(key).and_then(MessageNode::as_group))
    }

    fn texts(&self) -> MessageTree {
        self.iter()
            .filter(|(_, node)| node.is_text())
            .map(|(key, node)| (key.clone(), node.clone()))
            .collect()
    }
}

/// One discovered translations file and the messages it holds for each locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Path of the file relative to the source root.
    pub path: PathBuf,
    pub messages: FragmentMessages,
}

/// Full message trees keyed by locale, in configured locale order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog(IndexMap<String, MessageTree>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str) -> Option<&MessageTree> {
        self.0.get(locale)
    }

    pub fn insert(&mut self, locale: impl Into<String>, tree: MessageTree) {
        self.0.insert(locale.into(), tree);
    }

    /// The tree for `locale`, created empty on first access.
    pub fn entry(&mut self, locale: &str) -> &mut MessageTree {
        self.0.entry(locale.to_string()).or_default()
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageTree)> {
        self.0.iter().map(|(locale, tree)| (locale.as_str(), tree))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consumes the catalog, keeping only the tree of `locale`.
    pub fn into_locale(mut self, locale: &str) -> Option<MessageTree> {
        self.0.shift_remove(locale)
    }
}

impl FromIterator<(String, MessageTree)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, MessageTree)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
