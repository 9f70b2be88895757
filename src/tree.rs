//! Incremental tree construction from segmented key paths.
//!
//! The builder consumes one `(segments, value)` pair per input line, in file
//! order, and merges each into a growing tree. Nodes are created lazily and
//! promoted in place as later lines refine them: a leaf that turns out to be
//! a path prefix becomes a branch, and an object that has not yet received
//! children becomes an array when an index segment demands one. Array
//! elements accumulate in discovery order and are finalized (sorted
//! ascending, optionally gap-checked) once the whole document has been
//! inserted.

use crate::error::{Error, Result};
use crate::options::FlatOptions;
use crate::path::Segment;
use crate::value::FlatValue;
use crate::FlatMap;
use indexmap::IndexMap;

/// Mutable node shape used during construction. Arrays keep their discovered
/// indexes so out-of-order input can be reordered at finalization.
enum RawNode {
    Leaf(String),
    Object(IndexMap<String, RawNode>),
    Array(Vec<(u64, RawNode)>),
    Branch {
        value: String,
        children: Box<RawNode>,
    },
}

impl RawNode {
    fn kind(&self) -> &'static str {
        match self {
            RawNode::Leaf(_) => "a value",
            RawNode::Object(_) => "an object",
            RawNode::Array(_) => "an array",
            RawNode::Branch { .. } => "a branch",
        }
    }
}

/// Reveals (or creates, by promotion) the object children at `node`.
fn object_children<'a>(
    node: &'a mut RawNode,
    path: &str,
    line: usize,
) -> Result<&'a mut IndexMap<String, RawNode>> {
    if matches!(node, RawNode::Leaf(_)) {
        let value = match std::mem::replace(node, RawNode::Object(IndexMap::new())) {
            RawNode::Leaf(v) => v,
            _ => String::new(),
        };
        *node = RawNode::Branch {
            value,
            children: Box::new(RawNode::Object(IndexMap::new())),
        };
    }
    match node {
        RawNode::Object(children) => Ok(children),
        RawNode::Branch { children, .. } => match children.as_mut() {
            RawNode::Object(children) => Ok(children),
            other => Err(Error::conflict(path, line, other.kind(), "an object")),
        },
        other => Err(Error::conflict(path, line, other.kind(), "an object")),
    }
}

/// Reveals (or creates, by promotion) the array entries at `node`. An object
/// with no children yet is converted in place; a populated one conflicts.
fn array_entries<'a>(
    node: &'a mut RawNode,
    path: &str,
    line: usize,
) -> Result<&'a mut Vec<(u64, RawNode)>> {
    match node {
        RawNode::Object(children) if children.is_empty() => {
            *node = RawNode::Array(Vec::new());
        }
        RawNode::Leaf(_) => {
            let value = match std::mem::replace(node, RawNode::Array(Vec::new())) {
                RawNode::Leaf(v) => v,
                _ => String::new(),
            };
            *node = RawNode::Branch {
                value,
                children: Box::new(RawNode::Array(Vec::new())),
            };
        }
        _ => {}
    }
    match node {
        RawNode::Array(entries) => Ok(entries),
        RawNode::Branch { children, .. } => {
            if matches!(children.as_ref(), RawNode::Object(m) if m.is_empty()) {
                **children = RawNode::Array(Vec::new());
            }
            match children.as_mut() {
                RawNode::Array(entries) => Ok(entries),
                other => Err(Error::conflict(path, line, other.kind(), "an array")),
            }
        }
        other => Err(Error::conflict(path, line, other.kind(), "an array")),
    }
}

/// Assigns a scalar to an existing node. Duplicate assignments are
/// last-write-wins; a populated container gains the value by promotion to a
/// branch, while a container that never received children collapses to a
/// leaf.
fn assign_value(node: &mut RawNode, value: String) {
    match node {
        RawNode::Leaf(v) => *v = value,
        RawNode::Branch { value: v, .. } => *v = value,
        RawNode::Object(children) if children.is_empty() => {
            *node = RawNode::Leaf(value);
        }
        RawNode::Array(entries) if entries.is_empty() => {
            *node = RawNode::Leaf(value);
        }
        RawNode::Object(_) | RawNode::Array(_) => {
            let children = std::mem::replace(node, RawNode::Object(IndexMap::new()));
            *node = RawNode::Branch {
                value,
                children: Box::new(children),
            };
        }
    }
}

/// Builds one document tree from segmented lines.
///
/// One builder serves exactly one read operation; the finished tree is
/// handed off and the builder is consumed.
pub(crate) struct TreeBuilder {
    root: RawNode,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            root: RawNode::Object(IndexMap::new()),
        }
    }

    /// Assigns the document root's own value, from a line with an empty key.
    /// A root that already has children becomes a branch.
    pub(crate) fn assign_root(&mut self, value: String) {
        assign_value(&mut self.root, value);
    }

    /// Merges one `(segments, value)` pair into the tree. `path` and `line`
    /// identify the originating input line for diagnostics.
    pub(crate) fn insert(
        &mut self,
        segments: &[Segment],
        value: String,
        path: &str,
        line: usize,
    ) -> Result<()> {
        let (final_seg, inner) = match segments.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };

        let mut node = &mut self.root;
        for seg in inner {
            node = match seg {
                Segment::Key(name) => {
                    let children = object_children(node, path, line)?;
                    children
                        .entry(name.clone())
                        .or_insert_with(|| RawNode::Object(IndexMap::new()))
                }
                Segment::Index(index) => {
                    let entries = array_entries(node, path, line)?;
                    let pos = match entries.iter().position(|(i, _)| i == index) {
                        Some(pos) => pos,
                        None => {
                            entries.push((*index, RawNode::Object(IndexMap::new())));
                            entries.len() - 1
                        }
                    };
                    &mut entries[pos].1
                }
            };
        }

        match final_seg {
            Segment::Key(name) => {
                let children = object_children(node, path, line)?;
                match children.get_mut(name) {
                    Some(existing) => assign_value(existing, value),
                    None => {
                        children.insert(name.clone(), RawNode::Leaf(value));
                    }
                }
            }
            Segment::Index(index) => {
                let entries = array_entries(node, path, line)?;
                match entries.iter().position(|(i, _)| i == index) {
                    Some(pos) => assign_value(&mut entries[pos].1, value),
                    None => entries.push((*index, RawNode::Leaf(value))),
                }
            }
        }
        Ok(())
    }

    /// Finalizes the tree: arrays are sorted ascending by discovered index
    /// and, in strict mode, checked for contiguity.
    pub(crate) fn finish(self, options: &FlatOptions) -> Result<FlatValue> {
        let mut crumbs = Vec::new();
        finalize(self.root, options, &mut crumbs)
    }
}

fn finalize(node: RawNode, options: &FlatOptions, crumbs: &mut Vec<String>) -> Result<FlatValue> {
    match node {
        RawNode::Leaf(value) => Ok(FlatValue::Leaf(value)),
        RawNode::Object(children) => {
            let mut map = FlatMap::with_capacity(children.len());
            for (key, child) in children {
                crumbs.push(key.clone());
                let value = finalize(child, options, crumbs)?;
                crumbs.pop();
                map.insert(key, value);
            }
            Ok(FlatValue::Object(map))
        }
        RawNode::Array(mut entries) => {
            entries.sort_by_key(|(index, _)| *index);
            if options.require_contiguous_indexes {
                for pair in entries.windows(2) {
                    let (prev, next) = (pair[0].0, pair[1].0);
                    if next != prev + 1 {
                        let sep = if options.path_separator.is_empty() {
                            "."
                        } else {
                            options.path_separator.as_str()
                        };
                        return Err(Error::index_gap(&crumbs.join(sep), prev + 1, next));
                    }
                }
            }
            let mut items = Vec::with_capacity(entries.len());
            for (index, child) in entries {
                crumbs.push(index.to_string());
                items.push(finalize(child, options, crumbs)?);
                crumbs.pop();
            }
            Ok(FlatValue::Array(items))
        }
        RawNode::Branch { value, children } => {
            let children = finalize(*children, options, crumbs)?;
            Ok(FlatValue::Branch {
                value,
                children: Box::new(children),
            })
        }
    }
}
