//! Structural event traversal over a built document tree.
//!
//! [`Cursor`] walks a [`FlatValue`] and emits a deterministic sequence of
//! structural events: objects open with [`Event::StartObject`], announce each
//! child as [`Event::Key`] followed by the child's events, and close with
//! [`Event::EndObject`]; arrays work the same without keys. A branch node's
//! own value is emitted before its children — as an empty-name key/value pair
//! in objects, and as a leading unnamed element in arrays.
//!
//! The traversal keeps an explicit frame stack, one frame per open nesting
//! level, so arbitrarily deep trees never risk call-stack exhaustion. A
//! drained cursor is fused: it keeps returning `None`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatpath::{from_str, Cursor, Event, FlatValue};
//!
//! let tree: FlatValue = from_str("a=1\nb=2").unwrap();
//! let events: Vec<_> = Cursor::new(&tree).collect();
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::StartObject,
//!         Event::Key("a"),
//!         Event::Scalar("1"),
//!         Event::Key("b"),
//!         Event::Scalar("2"),
//!         Event::EndObject,
//!     ]
//! );
//! ```

use crate::value::FlatValue;

/// One structural event of a tree traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    StartObject,
    Key(&'a str),
    StartArray,
    Scalar(&'a str),
    EndArray,
    EndObject,
}

impl Event<'_> {
    /// A short noun for diagnostics.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Event::StartObject => "an object",
            Event::Key(_) => "a key",
            Event::StartArray => "an array",
            Event::Scalar(_) => "a scalar",
            Event::EndArray => "end of array",
            Event::EndObject => "end of object",
        }
    }
}

/// What an object frame owes its consumer after a key was announced.
enum Pending<'a> {
    Scalar(&'a str),
    Node(&'a FlatValue),
}

enum Frame<'a> {
    Object {
        branch: Option<&'a str>,
        pending: Option<Pending<'a>>,
        iter: indexmap::map::Iter<'a, String, FlatValue>,
    },
    Array {
        branch: Option<&'a str>,
        iter: std::slice::Iter<'a, FlatValue>,
    },
}

enum Step<'a> {
    Emit(Event<'a>),
    Enter(&'a FlatValue),
    Pop(Event<'a>),
}

/// Stateful traversal over one tree node.
///
/// Create one cursor per read operation; cursors are not shared between
/// operations or threads.
pub struct Cursor<'a> {
    root: Option<&'a FlatValue>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned before the first event of `node`.
    #[must_use]
    pub fn new(node: &'a FlatValue) -> Self {
        Cursor {
            root: Some(node),
            stack: Vec::new(),
        }
    }

    /// Pushes a frame for `node` and returns its opening event; leaves emit
    /// their scalar directly without a frame.
    fn enter(&mut self, node: &'a FlatValue) -> Event<'a> {
        match node {
            FlatValue::Leaf(s) => Event::Scalar(s),
            FlatValue::Object(map) => {
                self.stack.push(Frame::Object {
                    branch: None,
                    pending: None,
                    iter: map.iter(),
                });
                Event::StartObject
            }
            FlatValue::Array(items) => {
                self.stack.push(Frame::Array {
                    branch: None,
                    iter: items.iter(),
                });
                Event::StartArray
            }
            FlatValue::Branch { value, children } => match children.as_ref() {
                FlatValue::Object(map) => {
                    self.stack.push(Frame::Object {
                        branch: Some(value),
                        pending: None,
                        iter: map.iter(),
                    });
                    Event::StartObject
                }
                FlatValue::Array(items) => {
                    self.stack.push(Frame::Array {
                        branch: Some(value),
                        iter: items.iter(),
                    });
                    Event::StartArray
                }
                other => self.enter(other),
            },
        }
    }

    /// Advances the traversal by one event. Returns `None` once the root's
    /// closing event has been emitted.
    pub fn next_event(&mut self) -> Option<Event<'a>> {
        if let Some(root) = self.root.take() {
            return Some(self.enter(root));
        }

        let step = match self.stack.last_mut()? {
            Frame::Object {
                branch,
                pending,
                iter,
            } => {
                if let Some(p) = pending.take() {
                    match p {
                        Pending::Scalar(s) => Step::Emit(Event::Scalar(s)),
                        Pending::Node(n) => Step::Enter(n),
                    }
                } else if let Some(value) = branch.take() {
                    // self value precedes real children, under the empty key
                    *pending = Some(Pending::Scalar(value));
                    Step::Emit(Event::Key(""))
                } else {
                    match iter.next() {
                        Some((key, child)) => {
                            *pending = Some(match child {
                                FlatValue::Leaf(s) => Pending::Scalar(s),
                                other => Pending::Node(other),
                            });
                            Step::Emit(Event::Key(key))
                        }
                        None => Step::Pop(Event::EndObject),
                    }
                }
            }
            Frame::Array { branch, iter } => {
                if let Some(value) = branch.take() {
                    Step::Emit(Event::Scalar(value))
                } else {
                    match iter.next() {
                        Some(FlatValue::Leaf(s)) => Step::Emit(Event::Scalar(s)),
                        Some(other) => Step::Enter(other),
                        None => Step::Pop(Event::EndArray),
                    }
                }
            }
        };

        match step {
            Step::Emit(event) => Some(event),
            Step::Pop(event) => {
                self.stack.pop();
                Some(event)
            }
            Step::Enter(node) => Some(self.enter(node)),
        }
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        self.next_event()
    }
}
