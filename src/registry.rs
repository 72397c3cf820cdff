//! In-memory method table
//!
//! A nested name-to-callable table with explicit dotted-path traversal, the
//! reference implementation of [`MethodRegistry`] hosts and tests can use.
//! The table is append-mostly during start-up and effectively read-only
//! during steady-state request handling; a `parking_lot::RwLock` keeps
//! lookups cheap and concurrent.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::host::MethodRegistry;
use crate::types::ServerMethod;

/// Errors raised while populating a [`MethodTable`].
#[derive(Error, Debug)]
pub enum MethodTableError {
    /// The dotted path is empty or contains an empty segment.
    #[error("invalid method path: {0:?}")]
    InvalidPath(String),

    /// An intermediate segment of the path is already a registered method,
    /// or the final segment is already a namespace.
    #[error("method path '{0}' conflicts with an existing entry")]
    PathConflict(String),
}

enum Node {
    Method(ServerMethod),
    Namespace(HashMap<String, Node>),
}

/// A nested table of named server methods, addressed by dotted path.
#[derive(Default)]
pub struct MethodTable {
    root: RwLock<HashMap<String, Node>>,
}

impl MethodTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under a dotted path, creating intermediate
    /// namespaces as needed. Re-registering a leaf path replaces the method.
    ///
    /// # Errors
    /// Returns [`MethodTableError::InvalidPath`] for empty paths or empty
    /// segments, and [`MethodTableError::PathConflict`] when the path
    /// crosses an existing method or lands on an existing namespace.
    pub fn register(&self, path: &str, method: ServerMethod) -> Result<(), MethodTableError> {
        let segments = split_path(path)?;
        let (last, namespaces) = segments
            .split_last()
            .ok_or_else(|| MethodTableError::InvalidPath(path.to_string()))?;

        let mut root = self.root.write();
        let mut current = &mut *root;
        for segment in namespaces {
            let node = current
                .entry((*segment).to_string())
                .or_insert_with(|| Node::Namespace(HashMap::new()));
            match node {
                Node::Namespace(children) => current = children,
                Node::Method(_) => return Err(MethodTableError::PathConflict(path.to_string())),
            }
        }

        match current.get(*last) {
            Some(Node::Namespace(_)) => Err(MethodTableError::PathConflict(path.to_string())),
            _ => {
                current.insert((*last).to_string(), Node::Method(method));
                Ok(())
            }
        }
    }

    /// Remove the method at a dotted path. Returns whether one was present.
    pub fn unregister(&self, path: &str) -> bool {
        let Ok(segments) = split_path(path) else {
            return false;
        };
        let Some((last, namespaces)) = segments.split_last() else {
            return false;
        };

        let mut root = self.root.write();
        let mut current = &mut *root;
        for segment in namespaces {
            match current.get_mut(*segment) {
                Some(Node::Namespace(children)) => current = children,
                _ => return false,
            }
        }
        matches!(current.remove(*last), Some(Node::Method(_)))
    }

    /// Number of registered methods, namespaces excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        fn count(nodes: &HashMap<String, Node>) -> usize {
            nodes
                .values()
                .map(|node| match node {
                    Node::Method(_) => 1,
                    Node::Namespace(children) => count(children),
                })
                .sum()
        }
        count(&self.root.read())
    }

    /// Whether the table holds no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MethodRegistry for MethodTable {
    fn lookup(&self, path: &str) -> Option<ServerMethod> {
        let segments = split_path(path).ok()?;
        let (last, namespaces) = segments.split_last()?;

        let root = self.root.read();
        let mut current = &*root;
        for segment in namespaces {
            match current.get(*segment) {
                Some(Node::Namespace(children)) => current = children,
                _ => return None,
            }
        }
        match current.get(*last) {
            Some(Node::Method(method)) => Some(method.clone()),
            _ => None,
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, MethodTableError> {
    if path.is_empty() {
        return Err(MethodTableError::InvalidPath(path.to_string()));
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(MethodTableError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}
