//! The traversal context threaded through one representation call.
//!
//! A [`Context`] carries the configuration, the cycle-detection set of
//! in-flight reference identities, and the recursion depth. One context is
//! created per top-level call; all descendants share the same visited set by
//! reference (the engine's only shared mutable state) while depth is copied
//! and incremented, never shared.
//!
//! Every identity inserted into the visited set during a call is removed when
//! that call returns, on every exit path: insertion hands back a
//! [`VisitGuard`] whose `Drop` impl performs the removal, so sibling subtrees
//! never observe each other's in-flight identities.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::trace;

use crate::options::{ReprOptions, TypeDisplay};

/// Per-traversal state: configuration, visited identities, recursion depth.
///
/// Not safe for concurrent mutation; each top-level call must own its own
/// context (see the crate docs on the concurrency model).
#[derive(Clone, Debug)]
pub struct Context {
    pub options: ReprOptions,
    visited: Rc<RefCell<HashSet<usize>>>,
    pub depth: i32,
}

impl Context {
    /// Creates the root context for one top-level call.
    #[must_use]
    pub fn new(options: ReprOptions) -> Self {
        Context {
            options,
            visited: Rc::new(RefCell::new(HashSet::new())),
            depth: 0,
        }
    }

    /// The context a formatter passes when recursing into a child value:
    /// depth + 1, same options, same visited set.
    #[must_use]
    pub fn derive_for_child(&self) -> Context {
        Context {
            options: self.options.clone(),
            visited: Rc::clone(&self.visited),
            depth: self.depth + 1,
        }
    }

    /// Applies the configured container strategy, producing a context at the
    /// same depth whose options are what nested elements should see.
    #[must_use]
    pub fn with_container_formatting(&self) -> Context {
        Context {
            options: self.options.for_container_elements(),
            visited: Rc::clone(&self.visited),
            depth: self.depth,
        }
    }

    /// A flavor for rendering inside wrapper types: the wrapper already
    /// supplies the type name, so the inner value's own prefix is suppressed.
    #[must_use]
    pub fn with_type_prefix_hidden(&self) -> Context {
        Context {
            options: self.options.clone().with_type_display(TypeDisplay::AlwaysHide),
            visited: Rc::clone(&self.visited),
            depth: self.depth,
        }
    }

    /// Whether the configured depth limit cuts off this level. A negative
    /// limit means unlimited.
    #[must_use]
    pub fn depth_exceeded(&self) -> bool {
        self.options.max_depth >= 0 && self.depth >= self.options.max_depth
    }

    /// Marks a reference identity as in-flight. Returns `None` when the
    /// identity is already being traversed (a cycle); otherwise the returned
    /// guard removes the identity again when dropped.
    #[must_use]
    pub fn try_visit(&self, identity: usize) -> Option<VisitGuard> {
        if !self.visited.borrow_mut().insert(identity) {
            trace!(identity, "cycle detected");
            return None;
        }
        Some(VisitGuard {
            visited: Rc::clone(&self.visited),
            identity,
        })
    }

    /// True when no identity is currently in flight. Holds between any two
    /// sibling calls sharing this context.
    #[must_use]
    pub fn visited_is_empty(&self) -> bool {
        self.visited.borrow().is_empty()
    }
}

/// Removes its identity from the visited set when dropped, keeping the
/// insert/remove symmetry on every exit path.
pub struct VisitGuard {
    visited: Rc<RefCell<HashSet<usize>>>,
    identity: usize,
}

impl Drop for VisitGuard {
    fn drop(&mut self) {
        self.visited.borrow_mut().remove(&self.identity);
    }
}
