//! Display tree with a per-frame update contract.
//!
//! Every node owns its children and keeps a separate list of the children that take part in updates.
//! Nodes are never freed while they are part of an update pass, removing a node only marks it as destroyed and it's dropped from the update list on the next pass.
//!
//! ```
//! use meo::node::{shared, Container, Node, NodeRef};
//!
//! let mut root = Container::new();
//! let child = shared(Container::new());
//! root.add_child(child.clone());
//!
//! root.update(1.0);
//! assert_eq!(child.borrow().age(), 1);
//!
//! root.remove_child(&(child.clone() as NodeRef));
//! root.update(1.0);
//! assert_eq!(child.borrow().age(), 1);
//! assert!(child.borrow().is_destroyed());
//! ```

pub mod container;
pub mod label;
pub mod shape;
pub mod sprite;

use std::{cell::RefCell, rc::Rc};

pub use container::Container;
use downcast_rs::{impl_downcast, Downcast};
use glam::Vec2;
pub use label::Label;
pub use shape::Shape;
pub use sprite::Sprite;

use crate::graphics::{Canvas, Rect};

/// Shared reference to any node in the tree.
pub type NodeRef = Rc<RefCell<dyn Node>>;

/// Wrap a node so it can be added to the tree while still being accessible with its concrete type.
#[inline]
#[must_use]
pub fn shared<N: Node>(node: N) -> Rc<RefCell<N>> {
    Rc::new(RefCell::new(node))
}

/// State every node kind has.
pub struct NodeBase {
    /// Offset from the parent.
    pub position: Vec2,
    /// Transparency multiplied with all parents, `0.0` is invisible.
    pub alpha: f32,
    /// Whether the node and its children are drawn.
    pub visible: bool,
    /// Whether the node reacts to pointer hit tests.
    pub interactive: bool,
    /// Amount of updates the node survived.
    age: u64,
    /// Terminal flag, a destroyed node is never updated or drawn again.
    destroyed: bool,
    /// Children in draw order.
    children: Vec<NodeRef>,
    /// Children that get updated every frame, might contain destroyed nodes until the next update.
    updating: Vec<NodeRef>,
}

impl NodeBase {
    /// Create a visible, opaque node at the origin.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            alpha: 1.0,
            visible: true,
            interactive: false,
            age: 0,
            destroyed: false,
            children: Vec::new(),
            updating: Vec::new(),
        }
    }

    /// Children in draw order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Amount of children registered for updates, including destroyed ones that haven't been pruned yet.
    #[inline]
    #[must_use]
    pub fn updating_len(&self) -> usize {
        self.updating.len()
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Element of the display tree.
///
/// Implementors only need to expose their [`NodeBase`], everything else has a default.
pub trait Node: Downcast {
    /// Shared node state.
    fn base(&self) -> &NodeBase;

    /// Mutable shared node state.
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Whether the node is registered for updates when added to a parent.
    #[inline]
    fn is_updatable(&self) -> bool {
        true
    }

    /// Logic of this node that runs every update, after the children are updated and the age is incremented.
    ///
    /// # Arguments
    ///
    /// * `delta` - Elapsed time in frames at 60 frames per second.
    #[inline]
    fn tick(&mut self, _delta: f32) {}

    /// Draw only this node, children are drawn afterwards on top of it.
    ///
    /// # Arguments
    ///
    /// * `origin` - Absolute position of this node.
    /// * `alpha` - Transparency including the transparency of all parents.
    /// * `canvas` - Target to draw on.
    #[inline]
    fn draw(&self, _origin: Vec2, _alpha: f32, _canvas: &mut Canvas) {}

    /// Area relative to the position of the node that can be hit by the pointer.
    #[inline]
    fn bounds(&self) -> Option<Rect> {
        None
    }

    /// Update all registered children, increment the age and run [`Self::tick`].
    ///
    /// Does nothing when the node is destroyed.
    fn update(&mut self, delta: f32) {
        if self.is_destroyed() {
            return;
        }

        // Children first
        {
            let base = self.base_mut();
            for child in &base.updating {
                let mut child = child.borrow_mut();
                if !child.is_destroyed() {
                    child.update(delta);
                }
            }

            // Only prune after iterating
            base.updating.retain(|child| !child.borrow().is_destroyed());
        }

        self.base_mut().age += 1;

        self.tick(delta);
    }

    /// Amount of updates the node survived.
    #[inline]
    fn age(&self) -> u64 {
        self.base().age
    }

    /// Whether the node has been destroyed or removed.
    #[inline]
    fn is_destroyed(&self) -> bool {
        self.base().destroyed
    }

    /// Destroy this node and all its children.
    fn destroy(&mut self) {
        let base = self.base_mut();
        base.destroyed = true;

        for child in &base.children {
            child.borrow_mut().destroy();
        }
    }

    /// Append a child to the tree, registering it for updates when it opts in.
    fn add_child(&mut self, child: NodeRef) {
        let updatable = child.borrow().is_updatable();

        let base = self.base_mut();
        if updatable {
            base.updating.push(Rc::clone(&child));
        }
        base.children.push(child);
    }

    /// Remove a child from the tree and mark it as destroyed.
    ///
    /// Its update registration is dropped lazily on the next update.
    fn remove_child(&mut self, child: &NodeRef) {
        let base = self.base_mut();
        base.children
            .retain(|existing| !std::ptr::addr_eq(Rc::as_ptr(existing), Rc::as_ptr(child)));

        child.borrow_mut().destroy();
    }

    /// Draw this node and all its children.
    fn render(&self, parent_origin: Vec2, parent_alpha: f32, canvas: &mut Canvas) {
        let base = self.base();
        if base.destroyed || !base.visible {
            return;
        }

        let origin = parent_origin + base.position;
        let alpha = parent_alpha * base.alpha;
        if alpha <= 0.0 {
            return;
        }

        self.draw(origin, alpha, canvas);

        for child in &base.children {
            child.borrow().render(origin, alpha, canvas);
        }
    }

    /// Whether a point hits this node.
    ///
    /// # Arguments
    ///
    /// * `parent_origin` - Absolute position of the parent.
    /// * `point` - Absolute point to test.
    fn hit_test(&self, parent_origin: Vec2, point: Vec2) -> bool {
        let base = self.base();
        if base.destroyed || !base.visible || !base.interactive {
            return false;
        }

        self.bounds().is_some_and(|bounds| {
            bounds
                .translated(parent_origin + base.position)
                .contains(point)
        })
    }
}
impl_downcast!(Node);
