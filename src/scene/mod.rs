//! Full screen nodes and the stack that decides which one is shown.

pub mod stack;

use downcast_rs::impl_downcast;
pub use stack::{SceneStack, StackState};

use crate::{
    input::PointerEvent,
    node::{Container, Node},
    Context,
};

/// Node representing one full screen.
///
/// Only the current scene is updated and receives pointer events, a scene suspended by a push is still drawn underneath.
pub trait Scene: Node {
    /// Handle a pointer event on the stage.
    ///
    /// Scenes change the stack through the transition methods on [`Context`], never directly.
    #[inline]
    fn pointer(&mut self, _event: &PointerEvent, _ctx: &Context) {}

    /// Name used when logging transitions.
    #[inline]
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
impl_downcast!(Scene);

impl Scene for Container {}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::Scene;
    use crate::node::{Node, NodeBase};

    /// Every dropped scene with whether it was destroyed before being dropped.
    pub(crate) type DropLog = Rc<RefCell<Vec<(u32, bool)>>>;

    /// Scene recording when it's dropped.
    pub(crate) struct TestScene {
        base: NodeBase,
        pub(crate) id: u32,
        log: DropLog,
    }

    impl TestScene {
        pub(crate) fn new(id: u32, log: &DropLog) -> Self {
            Self {
                base: NodeBase::new(),
                id,
                log: Rc::clone(log),
            }
        }

        /// Scene whose drops are not checked.
        pub(crate) fn detached(id: u32) -> Self {
            Self::new(id, &DropLog::default())
        }
    }

    impl Node for TestScene {
        fn base(&self) -> &NodeBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut NodeBase {
            &mut self.base
        }
    }

    impl Scene for TestScene {}

    impl Drop for TestScene {
        fn drop(&mut self) {
            self.log.borrow_mut().push((self.id, self.is_destroyed()));
        }
    }
}
