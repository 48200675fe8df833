use crate::task::TaskId;

/// The innermost element a click or activation is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Entry,
    SubmitButton,
    Row(TaskId),
    DeleteButton(TaskId),
}

impl Target {
    /// Enclosing element, if any. A delete control sits inside its row.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::DeleteButton(id) => Some(Self::Row(id)),
            Self::Entry | Self::SubmitButton | Self::Row(_) => None,
        }
    }

    /// Targets from innermost to outermost.
    pub fn bubble_path(self) -> Vec<Self> {
        let mut path = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            path.push(parent);
            current = parent;
        }
        path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// The gesture is consumed; outer handlers do not see it.
    Stop,
}

/// Record of a dispatched gesture: which targets' handlers ran, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub handled: Vec<Target>,
}

/// Walk `target`'s bubble path, calling `handler` on each element until one
/// returns [`Propagation::Stop`].
pub fn dispatch<F>(target: Target, mut handler: F) -> Dispatch
where
    F: FnMut(Target) -> Propagation,
{
    let mut record = Dispatch::default();
    for node in target.bubble_path() {
        record.handled.push(node);
        if handler(node) == Propagation::Stop {
            break;
        }
    }
    record
}
