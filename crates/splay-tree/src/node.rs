use crate::types::{Node, NodeId};

/// One arena slot of a [`crate::SplayTree`].
#[derive(Clone, Debug)]
pub struct SplayNode<K> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    // `None` marks a freed slot waiting on the free list.
    pub(crate) k: Option<K>,
}

impl<K> SplayNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: Some(k),
        }
    }

    /// Stored key, or `None` when the slot has been freed.
    pub fn key(&self) -> Option<&K> {
        self.k.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.p.map(NodeId)
    }

    pub fn left(&self) -> Option<NodeId> {
        self.l.map(NodeId)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.r.map(NodeId)
    }

    pub(crate) fn is_live(&self) -> bool {
        self.k.is_some()
    }

    /// Detaches the node from every link and hands back its key.
    pub(crate) fn release(&mut self) -> Option<K> {
        self.p = None;
        self.l = None;
        self.r = None;
        self.k.take()
    }
}

impl<K> Node for SplayNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}
