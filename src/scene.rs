use crate::error::{OrreryError, OrreryResult};
use crate::{Mat3, Num, Vec3};

/// Stable handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform of a scene node relative to its parent.
///
/// Rotation is limited to the Y axis and scale is uniform, which is all the
/// orbit hierarchy needs and keeps composition closed-form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub translation: Vec3,
    pub rotation_y: Num,
    pub scale: Num,
}

impl Node {
    fn local(&self) -> WorldTransform {
        WorldTransform {
            translation: self.translation,
            rotation_y: self.rotation_y,
            scale: self.scale,
        }
    }
}

/// A node's transform composed with all of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub translation: Vec3,
    pub rotation_y: Num,
    pub scale: Num,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WorldTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation_y: 0.0,
        scale: 1.0,
    };

    /// Maps a point from this frame into the parent frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + Mat3::from_rotation_y(self.rotation_y) * (point * self.scale)
    }

    /// Composes `self` (the parent) with a `child` transform expressed in
    /// the parent's frame.
    pub fn then(&self, child: &WorldTransform) -> WorldTransform {
        WorldTransform {
            translation: self.transform_point(child.translation),
            rotation_y: self.rotation_y + child.rotation_y,
            scale: self.scale * child.scale,
        }
    }
}

/// Arena of transform nodes.
///
/// A node can only be attached to a parent that already exists, so every
/// parent index is smaller than its child's and the graph is always a tree.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node at `translation` under `parent`.
    ///
    /// Fails when `parent` does not belong to this scene.
    pub fn add(&mut self, parent: Option<NodeId>, translation: Vec3) -> OrreryResult<NodeId> {
        if let Some(parent) = parent {
            if self.nodes.get(parent.0).is_none() {
                return Err(OrreryError::UnknownNode(parent));
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            translation,
            rotation_y: 0.0,
            scale: 1.0,
        });

        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeId(idx), node))
    }

    pub fn world_transform(&self, id: NodeId) -> Option<WorldTransform> {
        let node = self.get(id)?;
        let local = node.local();

        match node.parent {
            Some(parent) => Some(self.world_transform(parent)?.then(&local)),
            None => Some(local),
        }
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id).map(|world| world.translation)
    }

    /// Maps a point expressed in the local frame of `id` into world space.
    pub fn local_to_world(&self, id: NodeId, point: Vec3) -> Option<Vec3> {
        self.world_transform(id)
            .map(|world| world.transform_point(point))
    }
}
