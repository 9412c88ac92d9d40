//! Ordered, mutable tree of user-defined hub commands.
//!
//! Nodes live in an id-addressed arena; parent and child links are plain
//! ids, so there are no ownership cycles and no back-reference lifetimes.
//! A synthetic root anchors the tree, is never displayed, and can never be
//! removed. Child order is display/execution order and survives every
//! mutation except the move that deliberately changes it.

use crate::{CoreError, CoreResult};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Stable, process-wide unique identity of a tree node.
///
/// Ids are handed out sequentially and never recycled, so a stale id held
/// by the presentation layer can only miss, never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// The synthetic root's id.
    pub const ROOT: NodeId = NodeId(0);

    /// Raw id value, for diagnostics.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// How a command's text is executed by the client layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Menu separator, no command text.
    Separator,
    /// Raw protocol text sent as-is.
    Raw,
    /// Text sent to the hub chat.
    Chat,
    /// Text sent as a private message.
    PrivateMessage,
}

/// A user-defined command entry as persisted and edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Menu label.
    pub name: String,
    /// Command text to execute.
    pub command: String,
    /// Hub address pattern this command applies to.
    pub hub_scope: String,
    /// Bitmask of UI contexts the command appears in. Never zero.
    pub context_mask: u32,
    /// Execution mode.
    pub kind: CommandKind,
}

impl CommandDefinition {
    #[track_caller]
    fn validate(&self) -> CoreResult<()> {
        if self.context_mask == 0 {
            // A zero mask would never match any context; the command could
            // never appear anywhere.
            return Err(CoreError::InvalidDefinition {
                reason: format!("command '{}' has an empty context mask", self.name),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

/// What a node holds. Containment is structural: only groups (and the
/// synthetic root) ever carry children, leaf commands never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// The synthetic root. Exactly one exists, never displayed.
    Root,
    /// A named container of other nodes.
    Group {
        /// Submenu label.
        name: String,
    },
    /// A leaf command entry.
    Command(CommandDefinition),
}

/// Sibling move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Swap with the previous sibling.
    Up,
    /// Swap with the next sibling.
    Down,
}

#[derive(Debug)]
struct Node {
    parent: NodeId,
    body: NodeBody,
    children: Vec<NodeId>,
}

/// The ordered command tree.
pub struct CommandTree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTree {
    /// Create a tree holding only the synthetic root.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::ROOT,
            Node {
                parent: NodeId::ROOT,
                body: NodeBody::Root,
                children: Vec::new(),
            },
        );
        Self { nodes, next_id: 1 }
    }

    /// Clear the tree and recreate root's children from `definitions` in
    /// the given order.
    ///
    /// Definitions with an empty context mask are logged and skipped; the
    /// rest of the load proceeds. Returns how many were loaded.
    #[instrument(skip(self, definitions))]
    pub fn load<I>(&mut self, definitions: I) -> usize
    where
        I: IntoIterator<Item = CommandDefinition>,
    {
        self.nodes.retain(|id, _| *id == NodeId::ROOT);
        if let Some(root) = self.nodes.get_mut(&NodeId::ROOT) {
            root.children.clear();
        }

        let mut loaded = 0;
        for definition in definitions {
            match self.add(definition) {
                Ok(_) => loaded += 1,
                Err(e) => warn!(error = %e, "Skipping command definition"),
            }
        }

        debug!(loaded, "Command tree loaded");
        loaded
    }

    /// Append a leaf command as the last child of root.
    #[track_caller]
    pub fn add(&mut self, definition: CommandDefinition) -> CoreResult<NodeId> {
        self.add_in(NodeId::ROOT, definition)
    }

    /// Append a leaf command as the last child of `group`.
    ///
    /// Fails with [`CoreError::NotFound`] if `group` does not exist or is
    /// a leaf, and with [`CoreError::InvalidDefinition`] if the definition
    /// is unusable.
    #[track_caller]
    pub fn add_in(&mut self, group: NodeId, definition: CommandDefinition) -> CoreResult<NodeId> {
        definition.validate()?;
        self.attach(group, NodeBody::Command(definition))
    }

    /// Append a new empty group as the last child of `parent`.
    #[track_caller]
    pub fn add_group(&mut self, parent: NodeId, name: String) -> CoreResult<NodeId> {
        self.attach(parent, NodeBody::Group { name })
    }

    #[track_caller]
    fn attach(&mut self, parent: NodeId, body: NodeBody) -> CoreResult<NodeId> {
        match self.nodes.get(&parent) {
            Some(node) if node.is_container() => {}
            _ => {
                return Err(CoreError::NotFound {
                    id: parent.raw(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            Node {
                parent,
                body,
                children: Vec::new(),
            },
        );
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        Ok(id)
    }

    /// Detach and destroy the subtree rooted at `id`.
    ///
    /// Removing the synthetic root is always rejected.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: NodeId) -> CoreResult<()> {
        if id == NodeId::ROOT {
            return Err(CoreError::NotFound {
                id: id.raw(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let parent = match self.nodes.get(&id) {
            Some(node) => node.parent,
            None => {
                return Err(CoreError::NotFound {
                    id: id.raw(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|child| *child != id);
        }

        // Depth-first teardown of the whole subtree.
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }

        Ok(())
    }

    /// Swap `id` with its immediate sibling in `direction`.
    ///
    /// At the ends of a sibling run the move is a successful no-op, not an
    /// error; returns whether an actual swap happened. A move never crosses
    /// a parent boundary.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn move_node(&mut self, id: NodeId, direction: Direction) -> CoreResult<bool> {
        let (parent, index) = self.position(id).ok_or_else(|| CoreError::NotFound {
            id: id.raw(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return Ok(false);
        };

        let swapped = match direction {
            Direction::Up if index > 0 => {
                parent_node.children.swap(index, index - 1);
                true
            }
            Direction::Down if index + 1 < parent_node.children.len() => {
                parent_node.children.swap(index, index + 1);
                true
            }
            _ => false,
        };

        Ok(swapped)
    }

    /// Replace the definition of leaf `id` in place.
    ///
    /// Id and sibling position are preserved.
    #[track_caller]
    pub fn change(&mut self, id: NodeId, definition: CommandDefinition) -> CoreResult<()> {
        definition.validate()?;
        match self.nodes.get_mut(&id) {
            Some(node) if matches!(node.body, NodeBody::Command(_)) => {
                node.body = NodeBody::Command(definition);
                Ok(())
            }
            _ => Err(CoreError::NotFound {
                id: id.raw(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Resolve `id` to its parent and index among the parent's children.
    ///
    /// Pure addressing for the presentation layer: index `i` maps to the
    /// `i`-th entry of the parent's ordered child sequence. Returns `None`
    /// for the root and for unknown ids.
    pub fn position(&self, id: NodeId) -> Option<(NodeId, usize)> {
        if id == NodeId::ROOT {
            return None;
        }
        let parent = self.nodes.get(&id)?.parent;
        let index = self
            .nodes
            .get(&parent)?
            .children
            .iter()
            .position(|child| *child == id)?;
        Some((parent, index))
    }

    /// Ordered children of `parent`, empty for unknown ids.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.nodes
            .get(&parent)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The body of node `id`.
    pub fn body(&self, id: NodeId) -> Option<&NodeBody> {
        self.nodes.get(&id).map(|node| &node.body)
    }

    /// The definition of leaf `id`, if it is a command.
    pub fn definition(&self, id: NodeId) -> Option<&CommandDefinition> {
        match self.body(id)? {
            NodeBody::Command(definition) => Some(definition),
            _ => None,
        }
    }

    /// Whether `id` currently exists in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the tree holds no user nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Command definitions in depth-first display order, for persistence.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        let mut out = Vec::new();
        self.collect_definitions(NodeId::ROOT, &mut out);
        out
    }

    fn collect_definitions(&self, id: NodeId, out: &mut Vec<CommandDefinition>) {
        for child in self.children(id) {
            if let Some(definition) = self.definition(*child) {
                out.push(definition.clone());
            }
            self.collect_definitions(*child, out);
        }
    }
}

impl Node {
    fn is_container(&self) -> bool {
        matches!(self.body, NodeBody::Root | NodeBody::Group { .. })
    }
}
