use hubdeck_core::{CommandDefinition, Direction, NodeId};

/// Requests sent from the presentation layer to the consumer loop.
///
/// The only mutation path into the command tree besides the initial load,
/// plus the focus reports that drive notification suppression.
#[derive(Debug, Clone)]
pub enum UiRequest {
    /// Append a new command to the tree.
    AddCommand {
        /// The definition to append.
        definition: CommandDefinition,
        /// Group to append into, or `None` for root.
        group: Option<NodeId>,
    },
    /// Replace an existing command's definition in place.
    ChangeCommand {
        /// Node to edit.
        id: NodeId,
        /// The replacement definition.
        definition: CommandDefinition,
    },
    /// Remove a command or group subtree.
    RemoveCommand {
        /// Root of the subtree to remove.
        id: NodeId,
    },
    /// Swap a command with its immediate sibling.
    MoveCommand {
        /// Node to move.
        id: NodeId,
        /// Which sibling to swap with.
        direction: Direction,
    },
    /// The host window gained focus; suppress alerts.
    FocusGained,
    /// The host window lost focus; arm alerts.
    FocusLost,
    /// Switch the visual alert backend at runtime.
    SwitchBackend(crate::BackendKind),
    /// Enable or disable the tray indicator.
    SetTrayEnabled(bool),
    /// Request application shutdown.
    Shutdown,
}
