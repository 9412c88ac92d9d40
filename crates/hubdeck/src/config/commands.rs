use hubdeck_core::{CommandDefinition, CommandKind};

use serde::{Deserialize, Serialize};

/// One persisted command definition, in display order.
///
/// The on-disk twin of [`CommandDefinition`]; kept separate so the config
/// schema can evolve without dragging the core type along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Menu label.
    pub name: String,
    /// Command text to execute.
    pub command: String,
    /// Hub address pattern.
    #[serde(default)]
    pub hub_scope: String,
    /// UI context bitmask.
    pub context_mask: u32,
    /// Execution mode.
    pub kind: CommandKind,
}

impl From<CommandDefinition> for CommandRecord {
    fn from(definition: CommandDefinition) -> Self {
        Self {
            name: definition.name,
            command: definition.command,
            hub_scope: definition.hub_scope,
            context_mask: definition.context_mask,
            kind: definition.kind,
        }
    }
}

impl From<CommandRecord> for CommandDefinition {
    fn from(record: CommandRecord) -> Self {
        Self {
            name: record.name,
            command: record.command,
            hub_scope: record.hub_scope,
            context_mask: record.context_mask,
            kind: record.kind,
        }
    }
}
