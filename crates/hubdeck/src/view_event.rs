use hubdeck_core::{AppliedChange, NodeId};

/// Events sent from the consumer loop out to the presentation layer.
///
/// The presentation layer redraws incrementally from these instead of
/// rescanning the core's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A projection entry changed; redraw that key.
    Peer(AppliedChange),
    /// Focus this row of the command view after a structural change.
    SelectCommandRow {
        /// Parent whose child list the row indexes into.
        parent: NodeId,
        /// Index among the parent's ordered children.
        row: usize,
    },
    /// The user asked (via the tray) to show or hide the main window.
    ToggleMainWindow,
}
