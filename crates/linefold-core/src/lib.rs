pub mod buffer;
pub mod catalog;
pub mod cursor;
pub mod debounce;
pub mod document;
pub mod drag;
pub mod encoding;
pub mod fold;
pub mod parser;
pub mod region;
pub mod sidebar;
pub mod sync_map;
pub mod timer;
pub mod view;

pub use catalog::{RebuildOutcome, RegionCatalog};
pub use document::Document;
pub use drag::{DragPhase, DragSelectionController};
pub use fold::{FoldState, ToggleOutcome};
pub use parser::{parser_for, FoldParser, IndentParser, NoFolding, ParseOutcome};
pub use region::{Region, RegionId, RegionKind};
pub use sidebar::{DisplayRow, LineNumbers, SidebarSettings};
pub use sync_map::{DisplaySyncMap, SyncMapError};
pub use view::TextView;
