use serde::{Deserialize, Serialize};

use crate::mode::LayoutMode;
use crate::site::{Site, SiteId};

/// A single mutation of the wall, as issued by a UI or script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WallCommand {
    SetMode { mode: LayoutMode },
    Toggle { site: Site },
    Remove { id: SiteId },
    Clear,
    Focus { id: SiteId },
}
