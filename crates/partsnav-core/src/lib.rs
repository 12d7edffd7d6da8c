pub mod catalog;
pub mod input;
pub mod kitty;
pub mod menu;
pub mod navigator;
pub mod scheduler;
pub mod screen;
pub mod search;
pub mod split_pane;
pub mod text;
pub mod theme;
pub mod view;

#[cfg(test)]
mod test_support;

pub use catalog::{
    Bookmark, CatalogError, CatalogProvider, Diagram, Group, ImageLoader, LoadError, Note, Part,
    PartRecord, SearchHit, Subgroup, SubgroupWithGroup,
};
pub use input::{InputEvent, Key};
pub use kitty::{CodecError, ImageCodec, ImageHandle};
pub use menu::{ListItem, ListWindow};
pub use navigator::{ClearTarget, Deferred, Effect, Navigator};
pub use scheduler::TimerQueue;
pub use screen::Screen;
pub use search::{PendingSearch, SearchCoordinator};
pub use split_pane::compose;
pub use theme::{Theme, ThemeChoice, build_theme};
pub use view::{ScreenView, Viewport};
