mod calendar_grid;
mod context_menu;
mod slot_overlay;
mod task_card;
mod task_form;
mod theme_editor;

pub use calendar_grid::CalendarGrid;
pub use context_menu::ContextMenu;
pub use slot_overlay::{
  OverlayRect,
  SlotOverlay
};
pub use task_card::TaskCard;
pub use task_form::TaskForm;
pub use theme_editor::ThemeEditor;
