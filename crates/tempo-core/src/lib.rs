pub mod dates;
pub mod drag;
pub mod layout;
pub mod recurrence;
pub mod slots;
pub mod store;
pub mod task;
pub mod theme;
