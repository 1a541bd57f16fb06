pub mod blend;
pub mod fallback;
pub mod format;
