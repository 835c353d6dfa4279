//! User interface layer
//!
//! The table container, its per-row views, drag reordering, key mapping
//! and the pure table renderer.

pub mod actions;
pub mod drag;
pub mod key_mapper;
pub mod row_view;
pub mod table_app;
pub mod table_render_context;
pub mod table_renderer;
