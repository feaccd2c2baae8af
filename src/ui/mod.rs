//! UI module for helmtui
//!
//! This module handles the four tabs, the widgets they are built from, the
//! orchestration core and the terminal event loop.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;
pub mod tabs;

pub use app_component::{AppComponent, AppMode, EditorStage};
pub use layout::LayoutManager;
pub use renderer::run_app;
