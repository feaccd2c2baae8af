//! Core UI functionality for helmtui.
//!
//! This module contains the orchestration building blocks every tab is made
//! of: the message types, focus and view state, the wizard controller, the
//! debounce engine, dependent-view refresh and the background dispatcher.
//!
//! # Module Components
//!
//! - [`actions`] - Loop messages, effects, requests and outcomes
//! - [`component`] - Tab trait
//! - [`context`] - Construction settings shared by tabs
//! - [`debounce`] - Generation tags for suggestion lookups
//! - [`event_handler`] - Terminal input merged with background actions
//! - [`focus`] - Single focus holder per tab
//! - [`refresh`] - Fan-out of dependent views
//! - [`task_manager`] - Background operations and timers
//! - [`view`] - List / Detail / Wizard view state
//! - [`wizard`] - Step-sequenced input flows
//!
//! # Architecture
//!
//! 1. **Components** handle keys and outcomes and return [`Effect`]s
//! 2. The app executes effects through the [`TaskManager`]
//! 3. Every background job sends exactly one [`Action`] back to the loop
//! 4. The loop handles one action at a time, in arrival order
//!
//! Components never block and never touch another tab's state.

pub mod actions;
pub mod component;
pub mod context;
pub mod debounce;
pub mod event_handler;
pub mod focus;
pub mod refresh;
pub mod task_manager;
pub mod view;
pub mod wizard;

pub use actions::{Action, EditorRequest, Effect, Operation, Outcome, Request, TabId, Target};
pub use component::Component;
pub use context::TabContext;
pub use debounce::Debouncer;
pub use event_handler::{EventHandler, EventType};
pub use focus::{Focus, FocusManager};
pub use refresh::RefreshCoordinator;
pub use task_manager::{TaskId, TaskManager};
pub use view::{SubView, View, ViewState};
pub use wizard::{Advance, Branch, StepKind, Wizard};
