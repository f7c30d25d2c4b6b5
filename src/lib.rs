pub mod calendar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod scene;

#[cfg(feature = "cli")]
pub use cli::{init_logging, run};
pub use config::{Config, LayoutConfig, load_config};
pub use layout::{Layout, StackMode, StackResult, TimeWindow, ViewState, compute_layout};
pub use scene::Scene;
