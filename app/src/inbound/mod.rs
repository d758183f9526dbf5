//! Inbound adapters: navigation and the views it mounts.

pub mod navigation;
pub mod views;

pub use navigation::{ActiveView, NavigationError, RouteName, Router};
