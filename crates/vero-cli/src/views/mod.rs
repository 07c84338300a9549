//! The board's views.
//!
//! Each module configures one [`Screen`](crate::screen::Screen) — record
//! shape, validation, columns, seeds, summary — and registers it under a
//! stable key. Adding a view is a new module plus one line here.

pub mod athletes;
pub mod compliance;
pub mod finance;
pub mod sentiment;
pub mod stakeholders;

use crate::registry::ViewRegistry;

/// Registry with every shipped view registered.
#[must_use]
pub fn standard_registry() -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    registry.register(athletes::view());
    registry.register(finance::view());
    registry.register(compliance::view());
    registry.register(stakeholders::view());
    registry.register(sentiment::view());
    registry
}
