//! # Integration Flows
//!
//! Producers, registry changes and listener failures exercised through a
//! running [`priority_bus::EventBus`].

pub mod failures;
