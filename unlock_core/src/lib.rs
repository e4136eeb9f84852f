//! # Unlock Core (The Margin)
//!
//! The stateful heart of the book. This crate reads the definition from
//! `book_rules`, tracks which entries a reader has unlocked, and reports what
//! the presentation layer should show after every code submission.
//!
//! ## Core Components
//!
//! - **store**: Durable unlock state behind an injected persistence backend
//! - **resolver**: Classifies submitted codes as universal, scoped or invalid
//! - **progress**: Decides when the finale may be revealed
//! - **controller**: The submission state machine, including lockout
//! - **events**: Signals emitted to the presentation layer
//! - **view**: Catalog entries with their lock badges for the renderer
//!
//! ## Design Philosophy
//!
//! - **Explicit Context**: Every operation works against a `Book` passed in at startup
//! - **Event-Driven**: The core emits signals; sensory feedback lives elsewhere
//! - **Monotonic**: Unlocking only ever adds content

pub mod controller;
pub mod events;
pub mod progress;
pub mod resolver;
pub mod store;
pub mod view;

pub use controller::*;
pub use events::*;
pub use progress::*;
pub use resolver::*;
pub use store::*;
pub use view::*;
