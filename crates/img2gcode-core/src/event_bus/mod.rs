//! # Event Bus Module
//!
//! Publish/subscribe channel between the designer state and whatever front
//! end observes it:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category
//! - Async receivers can poll through a broadcast channel
//!
//! ## Usage
//!
//! ```rust,ignore
//! use img2gcode_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, ObjectEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Object]),
//!     |event| println!("{}", event.description()),
//! );
//! bus.publish(AppEvent::Object(ObjectEvent::Modified { id: 7 }));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
