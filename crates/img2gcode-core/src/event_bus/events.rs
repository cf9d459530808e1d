//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so observers can log or replay
//! them.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Canvas object changes
    Object(ObjectEvent),
    /// Workspace and viewport changes
    View(ViewEvent),
    /// Project lifecycle
    Project(ProjectEvent),
    /// Error and diagnostic events
    Error {
        /// The operation that failed.
        context: String,
        /// The failure message.
        message: String,
    },
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Object(_) => EventCategory::Object,
            AppEvent::View(_) => EventCategory::View,
            AppEvent::Project(_) => EventCategory::Project,
            AppEvent::Error { .. } => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Object(e) => e.description(),
            AppEvent::View(e) => e.description(),
            AppEvent::Project(e) => e.description(),
            AppEvent::Error { context, message } => format!("Error in {}: {}", context, message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Canvas object events.
    Object,
    /// Workspace and viewport events.
    View,
    /// Project persistence events.
    Project,
    /// Error and diagnostic events.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Object => write!(f, "Object"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Project => write!(f, "Project"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}

/// Canvas object events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectEvent {
    /// Object inserted
    Added { id: u64, kind: String },
    /// Geometry or style changed
    Modified { id: u64 },
    /// Object deleted
    Removed { id: u64 },
    /// All design objects cleared
    Cleared { count: usize },
    /// Selection replaced
    SelectionChanged { ids: Vec<u64> },
}

impl ObjectEvent {
    fn description(&self) -> String {
        match self {
            ObjectEvent::Added { id, kind } => format!("Added {} #{}", kind, id),
            ObjectEvent::Modified { id } => format!("Modified #{}", id),
            ObjectEvent::Removed { id } => format!("Removed #{}", id),
            ObjectEvent::Cleared { count } => format!("Cleared {} objects", count),
            ObjectEvent::SelectionChanged { ids } => format!("Selected {:?}", ids),
        }
    }
}

/// Workspace and viewport events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Zoom level changed
    Zoomed { zoom: f64 },
    /// Pan offset changed
    Panned { pan_x: f64, pan_y: f64 },
    /// Workspace resized
    WorkspaceResized { width_mm: f64, height_mm: f64 },
}

impl ViewEvent {
    fn description(&self) -> String {
        match self {
            ViewEvent::Zoomed { zoom } => format!("Zoom {:.2}x", zoom),
            ViewEvent::Panned { pan_x, pan_y } => format!("Pan ({:.1}, {:.1})", pan_x, pan_y),
            ViewEvent::WorkspaceResized {
                width_mm,
                height_mm,
            } => format!("Workspace {} × {} mm", width_mm, height_mm),
        }
    }
}

/// Project lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectEvent {
    Saved { name: String, auto: bool },
    Loaded { name: String },
    Deleted { name: String },
    Duplicated { from: String, to: String },
}

impl ProjectEvent {
    fn description(&self) -> String {
        match self {
            ProjectEvent::Saved { name, auto: true } => format!("Auto-saved '{}'", name),
            ProjectEvent::Saved { name, auto: false } => format!("Saved '{}'", name),
            ProjectEvent::Loaded { name } => format!("Loaded '{}'", name),
            ProjectEvent::Deleted { name } => format!("Deleted '{}'", name),
            ProjectEvent::Duplicated { from, to } => format!("Duplicated '{}' as '{}'", from, to),
        }
    }
}
