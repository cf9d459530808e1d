//! # img2gcode Designer
//!
//! The editing model behind img2gcode: a millimetre workspace mapped onto a
//! fixed-size canvas, the objects placed on it, the image pipeline, and the
//! persistence of named projects.
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (one editing session)
//!   ├── WorkspaceConfig (mm ↔ canvas px)
//!   ├── Viewport + Animator (canvas px ↔ screen px)
//!   ├── Canvas (CanvasObject list, overlays, selection)
//!   ├── ProjectStore (named projects in a KeyValueStore)
//!   ├── FontManager
//!   └── ErrorLog + EventBus
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use img2gcode_core::{shared_store, EventBus, MemoryStore};
//! use img2gcode_designer::{AutoConfirm, DesignerState};
//! use std::sync::Arc;
//!
//! let mut state = DesignerState::new(
//!     shared_store(MemoryStore::new()),
//!     Arc::new(EventBus::new()),
//!     Box::new(AutoConfirm::default()),
//! );
//! state.add_rectangle();
//! state.save_project("Sign")?;
//! ```

pub mod animation;
pub mod canvas;
pub mod designer_state;
pub mod dimensions;
pub mod error;
pub mod font_manager;
pub mod image_pipeline;
pub mod model;
pub mod object;
pub mod overlays;
pub mod project;
pub mod svg_export;
pub mod viewport;
pub mod workspace;

pub use animation::{AnimationToken, Animator};
pub use canvas::{snap_to_grid, Canvas};
pub use designer_state::{AutoConfirm, AutoSave, AutoSaveOutcome, DesignerState, EditorOptions, UserPrompt};
pub use dimensions::SelectionDimensions;
pub use error::{DesignerError, DesignerResult};
pub use font_manager::FontManager;
pub use model::{
    Bounds, DesignCircle, DesignImage, DesignLine, DesignPath, DesignRectangle, DesignText,
    DesignerShape, Point, Shape, ShapeType,
};
pub use object::{CanvasObject, OverlayKind, Style};
pub use project::{validate_project_name, Project, ProjectSettings, ProjectStore, ProjectSummary};
pub use svg_export::{export_svg, write_svg};
pub use viewport::Viewport;
pub use workspace::{UsableArea, WorkspaceConfig, WorkspaceSize};
