pub mod error;
pub mod manager;
pub mod model;

pub use error::{ProfileError, ProfileResult};
pub use manager::ProfileManager;
pub use model::{sanitize_key, LaserSettings, MachineProfile};
