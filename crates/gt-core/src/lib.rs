pub mod error;
pub mod id;
pub mod labels;
pub mod model;
pub mod selection;
pub mod settings;
pub mod store;

pub use error::{GraphError, Result};
pub use id::{EdgeId, EntityRef, Label, VertexId};
pub use labels::LabelPolicy;
pub use model::*;
pub use selection::SelectionSet;
pub use settings::{SettingKey, SettingValue, Settings, StoredSettings};
pub use store::GraphStore;

// Re-export kurbo's point so downstream crates don't need a direct dependency
pub use kurbo::Point;
