pub mod api;
pub mod error;
pub mod format;
pub mod heatmap;
pub mod interaction;
pub mod labels;
pub mod row;

pub use api::ScoutingClient;
pub use error::{ClientError, Result};
pub use interaction::{MessageBoard, RowModals, ScoutingSession};
pub use row::{Exclusions, RowView};
