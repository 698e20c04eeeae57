pub mod chart;
pub mod table;

pub use chart::{ChartProjection, project_chart, AXIS_X_KEY, AXIS_Y_KEY};
pub use table::{TableProjection, project_table};
