//! avakio_charts
//!
//! Declarative 2D charts: a configuration goes in, draw calls come out.
//!
//! Pipeline per render pass (always recomputed from one snapshot of the
//! configuration and interaction state):
//! - bounds: round value-axis limits and ticks
//! - scales: category bands or linear x, linear values
//! - geometry: per-type renderers emit paths into a [`DrawContext`](avakio_core::DrawContext)
//! - hit regions: kept in the returned [`ChartFrame`] for pointer routing
//!
//! ```
//! use avakio_charts::prelude::*;
//! use avakio_core::{RecordingContext, Size};
//!
//! let mut config = ChartConfig::new(
//!     ChartType::Bar,
//!     vec![Series::from_values("Sales", &[3.0, 7.0, 5.0])],
//! );
//! config.animation.enabled = false;
//! let mut chart = AvakioChart::new(config);
//! let mut ctx = RecordingContext::new(Size::new(600.0, 400.0));
//! let frame = chart.render(&mut ctx);
//! assert_eq!(frame.hit_regions.len(), 3);
//! ```

pub mod bounds;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod hit;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod scale;
pub mod shapes;
pub mod stack;

pub use bounds::{compute_bounds, AxisBounds};
pub use chart::{AvakioChart, ChartHandle};
pub use config::{
    AnimationConfig, AxisConfig, BarConfig, CategoryKey, ChartConfig, ChartStyle, ChartType,
    ConfigWarning, DataPoint, GradientDirection, LegendAlign, LegendConfig, LegendPosition,
    Padding, PieConfig, Series, TooltipConfig, TooltipFormatter, ValueFormatter, XValue,
};
pub use error::{ConfigError, ExportError};
pub use export::{data_url, rasterize, ImageFormat, SvgContext};
pub use render::{render_chart, ChartFrame, RenderInput};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::chart::{AvakioChart, ChartHandle};
    pub use crate::config::{
        ChartConfig, ChartType, DataPoint, LegendPosition, Series, TooltipFormatter,
        ValueFormatter, XValue,
    };
    pub use crate::export::ImageFormat;
    pub use crate::render::ChartFrame;
}
