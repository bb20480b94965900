//! Library half of the `avakio` binary, kept separate so the demo suite can
//! be exercised from integration tests.

pub mod output;
pub mod source;

pub use output::{render_chart_file, OutputFormat, RenderOptions};
pub use source::{chart_files, load_chart};
