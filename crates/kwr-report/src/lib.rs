//! Report assembly: engagement ranking, per-keyword pipeline orchestration,
//! and HTML rendering of the final digest.

mod pipeline;
mod rank;
mod render;

pub use pipeline::{build_keyword_report, build_report};
pub use rank::rank_top;
pub use render::render_html;
