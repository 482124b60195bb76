pub mod error;
pub mod validate;

pub mod model;
pub mod optimizer;
pub mod stats;

pub use crate::error::{PressError, Result};
pub use crate::model::charset::Charset;
pub use crate::model::line::TileLine;
pub use crate::model::range::AddressRange;
pub use crate::optimizer::engine::{optimize, OptimizeConfig, OptimizeStats};
pub use crate::optimizer::line::LineOptimizer;
pub use crate::optimizer::merge::{MergePolicy, TieBreak};
pub use crate::optimizer::optimization::Optimization;
