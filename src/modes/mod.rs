pub mod eval;
pub mod train;

pub use eval::{EvalConfig, EvalMode};
pub use train::{TrainConfig, TrainMode};
