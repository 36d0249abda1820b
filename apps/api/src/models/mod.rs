pub mod draw;

pub use draw::{Draw, ProcessedDraw};
