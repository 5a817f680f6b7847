pub mod rounding;

pub use rounding::{round1, round3};
