pub mod forecast;
pub mod tables;
pub mod weather;

pub use forecast::*;
pub use tables::SensitivityWeights;
pub use weather::*;
