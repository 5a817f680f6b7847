pub mod annual;
pub mod builder;
pub mod impact;
pub mod noise;
pub mod policy;
pub mod status;
pub mod weather;

pub use annual::{forecast_year, physics_monthly_mu};
pub use builder::{growth_factor, ForecastBuilder, MAX_OFFSET};
pub use impact::weather_impact;
pub use noise::{NoiseSource, Silent, UniformNoise};
pub use policy::{predict_policy, CitySensors, PolicyRequest, PolicyResponse};
pub use status::{StatusComposer, Tip};
pub use weather::{snapshot_or, OpenMeteoClient, WeatherError, WeatherProvider, WeatherReading};
