pub mod auth;
pub mod weather;

pub use auth::{AuthError, Authenticator, LocalAuthenticator};
pub use weather::{HttpWeatherProvider, WeatherError, WeatherProvider, DEFAULT_CITY};
