pub mod weather_store;

pub use weather_store::{LoadState, SharedStore, StoreEvent, SubscriptionId, WeatherStore};
