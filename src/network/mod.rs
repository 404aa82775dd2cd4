pub mod api_client;
pub mod config;
pub mod stream;

pub use api_client::ApiClient;
pub use config::{api_config, init_api_config, init_api_config_js, ApiConfig};
pub use stream::{pump, ChunkSource, ReaderSource, StreamEnd};
