pub mod config;
pub mod layout;
pub mod model;
pub mod time;

pub use config::StudyConfig;
pub use layout::ResourceLayout;
pub use time::Clock;
