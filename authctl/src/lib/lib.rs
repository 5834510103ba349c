pub mod app;
pub mod config;
pub mod inbound;
pub mod outbound;

pub use app::App;
pub use outbound::repositories;
