mod app;
pub use app::Scrollcard;
