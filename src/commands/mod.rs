pub mod extract;
pub mod middleware;
pub mod registry;
pub mod state;

pub use registry::build_router;
pub use state::AppState;
