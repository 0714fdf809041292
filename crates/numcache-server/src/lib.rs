//! numcache-server - HTTP front end for the number windows.
//!
//! Routes:
//! - `GET /numbers/{code}`: refresh and report the window for `p`, `f`, `e` or `r`
//! - `GET /users`, `GET /users/{id}/posts`, `GET /posts/{id}/comments`: uncached
//!   read-through of the upstream social endpoints
//! - `GET /health`: liveness check

pub mod error;
pub mod routes;
pub mod state;

pub use error::ServerError;
pub use routes::router;
pub use state::AppState;
