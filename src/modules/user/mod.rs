pub mod repository;
mod routes;

pub use routes::{accounts_router, get_router};
