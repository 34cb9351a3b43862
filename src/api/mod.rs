/*
 * Responsibility
 * - HTTP 層 (routes / handlers / extractors / dto) の入口
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
