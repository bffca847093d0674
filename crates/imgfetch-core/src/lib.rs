pub mod config;
pub mod logging;

pub mod annotate;
pub mod batch;
pub mod control;
pub mod fetcher;
pub mod http;
pub mod manifest;
pub mod request;
pub mod storage;
pub mod target;
pub mod url_model;

#[cfg(test)]
pub(crate) mod testing;
