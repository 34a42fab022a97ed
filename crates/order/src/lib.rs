pub mod abstract_trait;
pub mod cache;
pub mod config;
pub mod di;
pub mod domain;
pub mod handler;
pub mod mapper;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod search;
pub mod service;
pub mod state;
pub mod utils;
