pub mod backup;
pub mod bucket;
pub mod config;
pub mod error;
pub mod page;
pub mod resource;
pub mod route53;
pub mod serialize;
pub mod store;
pub mod upload;
