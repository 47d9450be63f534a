pub mod catalog;
pub mod converter;
pub mod domain;
pub mod store;
pub mod uploader;
