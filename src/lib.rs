pub mod api;
pub mod config;
pub mod context;
pub mod doctype;
pub mod middleware;
pub mod registry;
pub mod request;
pub mod response;
pub mod site;
pub mod template;
