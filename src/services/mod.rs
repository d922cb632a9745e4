pub mod log_hub;
pub mod minify;
pub mod page_service;
pub mod udp_transport;
