pub mod asset_handlers;
pub mod health_handlers;
pub mod page_handlers;
pub mod ws_handlers;
