pub mod analyze;
pub mod dispatch;
pub mod export;
pub mod schema;
pub mod shared;
pub mod shell;
pub mod speak;
