pub mod add;
pub mod config;
pub mod dispatch;
pub mod launch;
pub mod list;
pub mod remove;
