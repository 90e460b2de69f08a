pub mod access;
pub mod auth;
pub mod devotional;
pub mod event_time;
pub mod events;
pub mod feed;
pub mod log;
pub mod members;
pub mod prayer;
