pub mod access;
pub mod countdown;
pub mod devotional;
pub mod event;
pub mod post;
pub mod prayer;
pub mod role;
pub mod session;
pub mod user;
