pub mod messages;
pub mod upsell;
