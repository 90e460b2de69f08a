//! External collaborators: the generative text service and the simulated
//! payment step that precedes an upgrade.

pub mod payment;
pub mod text;
