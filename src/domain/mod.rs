//! Domain types shared by the prober, the bootstrapper and the agent

pub mod chat;
pub mod model;
pub mod tool;
