// src/models/mod.rs

pub mod daily_goal;
pub mod post;
pub mod progress;
pub mod session;
pub mod user;
