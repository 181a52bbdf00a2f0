// src/handlers/mod.rs

pub mod articles;
pub mod auth;
pub mod page;
pub mod pages;
pub mod progress;
