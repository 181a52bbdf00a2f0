// src/utils/mod.rs

pub mod cookies;
pub mod flash;
pub mod hash;
pub mod html;
pub mod session;
