//! 数据模型模块

pub mod auth;
pub mod joke;
pub mod user;
