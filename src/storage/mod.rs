// 存储模块 - 本地寻访记录数据库

pub mod database;

pub use database::{Database, DB_FILE};
