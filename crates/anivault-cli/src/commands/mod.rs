pub mod activity;
pub mod bookmark;
pub mod browse;
pub mod clear;
pub mod config;
pub mod fortune;
pub mod history;
pub mod prompts;
pub mod remind;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod ui;
pub mod watch;
