pub mod aggregate;
pub mod auth;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod report;
pub mod run;
pub mod sponsor;
