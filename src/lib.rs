//! Label & Packaging Job Registry
//!
//! This library provides an in-memory registry of label and packaging jobs,
//! each carrying a status, a set of labels and an optional packaging type,
//! along with print sheets and die-line nesting for ganging those jobs, and
//! the command-line front end built on top of them.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod demo;
pub mod logging;
pub mod models;
pub mod services;
