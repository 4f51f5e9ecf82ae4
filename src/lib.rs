//! Restaurant lists: a registry of named lists with one selected list,
//! duplicate-free additions, and list merging.
//!
//! Layers, innermost first: [`domain`] (data model), [`application`]
//! (selection controller and merge service), [`config`] (seed settings),
//! [`cli`] (session front end).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
