//! Leptos 0.7 CSR frontend for taskdag
//!
//! Draws the task dependency graph on a canvas and lets the user add
//! blocking dependencies. Layout, viewport, selection and scene building all
//! live in `taskdag-core`; this crate wires them to the DOM.
//!
//! ## Module Structure
//! - `app`: root component, owns the task snapshot
//! - `api`: HTTP implementation of the task collaborator
//! - `canvas`: 2D context helpers and the scene executor
//! - `components`: graph view and dependency selector
//! - `error`: UI error type

#![forbid(unsafe_code)]

pub mod api;
pub mod app;
pub mod canvas;
pub mod components;
pub mod error;

pub use app::App;
