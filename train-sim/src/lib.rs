//! Single-track train simulation server.
//!
//! Resolves where every train on a shared line is at any simulated minute,
//! drives a clock on a timer and serves frames and path geometry over HTTP
//! for a time–distance diagram and a track animation.

pub mod config;
pub mod domain;
pub mod engine;
pub mod sim;
pub mod timetable;
pub mod web;
