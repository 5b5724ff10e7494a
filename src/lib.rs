//! Course Portal - enrollment eligibility and progress tracking core
//!
//! This crate implements the stateful core of a course portal: the
//! authentication session lifecycle, the rules and state machine that
//! govern enrolling in and leaving courses, and the rollup of lesson
//! completion into course and dashboard progress.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod portal;
pub mod ports;

pub use portal::{Portal, Remotes};
