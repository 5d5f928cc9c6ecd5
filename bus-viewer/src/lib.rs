//! Bus route viewer.
//!
//! Loads a small dataset of bus routes and their stops, then serves a web
//! viewer with route cards, a searchable route list, and per-route detail
//! (stop timetable, embedded map) in a modal.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod marker;
pub mod repository;
pub mod search;
pub mod selection;
pub mod web;
