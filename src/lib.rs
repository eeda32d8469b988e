//! Marquee - cinema seat booking backend

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod domain;
