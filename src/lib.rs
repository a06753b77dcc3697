//! HR report generation: report queries over the HRM database, an actix-web
//! service exposing them, and a client that previews and exports results.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod models;
pub mod render;
pub mod report;
pub mod routes;
