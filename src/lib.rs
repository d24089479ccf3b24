//! Property listing scraper and price prediction API.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod predict;
pub mod scrapers;
pub mod web;
