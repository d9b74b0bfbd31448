pub mod app;
pub mod config;
pub mod db;
pub mod handlers;
pub mod helpers;
pub mod logging;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
