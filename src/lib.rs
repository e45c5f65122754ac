//! Server-rendered product catalog: list, search, add, edit and delete
//! products, with optional image uploads stored on local disk.

pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod images;
pub mod listener;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;
