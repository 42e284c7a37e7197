pub mod client;
pub mod components;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod navigation;
pub mod services;
pub mod utils;
