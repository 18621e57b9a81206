pub mod config;
pub mod error;
pub mod storage;

pub mod controllers;
pub mod dtos;
pub mod entities;
pub mod services;
