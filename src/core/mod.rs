//! Core layer - credential collection and session setup

pub mod auth;
