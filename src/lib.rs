//! A small review wall: a public page with the aggregate rating and a
//! submission form, an admin listing, and a JSON feed, all backed by a hosted
//! review table.
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod supabase;
pub mod workflow;
