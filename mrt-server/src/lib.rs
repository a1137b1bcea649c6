//! Metro route planner server.
//!
//! A web application that answers: "What is the shortest way from this
//! station to that one, by stations travelled or by travel time?"

pub mod config;
pub mod data;
pub mod domain;
pub mod planner;
pub mod web;
