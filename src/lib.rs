//! # Recipes
//!
//! Core of a recipe-book viewer: links ingredient keywords to the recipe steps
//! that use them, orders ingredients by first use, drives the hover highlight
//! between ingredients and steps, and keeps the session's recipe list, drafts
//! and notifications.

pub mod config;
pub mod errors;
pub mod highlight;
pub mod ingredient_order;
pub mod keyword_matcher;
pub mod linkify;
pub mod logging;
pub mod notification;
pub mod recipe_catalog;
pub mod recipe_draft;
pub mod recipe_model;
pub mod recipe_view;
pub mod segmentation;
pub mod snapshot;
