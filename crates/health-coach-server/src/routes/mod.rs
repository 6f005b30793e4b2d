//! Health Coach API Routes
//!
//! - /api/routine - Daily routine plan (cached)
//! - /api/nutrition - Nutrition plan (cached, enriched from last routine)
//! - /api/follow_up - Questions about an earlier plan
//! - /api/chat - Free-form coaching chat
//! - /health - Liveness

pub mod coach;
pub mod health;
pub mod swagger;
