//! The conversational recommendation engine.
//!
//! Five pure, synchronous collaborators: intent classification, slot
//! extraction, dialogue orchestration, subscription plan scoring, and
//! movie availability comparison, plus the simpler pattern-matching
//! fallback responder. No I/O happens here; catalogs are passed in or
//! read from the static reference data.

pub mod availability;
pub mod dialogue;
pub mod extractor;
pub mod fallback;
pub mod intent;
pub mod scoring;

pub use availability::{compare_availability, AvailabilityError, AvailabilityReport, CostedOption};
pub use dialogue::{advance, DialogueTurn};
pub use extractor::extract_slots;
pub use fallback::fallback_reply;
pub use intent::classify_intent;
pub use scoring::{score_plans, PlanAdvice};
