//! Output rendering for split reports.

mod human;
mod json;

pub use human::HumanWriter;
pub use json::JsonWriter;
