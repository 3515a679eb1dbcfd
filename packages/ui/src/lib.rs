//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const LANDING_CSS: Asset = asset!("/assets/styling/landing.css");

mod landing;
pub use landing::{CallToAction, Features, Footer, Hero, LandingPage, Pricing};

mod edit_mode;
pub use edit_mode::EditModeScript;
