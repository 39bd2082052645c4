//! Client-side interactivity for the consultation website.
//!
//! Two independent controllers run against server-rendered markup:
//!
//! * [`gallery::GalleryController`] filters the gallery grid by category and drives the
//!   lightbox viewer over the embedded [`gallery::Catalog`].
//! * [`interactions::PageInteractions`] wires the mobile menu, the consultation form, smooth
//!   scrolling, the sticky header and one-shot entrance animations.
//!
//! Both are written against the collaborator traits in [`dom`] and a
//! [`utils::scheduler::Scheduler`], so they run unchanged in the browser (through [`web`]) and
//! in native tests.

pub mod config;
pub mod dom;
pub mod error;
pub mod gallery;
pub mod interactions;
pub mod web;
pub mod utils {
    pub mod logging;
    pub mod scheduler;
}

pub use config::{GalleryConfig, InteractionConfig};
pub use error::{SiteError, ValidationError};
