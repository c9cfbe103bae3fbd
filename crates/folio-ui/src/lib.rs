//! Portfolio page for Folio-RS
//!
//! Builds the page markup into a [`Document`](folio_core::Document), wires
//! each section's entrance animations and scroll triggers, and sequences
//! startup through the [`Preloader`] and the [`PageComposer`].

mod content;
mod form;
mod markup;
mod page;
mod preloader;
mod section;
pub mod sections;
mod toast;

pub use content::{
    ContactDetails, ContentError, NavItem, Owner, Project, SiteContent, Skill, SocialLink, SECTION_ANCHORS,
};
pub use form::{ContactFields, FormError, FormField};
pub use page::{PageComposer, PageConfig, LOADING_CLASS};
pub use preloader::{Preloader, TOTAL_MILLIS as PRELOADER_MILLIS};
pub use section::{Mounted, PageEnv, Section};
pub use toast::{Toast, Toaster, ToasterConfig};

pub mod prelude {
    pub use crate::page::{PageComposer, PageConfig};
    pub use crate::section::{PageEnv, Section};
    pub use crate::sections::{About, Contact, Footer, Hero, Navbar, Projects};
    pub use crate::SiteContent;
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod content_tests;

#[cfg(test)]
#[path = "tests/preloader_tests.rs"]
mod preloader_tests;

#[cfg(test)]
#[path = "tests/section_tests.rs"]
mod section_tests;

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod page_tests;
