mod about;
mod contact;
mod footer;
mod hero;
mod navbar;
mod projects;

pub use about::About;
pub use contact::{Contact, TOAST_DESCRIPTION, TOAST_TITLE};
pub use footer::Footer;
pub use hero::{Hero, ORB_COUNT};
pub use navbar::{is_scrolled, Navbar, SCROLLED_THRESHOLD};
pub use projects::Projects;
