//! Site content: who the page is about and what it shows.
//!
//! The page ships with an embedded `site.toml`; any key it leaves out falls
//! back to the built-in defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_SITE: &str = include_str!("../assets/site.toml");

/// Section anchors every page has, in page order.
pub const SECTION_ANCHORS: [&str; 4] = ["#hero", "#about", "#projects", "#contact"];

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("site content is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("nav item {label:?} links to {href:?}, expected one of the section anchors")]
    UnknownAnchor { label: String, href: String },

    #[error("site content has no {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub scene_url: String,
    pub hire_href: String,
    pub owner: Owner,
    pub nav: Vec<NavItem>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub contact: ContactDetails,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub about: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

impl SiteContent {
    /// Content compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml(EMBEDDED_SITE)
    }

    pub fn from_toml(source: &str) -> Result<Self, ContentError> {
        let content: SiteContent = toml::from_str(source)?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.owner.name.trim().is_empty() {
            return Err(ContentError::Missing("owner name"));
        }
        if self.nav.is_empty() {
            return Err(ContentError::Missing("navigation items"));
        }
        let links = self
            .nav
            .iter()
            .map(|item| (item.label.as_str(), item.href.as_str()))
            .chain(std::iter::once(("Hire Me", self.hire_href.as_str())));
        for (label, href) in links {
            if !SECTION_ANCHORS.contains(&href) {
                return Err(ContentError::UnknownAnchor {
                    label: label.to_string(),
                    href: href.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            scene_url: "https://my.spline.design/orb-sM5SKgJDd4M1HKkwRWAZj57f/".to_string(),
            hire_href: "#contact".to_string(),
            owner: Owner::default(),
            nav: [("Home", "#hero"), ("About", "#about"), ("Projects", "#projects"), ("Contact", "#contact")]
                .into_iter()
                .map(|(label, href)| NavItem {
                    label: label.to_string(),
                    href: href.to_string(),
                })
                .collect(),
            skills: [
                ("HTML5", "🌐"),
                ("CSS3", "🎨"),
                ("JavaScript", "⚡"),
                ("React", "⚛️"),
                ("TypeScript", "📘"),
                ("GSAP", "🎬"),
                ("Tailwind", "💨"),
                ("Node.js", "🟢"),
            ]
            .into_iter()
            .map(|(name, icon)| Skill {
                name: name.to_string(),
                icon: icon.to_string(),
            })
            .collect(),
            projects: default_projects(),
            contact: ContactDetails::default(),
            socials: [
                ("GitHub", "https://github.com"),
                ("LinkedIn", "https://linkedin.com"),
                ("Twitter", "https://twitter.com"),
            ]
            .into_iter()
            .map(|(label, href)| SocialLink {
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect(),
        }
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            name: "Ashish".to_string(),
            role: "Web Developer".to_string(),
            tagline: "Crafting digital experiences that inspire and engage through innovative design and cutting-edge technology.".to_string(),
            about: vec![
                "I specialize in frontend development, crafting dynamic, visually engaging, and highly \
                 responsive websites that provide seamless user experiences. With a strong foundation in \
                 HTML, CSS, and JavaScript, I focus on building modern web interfaces that are not only \
                 aesthetically appealing but also optimized for performance and accessibility."
                    .to_string(),
                "My expertise extends to advanced frameworks like React and Tailwind CSS, enabling me to \
                 create interactive, scalable, and efficient applications. Whether it's designing sleek UI \
                 components, implementing smooth animations, or enhancing user interactions, my goal is to \
                 develop web solutions that are both functional and innovative."
                    .to_string(),
            ],
        }
    }
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            email: "hello@ashish.dev".to_string(),
            phone: "+1 (234) 567-890".to_string(),
            location: "San Francisco, CA".to_string(),
        }
    }
}

fn default_projects() -> Vec<Project> {
    let project = |title: &str, description: &str, tags: [&str; 3]| Project {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    };
    vec![
        project(
            "3D Interactive Web",
            "Frontend email solution with 3D elements and smooth animations.",
            ["React", "Spline", "GSAP"],
        ),
        project(
            "3D Gaming UI",
            "Next-level gaming interface with immersive 3D web design.",
            ["React", "Three.js", "Tailwind"],
        ),
        project(
            "3D Portfolio",
            "Creative developer portfolio with stunning 3D visuals.",
            ["HTML", "CSS", "JavaScript"],
        ),
        project(
            "Gaming Website",
            "Dynamic gaming platform with vibrant anime-style graphics.",
            ["HTML", "CSS", "JavaScript"],
        ),
        project(
            "Animation Portfolio",
            "Portfolio showcasing top web animation tools and techniques.",
            ["React", "GSAP", "Spline"],
        ),
        project(
            "Animated Portfolio",
            "Step-by-step animated portfolio with smooth transitions.",
            ["CSS", "JS", "GSAP"],
        ),
    ]
}
