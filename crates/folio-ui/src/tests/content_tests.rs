use super::*;

#[test]
fn embedded_site_matches_the_built_in_defaults() {
    let site = SiteContent::embedded().expect("embedded site.toml parses");
    assert_eq!(site, SiteContent::default());
    assert_eq!(site.nav.len(), 4);
    assert_eq!(site.skills.len(), 8);
    assert_eq!(site.projects.len(), 6);
    assert_eq!(site.socials.len(), 3);
    assert_eq!(site.owner.about.len(), 2);
    assert!(site.projects.iter().all(|project| project.tags.len() == 3));
}

#[test]
fn nav_covers_every_section_in_page_order() {
    let site = SiteContent::default();
    let hrefs: Vec<&str> = site.nav.iter().map(|item| item.href.as_str()).collect();
    assert_eq!(hrefs, SECTION_ANCHORS);
    assert_eq!(site.hire_href, "#contact");
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    let site = SiteContent::from_toml(
        r#"
        [owner]
        name = "Mira"
        "#,
    )
    .unwrap();
    assert_eq!(site.owner.name, "Mira");
    assert_eq!(site.owner.role, Owner::default().role);
    assert_eq!(site.nav, SiteContent::default().nav);
    assert_eq!(site.contact, ContactDetails::default());
}

#[test]
fn skill_icons_and_project_tags_are_optional() {
    let site = SiteContent::from_toml(
        r#"
        [[skills]]
        name = "Rust"

        [[projects]]
        title = "Folio"
        description = "Headless portfolio."
        "#,
    )
    .unwrap();
    assert_eq!(site.skills.len(), 1);
    assert!(site.skills[0].icon.is_empty());
    assert!(site.projects[0].tags.is_empty());
}

#[test]
fn nav_links_must_point_at_a_section() {
    let err = SiteContent::from_toml(
        r##"
        [[nav]]
        label = "Blog"
        href = "#blog"
        "##,
    )
    .unwrap_err();
    match err {
        ContentError::UnknownAnchor { label, href } => {
            assert_eq!(label, "Blog");
            assert_eq!(href, "#blog");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn hire_link_must_point_at_a_section() {
    let err = SiteContent::from_toml(r##"hire_href = "mailto:hello@ashish.dev""##).unwrap_err();
    assert!(matches!(err, ContentError::UnknownAnchor { ref label, .. } if label == "Hire Me"));
}

#[test]
fn empty_owner_name_is_rejected() {
    let err = SiteContent::from_toml(
        r#"
        [owner]
        name = "   "
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ContentError::Missing("owner name")));
}

#[test]
fn empty_nav_is_rejected() {
    let err = SiteContent::from_toml("nav = []").unwrap_err();
    assert!(matches!(err, ContentError::Missing(_)));
}

#[test]
fn malformed_toml_reports_a_parse_error() {
    let err = SiteContent::from_toml("[owner\nname = ").unwrap_err();
    assert!(matches!(err, ContentError::Parse(_)));
    assert!(err.to_string().starts_with("site content is not valid TOML"));
}
