//! Headless visit of the portfolio page.
//!
//! Runs the page on simulated 60 Hz frames: waits out the preloader, wheels
//! down, follows a nav link and sends the contact form. Pass a `site.toml`
//! path to render other content; `RUST_LOG=debug` shows the page's own logs.

use std::process::ExitCode;

use folio_app_shell::{AppShell, ShellConfig};
use folio_ui::{FormField, SiteContent, PRELOADER_MILLIS};

const FRAME_NANOS: u64 = 16_666_667;

struct Visit {
    shell: AppShell,
    clock: u64,
}

impl Visit {
    fn run_for(&mut self, millis: u64) {
        let end = self.clock + millis * 1_000_000;
        while self.clock < end {
            self.clock += FRAME_NANOS;
            self.shell.update_at(self.clock);
        }
    }

    fn elapsed_millis(&self) -> u64 {
        self.clock / 1_000_000
    }
}

fn load_site() -> Result<SiteContent, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path).map_err(|err| format!("cannot read {path}: {err}"))?;
            SiteContent::from_toml(&source).map_err(|err| format!("{path}: {err}"))
        }
        None => SiteContent::embedded().map_err(|err| err.to_string()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let site = match load_site() {
        Ok(site) => site,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("=== Folio-RS Portfolio Visit ===");
    println!("{} / {}", site.owner.name, site.owner.role);
    println!();

    let mut visit = Visit {
        shell: AppShell::new(site, ShellConfig::default()),
        clock: 0,
    };
    if visit.shell.page().is_none() {
        return ExitCode::FAILURE;
    }

    let mut waited = 0;
    while visit.shell.is_loading() && waited < PRELOADER_MILLIS + 1_000 {
        visit.run_for(100);
        waited += 100;
        if let Some(page) = visit.shell.page() {
            log::debug!("preloader at {}%", page.preloader().progress().value());
        }
    }
    println!("preloader done after {} ms", visit.elapsed_millis());
    visit.shell.log_debug_info();

    for _ in 0..3 {
        visit.shell.wheel(600.0);
        visit.run_for(400);
    }
    visit.run_for(1_500);
    println!("wheeled down to {:.0}", visit.shell.viewport().scroll_y());

    let projects_link = visit.shell.page().and_then(|page| {
        page.navbar()
            .links()
            .iter()
            .find(|(_, href)| href == "#projects")
            .map(|(link, _)| *link)
    });
    if let Some(link) = projects_link {
        visit.shell.click(link);
        visit.run_for(1_500);
        println!("followed #projects to {:.0}", visit.shell.viewport().scroll_y());
    }

    let submit = visit.shell.page().map(|page| {
        let env = page.env();
        let contact = page.contact();
        contact.set_field(env, FormField::Name, "Jane Doe");
        contact.set_field(env, FormField::Email, "jane@example.com");
        contact.set_field(env, FormField::Message, "Let's work together.");
        contact.submit_button()
    });
    if let Some(submit) = submit {
        visit.shell.click(submit);
        visit.run_for(200);
        if let Some(page) = visit.shell.page() {
            for toast in page.env().toaster().visible() {
                println!("toast: {} - {}", toast.title, toast.description);
            }
        }
    }

    visit.run_for(5_500);
    visit.shell.log_debug_info();
    visit.shell.shutdown();
    println!("visit finished at {} ms", visit.elapsed_millis());
    ExitCode::SUCCESS
}
