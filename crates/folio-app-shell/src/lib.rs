//! Host-side orchestration: owns the runtime, the viewport and the page,
//! and turns wall-clock frames and raw input into page calls.

use folio_core::{ElementId, Viewport, ViewportMetrics};
use folio_runtime_std::StdRuntime;
use folio_ui::{PageComposer, PageConfig, Section, SiteContent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellConfig {
    pub width: f32,
    pub height: f32,
    pub page: PageConfig,
}

impl ShellConfig {
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        let metrics = ViewportMetrics::default();
        Self {
            width: metrics.width,
            height: metrics.height,
            page: PageConfig::default(),
        }
    }
}

pub struct AppShell {
    runtime: StdRuntime,
    viewport: Viewport,
    page: Option<PageComposer>,
    cursor: (f32, f32),
}

impl AppShell {
    pub fn new(site: SiteContent, config: ShellConfig) -> Self {
        Self::with_runtime(StdRuntime::new(), site, config)
    }

    pub fn with_runtime(runtime: StdRuntime, site: SiteContent, config: ShellConfig) -> Self {
        let metrics = ViewportMetrics {
            width: config.width,
            height: config.height,
            ..ViewportMetrics::default()
        };
        let viewport = Viewport::new(metrics, runtime.runtime_handle());
        let page = match PageComposer::mount(runtime.runtime_handle(), viewport.clone(), site, config.page) {
            Ok(page) => Some(page),
            Err(err) => {
                log::error!("page mount failed: {err}");
                None
            }
        };
        Self {
            runtime,
            viewport,
            page,
            cursor: (0.0, 0.0),
        }
    }

    pub fn runtime(&self) -> &StdRuntime {
        &self.runtime
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn page(&self) -> Option<&PageComposer> {
        self.page.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.page.as_ref().map(PageComposer::is_loading).unwrap_or(false)
    }

    /// Whether the host should produce another frame.
    pub fn should_render(&self) -> bool {
        self.runtime.take_frame_request() || self.runtime.is_busy()
    }

    /// Runs one frame at the current wall-clock time.
    pub fn update(&mut self) {
        let now = self.runtime.frame_time_nanos();
        self.update_at(now);
    }

    /// Runs one frame at an explicit timestamp, for scripted hosts.
    pub fn update_at(&mut self, frame_time_nanos: u64) {
        self.runtime.run_frame(frame_time_nanos);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        match &self.page {
            Some(page) => page.resize(width, height),
            None => self.viewport.resize(width, height),
        }
    }

    pub fn wheel(&mut self, delta: f32) -> bool {
        self.page.as_ref().map(|page| page.wheel(delta)).unwrap_or(false)
    }

    pub fn click(&mut self, element: ElementId) -> bool {
        self.page.as_ref().map(|page| page.click(element)).unwrap_or(false)
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    /// Clicks whatever sits under the cursor.
    pub fn pointer_pressed(&mut self) -> bool {
        let (x, y) = self.cursor;
        let Some(page) = &self.page else {
            return false;
        };
        match page.hit_test(x, y) {
            Some(element) => page.click(element),
            None => {
                log::trace!("nothing clickable at ({x:.0}, {y:.0})");
                false
            }
        }
    }

    /// Dumps where the page currently stands.
    pub fn log_debug_info(&self) {
        let Some(page) = &self.page else {
            log::info!("no page mounted");
            return;
        };
        let metrics = self.viewport.metrics();
        log::info!(
            "viewport {:.0}x{:.0} at {:.0}, page {:.0} px, loading: {}, scroll triggers pending: {}",
            metrics.width,
            metrics.height,
            metrics.scroll_y,
            page.document().page_height(),
            page.is_loading(),
            page.env().triggers().active_count()
        );
        let sections: [(&str, ElementId); 6] = [
            (page.navbar().name(), page.navbar().root()),
            (page.hero().name(), page.hero().root()),
            (page.about().name(), page.about().root()),
            (page.projects().name(), page.projects().root()),
            (page.contact().name(), page.contact().root()),
            (page.footer().name(), page.footer().root()),
        ];
        for (name, root) in sections {
            match page.document().frame(root) {
                Ok(frame) => log::info!("  {name:<9} top {:>6.0} height {:>6.0}", frame.top(), frame.height),
                Err(err) => log::info!("  {name:<9} {err}"),
            }
        }
    }

    /// Unmounts the page; the shell stays usable but inert.
    pub fn shutdown(&mut self) {
        if let Some(page) = self.page.take() {
            page.unmount();
        }
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_ui::PRELOADER_MILLIS;

    const FRAME_NANOS: u64 = 16_000_000;

    /// Steps the shell with simulated time until `millis` have passed.
    fn run_for(shell: &mut AppShell, clock: &mut u64, millis: u64) {
        let end = *clock + millis * 1_000_000;
        while *clock < end {
            *clock += FRAME_NANOS;
            shell.update_at(*clock);
        }
    }

    #[test]
    fn page_finishes_loading_under_simulated_frames() {
        let mut shell = AppShell::new(SiteContent::default(), ShellConfig::default());
        let mut clock = 0;
        assert!(shell.is_loading());
        assert!(shell.should_render());
        run_for(&mut shell, &mut clock, PRELOADER_MILLIS + 200);
        assert!(!shell.is_loading());
    }

    #[test]
    fn pointer_press_on_hire_me_scrolls_to_contact() {
        let mut shell = AppShell::new(SiteContent::default(), ShellConfig::default());
        let mut clock = 0;
        run_for(&mut shell, &mut clock, PRELOADER_MILLIS + 200);

        let page = shell.page().unwrap();
        let frame = page.document().frame(page.hero().cta()).unwrap();
        shell.set_cursor(frame.x + frame.width / 2.0, frame.y + frame.height / 2.0);
        assert!(shell.pointer_pressed());
        run_for(&mut shell, &mut clock, 2_000);
        assert!(shell.viewport().scroll_y() > 0.0);
    }

    #[test]
    fn wheel_is_ignored_until_loaded() {
        let mut shell = AppShell::new(SiteContent::default(), ShellConfig::default());
        let mut clock = 0;
        assert!(!shell.wheel(300.0));
        run_for(&mut shell, &mut clock, PRELOADER_MILLIS + 200);
        assert!(shell.wheel(300.0));
        run_for(&mut shell, &mut clock, 2_000);
        assert!((shell.viewport().scroll_y() - 300.0).abs() < 0.5);
    }

    #[test]
    fn mobile_viewport_is_reported() {
        let config = ShellConfig::default().with_viewport(375.0, 667.0);
        let mut shell = AppShell::new(SiteContent::default(), config);
        assert!(shell.viewport().is_mobile());
        shell.set_viewport(1024.0, 768.0);
        assert!(!shell.viewport().is_mobile());
    }

    #[test]
    fn shutdown_leaves_nothing_running() {
        let mut shell = AppShell::new(SiteContent::default(), ShellConfig::default());
        let mut clock = 0;
        run_for(&mut shell, &mut clock, 500);
        shell.shutdown();
        assert!(shell.page().is_none());
        run_for(&mut shell, &mut clock, 100);
        assert!(!shell.runtime().is_busy());
        assert!(!shell.click(0));
    }
}
