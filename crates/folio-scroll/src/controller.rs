#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Anything that can move the page.
///
/// Implementations are shared handles; every method takes `&self`.
pub trait ScrollController {
    /// Scrolls so the page offset becomes `y`, clamped to the scrollable range.
    fn scroll_to(&self, y: f32, behavior: ScrollBehavior);

    /// Applies a wheel delta.
    fn scroll_by(&self, delta: f32);

    /// While disabled, input is applied instantly, the way native scrolling
    /// behaves.
    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;
}
