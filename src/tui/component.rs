use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the props pattern:
/// - They receive data via props (struct fields, usually borrowed).
/// - They render to a `Frame` within a given `Rect`.
///
/// Focus and key handling live in `core`; a component only draws what the
/// core already decided.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` so a component may cache layout between frames.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
