pub mod panel;

pub use panel::PanelRenderer;
