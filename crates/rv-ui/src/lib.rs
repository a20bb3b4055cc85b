//! Retrovice UI - Control bar widgets
//!
//! Widget tree for the browser control bar:
//! - widget: composition contract shared by every element
//! - layout: fixed-formula control bar geometry
//! - control_bar: the bar itself, with its text field and quality selector

pub mod control_bar;
pub mod layout;
pub mod quality;
pub mod text_field;
pub mod widget;

pub use control_bar::{ControlBar, ControlBarEventHandler};
pub use layout::ControlBarLayout;
pub use quality::{QualitySelector, QualitySelectorEventHandler};
pub use text_field::{TextField, TextFieldEventHandler};
pub use widget::{Widget, WidgetBase, WidgetParent};
