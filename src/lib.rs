// Plain-console rendering of HTML-flavored installer text.
//
// The core is an ordered rewrite pipeline (`normalize`) backed by a static
// named-entity table (`entities`); `panel` is the thin wizard glue that feeds
// the pipeline and talks to the external console renderer.

mod entities;
mod normalize;
mod panel;
mod variables;

pub use entities::lookup_entity;
pub use normalize::strip_markup;
pub use panel::{
    Console, InstallData, PanelConfig, TextConsolePanel, TextProvider, CONSOLE_TEXT_PAGING,
    CONSOLE_TEXT_WORDWRAP,
};
pub use variables::Variables;
