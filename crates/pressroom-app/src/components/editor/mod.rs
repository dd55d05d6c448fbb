//! Rich editing surface: toolbar plus a contentEditable region driven by
//! [`BrowserEditor`](pressroom_editor_browser::BrowserEditor).

mod component;
mod toolbar;

pub use component::RichEditor;
pub use toolbar::EditorToolbar;
