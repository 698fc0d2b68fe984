//! Rich-text editor configuration set.
//!
//! The UI layer owns editor initialization, form plumbing, and
//! rendering; this module only carries the recognized option set it
//! hands to the editors: the WYSIWYG toolbar layout, the admin-mode
//! flag, the widget height, the language tag, and the markdown editor's
//! icon lists. Nothing here is interpreted by the core.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use self::ToolbarItem::*;

/// Editor height fallback, in pixels.
pub const DEFAULT_HEIGHT: u32 = 200;

/// Editor language fallback.
pub const DEFAULT_LANG: &str = "en-US";

/// Per-widget editor options, as read off the hosting page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorOptions {
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub admin: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            lang: DEFAULT_LANG.to_string(),
            admin: false,
        }
    }
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

/// The enumerated WYSIWYG toolbar options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarItem {
    Style,
    Fontsize,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Clear,
    Color,
    Ul,
    Ol,
    Paragraph,
    Table,
    Link,
    Picture,
    Video,
    Codeview,
    Fullscreen,
    Help,
}

/// A named toolbar group and its items, in the `[name, [items...]]`
/// shape the editor consumes as JSON.
pub type ToolbarGroup = (&'static str, Vec<ToolbarItem>);

static ADMIN_TOOLBAR: Lazy<Vec<ToolbarGroup>> =
    Lazy::new(|| toolbar_with_misc(vec![Codeview, Fullscreen, Help]));
static USER_TOOLBAR: Lazy<Vec<ToolbarGroup>> = Lazy::new(|| toolbar_with_misc(vec![]));

fn toolbar_with_misc(misc: Vec<ToolbarItem>) -> Vec<ToolbarGroup> {
    vec![
        ("style", vec![Style]),
        ("fontsize", vec![Fontsize]),
        ("style", vec![Bold, Italic, Underline, Strikethrough, Clear]),
        ("color", vec![Color]),
        ("para", vec![Ul, Ol, Paragraph]),
        ("table", vec![Table]),
        ("media", vec![Link, Picture, Video]),
        ("misc", misc),
    ]
}

/// Toolbar layout for the WYSIWYG editor. The `misc` group carries the
/// maintenance tools for admins and is present but empty otherwise.
pub fn toolbar(admin: bool) -> &'static [ToolbarGroup] {
    if admin {
        &ADMIN_TOOLBAR
    } else {
        &USER_TOOLBAR
    }
}

/// Markdown-editor icons forced visible.
pub const MARKDOWN_SHOW_ICONS: &[&str] = &[
    "code",
    "table",
    "strikethrough",
    "heading-smaller",
    "heading-bigger",
    "heading-1",
    "heading-2",
    "heading-3",
    "clean-block",
    "horizontal-rule",
];

/// Markdown-editor icons hidden in favor of the explicit heading sizes.
pub const MARKDOWN_HIDE_ICONS: &[&str] = &["heading"];
