#![forbid(unsafe_code)]

//! Render composer: a pure projection of scroller state into a view tree.
//!
//! The composer never touches the paginator. It receives the materialized
//! records by reference and the host's render hooks, and produces a
//! [`ScrollerView`] that a host backend turns into real elements.

use std::fmt;

use dscroll_i18n::{StringCatalog, keys};

use super::config::DataScrollerConfig;

/// Root class of every data scroller.
pub const ROOT_CLASS: &str = "ds-datascroller";
/// Class shared by every dscroll component root.
pub const COMPONENT_CLASS: &str = "ds-component";
/// Extra root class in inline mode.
pub const INLINE_CLASS: &str = "ds-datascroller-inline";
/// Header section class.
pub const HEADER_CLASS: &str = "ds-datascroller-header";
/// Footer section class.
pub const FOOTER_CLASS: &str = "ds-datascroller-footer";
/// Content area class.
pub const CONTENT_CLASS: &str = "ds-datascroller-content";
/// List element class.
pub const LIST_CLASS: &str = "ds-datascroller-list";
/// Suffix appended to the positional index to form item keys.
pub const ITEM_KEY_SUFFIX: &str = "_datascrollitem";

/// Displayable content: one or more lines of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    lines: Vec<String>,
}

impl Content {
    /// Content from raw text, split on `\n`.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Content from explicit lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The lines of this content.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[inline]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// True if there are no lines or every line is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::raw(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::raw(text)
    }
}

/// Records that can be shown without an item template.
pub trait AsContent {
    /// Render this record as-is.
    fn as_content(&self) -> Content;
}

impl<T: fmt::Display + ?Sized> AsContent for T {
    fn as_content(&self) -> Content {
        Content::raw(self.to_string())
    }
}

/// Host-supplied item template.
pub trait ItemRenderer<T> {
    /// Render one record.
    fn render_item(&self, record: &T) -> Content;
}

impl<T, F> ItemRenderer<T> for F
where
    F: Fn(&T) -> Content,
{
    fn render_item(&self, record: &T) -> Content {
        self(record)
    }
}

/// Host-supplied empty state.
pub trait EmptyRenderer {
    /// Render the empty-state content.
    fn render_empty(&self) -> Content;
}

impl<F> EmptyRenderer for F
where
    F: Fn() -> Content,
{
    fn render_empty(&self) -> Content {
        self()
    }
}

impl EmptyRenderer for Content {
    fn render_empty(&self) -> Content {
        self.clone()
    }
}

/// Join class names, skipping absent and blank ones.
pub fn class_names<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A header or footer block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Class of the wrapping element.
    pub class_name: &'static str,
    /// Section body.
    pub content: Content,
}

/// One list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable key; `None` for the empty-state placeholder.
    pub key: Option<String>,
    /// Entry body.
    pub content: Content,
}

impl Entry {
    /// Key for the record at `index`.
    pub fn key_for(index: usize) -> String {
        format!("{index}{ITEM_KEY_SUFFIX}")
    }
}

/// The scrollable content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentArea {
    /// Class of the content element.
    pub class_name: &'static str,
    /// Class of the list element.
    pub list_class_name: &'static str,
    /// Bounded height, as a CSS length.
    pub max_height: Option<String>,
    /// Whether the area scrolls internally (inline mode).
    pub scrollable: bool,
    /// Entries, or a single placeholder when nothing is materialized.
    pub entries: Vec<Entry>,
    /// Whether `entries` holds the empty-state placeholder.
    pub empty: bool,
}

/// Full view tree of a data scroller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollerView {
    /// Element id passthrough.
    pub id: Option<String>,
    /// Root class list.
    pub class_name: String,
    /// Inline style passthrough.
    pub style: Option<String>,
    /// Header, omitted entirely when not configured.
    pub header: Option<Section>,
    /// Content area.
    pub content: ContentArea,
    /// Footer, omitted entirely when not configured.
    pub footer: Option<Section>,
}

impl ScrollerView {
    /// Whether the view shows the empty-state placeholder.
    #[inline]
    pub fn is_empty_state(&self) -> bool {
        self.content.empty
    }

    /// Number of rendered records (zero in the empty state).
    pub fn item_count(&self) -> usize {
        if self.content.empty {
            0
        } else {
            self.content.entries.len()
        }
    }
}

/// Host render hooks. Every hook is optional.
pub struct RenderHooks<T> {
    pub(crate) item_template: Option<Box<dyn ItemRenderer<T>>>,
    pub(crate) empty_message: Option<Box<dyn EmptyRenderer>>,
    pub(crate) header: Option<Content>,
    pub(crate) footer: Option<Content>,
}

impl<T> Default for RenderHooks<T> {
    fn default() -> Self {
        Self {
            item_template: None,
            empty_message: None,
            header: None,
            footer: None,
        }
    }
}

impl<T> fmt::Debug for RenderHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHooks")
            .field("item_template", &self.item_template.is_some())
            .field("empty_message", &self.empty_message.is_some())
            .field("header", &self.header)
            .field("footer", &self.footer)
            .finish()
    }
}

/// Compose the view for `items`.
pub(crate) fn compose<T: AsContent>(
    config: &DataScrollerConfig,
    hooks: &RenderHooks<T>,
    catalog: &StringCatalog,
    items: &[T],
) -> ScrollerView {
    #[cfg(feature = "tracing")]
    let render_start = web_time::Instant::now();
    #[cfg(feature = "tracing")]
    let render_span = tracing::debug_span!(
        "datascroller.render",
        entries = items.len(),
        empty = items.is_empty(),
        render_duration_us = tracing::field::Empty
    );
    #[cfg(feature = "tracing")]
    let _render_guard = render_span.enter();

    let header = hooks
        .header
        .clone()
        .or_else(|| config.header.as_deref().map(Content::raw))
        .map(|content| Section {
            class_name: HEADER_CLASS,
            content,
        });
    let footer = hooks
        .footer
        .clone()
        .or_else(|| config.footer.as_deref().map(Content::raw))
        .map(|content| Section {
            class_name: FOOTER_CLASS,
            content,
        });

    let (entries, empty) = if items.is_empty() {
        (
            vec![Entry {
                key: None,
                content: empty_content(config, hooks, catalog),
            }],
            true,
        )
    } else {
        let entries = items
            .iter()
            .enumerate()
            .map(|(index, record)| Entry {
                key: Some(Entry::key_for(index)),
                content: match &hooks.item_template {
                    Some(template) => template.render_item(record),
                    None => record.as_content(),
                },
            })
            .collect();
        (entries, false)
    };

    let view = ScrollerView {
        id: config.id.clone(),
        class_name: class_names([
            Some(ROOT_CLASS),
            Some(COMPONENT_CLASS),
            config.class_name.as_deref(),
            config.inline.then_some(INLINE_CLASS),
        ]),
        style: config.style.clone(),
        header,
        content: ContentArea {
            class_name: CONTENT_CLASS,
            list_class_name: LIST_CLASS,
            max_height: config.scroll_height.clone(),
            scrollable: config.inline,
            entries,
            empty,
        },
        footer,
    };

    #[cfg(feature = "tracing")]
    render_span.record(
        "render_duration_us",
        render_start.elapsed().as_micros() as u64,
    );

    view
}

fn empty_content<T>(
    config: &DataScrollerConfig,
    hooks: &RenderHooks<T>,
    catalog: &StringCatalog,
) -> Content {
    if let Some(renderer) = &hooks.empty_message {
        let content = renderer.render_empty();
        if !content.is_empty() {
            return content;
        }
    }
    if let Some(message) = config.empty_message.as_deref().filter(|m| !m.is_empty()) {
        return Content::raw(message);
    }
    Content::raw(
        catalog
            .get(&config.locale, keys::EMPTY_MESSAGE)
            .unwrap_or(keys::EMPTY_MESSAGE),
    )
}
