//! Menu specification: validation, lookup and rendering.
//!
//! A `Menu` is validated once at construction. The valid-key set and the
//! key column width are derived there and reused across every redraw of
//! the selection loop. Rendering is pure; the loop itself lives in
//! [`crate::session`].

use std::collections::HashSet;

use crate::draw::{boxed, padded, BOTTOM_LEFT, CONTINUATION, DOTTED, HORIZONTAL, VERTICAL};
use crate::types::MenuError;

/// One selectable entry: the key the user types and the label shown beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

impl<K: Into<String>, L: Into<String>> From<(K, L)> for MenuItem {
    fn from((key, label): (K, L)) -> Self {
        MenuItem::new(key, label)
    }
}

/// A titled, single-choice menu.
#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    extra_lines: Vec<String>,
    items: Vec<MenuItem>,
    /// Derived: every key in `items`.
    keys: HashSet<String>,
    /// Derived: widest key, in chars.
    key_width: usize,
}

impl Menu {
    /// Build a menu, rejecting specifications the selection loop can't satisfy.
    ///
    /// # Errors
    /// - `MenuError::Empty` when `items` is empty
    /// - `MenuError::UnselectableKey` for an empty or untrimmed key
    /// - `MenuError::DuplicateKey` when a key repeats
    pub fn new<I, T>(
        title: impl Into<String>,
        extra_lines: Vec<String>,
        items: I,
    ) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = T>,
        T: Into<MenuItem>,
    {
        let items: Vec<MenuItem> = items.into_iter().map(Into::into).collect();

        if items.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut keys = HashSet::with_capacity(items.len());
        let mut key_width = 0;

        for item in &items {
            if item.key.is_empty() || item.key.trim() != item.key {
                return Err(MenuError::UnselectableKey {
                    key: item.key.clone(),
                });
            }
            if !keys.insert(item.key.clone()) {
                return Err(MenuError::DuplicateKey {
                    key: item.key.clone(),
                });
            }
            key_width = key_width.max(item.key.chars().count());
        }

        Ok(Self {
            title: title.into(),
            extra_lines,
            items,
            keys,
            key_width,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Width of the key column.
    pub fn key_width(&self) -> usize {
        self.key_width
    }

    /// Whether `selection` is one of the offered keys.
    pub fn is_valid(&self, selection: &str) -> bool {
        self.keys.contains(selection)
    }

    /// Render the full menu frame, ready to be written before the prompt.
    pub fn render(&self) -> String {
        let mut out = boxed(&self.title);
        out.push(CONTINUATION);
        out.push('\n');

        if !self.extra_lines.is_empty() {
            for line in &self.extra_lines {
                out.push_str(&format!("{VERTICAL} {line}\n"));
            }
            out.push(VERTICAL);
            out.push('\n');
        }

        for item in &self.items {
            out.push_str(&format!(
                "{VERTICAL} {} {}\n",
                padded(&item.key, self.key_width),
                item.label
            ));
        }

        out.push(VERTICAL);
        out.push('\n');
        out.push(BOTTOM_LEFT);
        out.push(HORIZONTAL);
        out.push(DOTTED);
        out.push('\n');

        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
