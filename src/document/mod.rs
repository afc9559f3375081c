//! In-memory document model.
//!
//! # Responsibilities
//! - Hold the page container and its current markup
//! - Hold the stylesheet links and script tags inserted for pages
//! - Hold the navigation items and their active flag
//! - Hold the document title
//!
//! # Design Decisions
//! - Only the parts of a document the router touches are modelled
//! - A document without a page container is valid; rendering into it fails
//! - Tag lists keep insertion order

use serde::Serialize;
use thiserror::Error;

/// Errors raised by document mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("page container '#{0}' not found in document")]
    ContainerMissing(String),
}

/// A `<script>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTag {
    pub src: String,
    /// Loaded as an ES module.
    pub module: bool,
}

/// A navigation element carrying a `data-page` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub page: String,
    pub active: bool,
}

impl NavItem {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            active: false,
        }
    }
}

/// The mutable document a router renders into.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    /// Markup of the page container, `None` when the container is absent.
    container: Option<String>,
    container_id: String,
    stylesheets: Vec<String>,
    scripts: Vec<ScriptTag>,
    nav_items: Vec<NavItem>,
}

impl Document {
    /// Create a document with an empty page container.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container: Some(String::new()),
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    /// Create a document whose page container is absent.
    pub fn detached(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    /// Add navigation items by their `data-page` attribute.
    pub fn with_nav_items<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nav_items.extend(pages.into_iter().map(NavItem::new));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Fail if the page container is absent.
    pub fn ensure_container(&self) -> Result<(), DocumentError> {
        match self.container {
            Some(_) => Ok(()),
            None => Err(DocumentError::ContainerMissing(self.container_id.clone())),
        }
    }

    /// Remove the container's children.
    pub fn clear_container(&mut self) -> Result<(), DocumentError> {
        self.container_mut()?.clear();
        Ok(())
    }

    /// Replace the container's children with `markup`.
    pub fn set_container_markup(&mut self, markup: impl Into<String>) -> Result<(), DocumentError> {
        *self.container_mut()? = markup.into();
        Ok(())
    }

    /// Current container markup, `None` if the container is absent.
    pub fn container_markup(&self) -> Option<&str> {
        self.container.as_deref()
    }

    fn container_mut(&mut self) -> Result<&mut String, DocumentError> {
        let id = &self.container_id;
        self.container
            .as_mut()
            .ok_or_else(|| DocumentError::ContainerMissing(id.clone()))
    }

    pub fn has_stylesheet(&self, href: &str) -> bool {
        self.stylesheets.iter().any(|s| s == href)
    }

    /// Append a `<link rel="stylesheet">`.
    pub fn append_stylesheet(&mut self, href: impl Into<String>) {
        self.stylesheets.push(href.into());
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn has_script(&self, src: &str) -> bool {
        self.scripts.iter().any(|s| s.src == src)
    }

    /// Append a module `<script>`.
    pub fn append_module_script(&mut self, src: impl Into<String>) {
        self.scripts.push(ScriptTag {
            src: src.into(),
            module: true,
        });
    }

    pub fn scripts(&self) -> &[ScriptTag] {
        &self.scripts
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn nav_items_mut(&mut self) -> &mut [NavItem] {
        &mut self.nav_items
    }

    /// Serializable copy for inspection.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            title: self.title.clone(),
            container_id: self.container_id.clone(),
            container: self.container.clone(),
            stylesheets: self.stylesheets.clone(),
            scripts: self.scripts.clone(),
            nav_items: self.nav_items.clone(),
        }
    }
}

/// Point-in-time copy of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub title: String,
    pub container_id: String,
    pub container: Option<String>,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<ScriptTag>,
    pub nav_items: Vec<NavItem>,
}

impl DocumentSnapshot {
    /// Number of stylesheet links with this href.
    pub fn stylesheet_count(&self, href: &str) -> usize {
        self.stylesheets.iter().filter(|s| *s == href).count()
    }

    /// Number of script tags with this src.
    pub fn script_count(&self, src: &str) -> usize {
        self.scripts.iter().filter(|s| s.src == src).count()
    }

    /// `data-page` attributes of the active navigation items.
    pub fn active_nav_items(&self) -> Vec<&str> {
        self.nav_items
            .iter()
            .filter(|i| i.active)
            .map(|i| i.page.as_str())
            .collect()
    }
}
