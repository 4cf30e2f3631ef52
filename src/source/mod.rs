use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

pub mod error;
pub mod models;
pub mod result;

pub use error::Error;
pub use models::{Interval, Keywords, Scope};
pub use result::Result;

use models::{deserialize_tokens, encode_tokens};

/// Root of the photo service used unless overridden with [`PhotoQuery::with_base`].
pub const DEFAULT_BASE: &str = "https://source.unsplash.com";

fn default_base() -> String {
    DEFAULT_BASE.to_owned()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Chainable description of a photo request.
///
/// Selectors are resolved in a fixed order when the URL is built: `id`, then
/// user, then category, then collection. Setting one selector never clears
/// another, so the first one present wins.
///
/// ```
/// use unsplash_source::PhotoQuery;
///
/// let url = PhotoQuery::new().featured().square(200).fetch();
/// assert_eq!(url, "https://source.unsplash.com/featured/200x200/random");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoQuery {
    #[serde(skip, default = "default_base")]
    base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    scope: Scope,
    interval: Interval,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<String>,
    #[serde(deserialize_with = "deserialize_tokens", skip_serializing_if = "Vec::is_empty")]
    keywords: Vec<String>,
}

impl Default for PhotoQuery {
    fn default() -> Self {
        Self {
            base: default_base(),
            width: None,
            height: None,
            scope: Scope::default(),
            interval: Interval::default(),
            id: None,
            user: None,
            category: None,
            collection: None,
            keywords: Vec::new(),
        }
    }
}

impl PhotoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the query at another service root.
    ///
    /// The root must be an absolute `http` or `https` URL without a query or
    /// fragment. A trailing slash is dropped.
    pub fn with_base<T: AsRef<str>>(mut self, base: T) -> Result<Self> {
        let base = base.as_ref();
        let invalid = || Error::InvalidBaseUrl(base.to_owned());

        let url = Url::parse(base).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https")
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(invalid());
        }

        self.base = url.as_str().trim_end_matches('/').to_owned();

        Ok(self)
    }

    /// Looks up a single photo. Nothing but the size applies to such a lookup.
    #[must_use]
    pub fn find<T: ToString>(mut self, id: T) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets both dimensions to `side`.
    #[must_use]
    pub fn square(self, side: u32) -> Self {
        self.size(side, side)
    }

    /// Unrecognised interval names reset the query to a new photo per request.
    #[must_use]
    pub fn randomize<I: Into<Interval>>(mut self, interval: I) -> Self {
        self.interval = interval.into();
        self
    }

    #[must_use]
    pub fn featured(mut self) -> Self {
        self.scope = Scope::Featured;
        self
    }

    #[must_use]
    pub fn of<K: Into<Keywords>>(mut self, keywords: K) -> Self {
        self.keywords = keywords.into().into_tokens();
        self
    }

    #[must_use]
    pub fn from_user<T: Into<String>>(mut self, user: T) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn from_category<T: Into<String>>(mut self, category: T) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn from_collection<T: Into<String>>(mut self, collection: T) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Both dimensions, or nothing if either is missing or zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Some((width, height)),
            _ => None,
        }
    }

    /// Escaped, comma joined keyword filter.
    pub fn keywords(&self) -> String {
        encode_tokens(&self.keywords)
    }

    /// Builds the photo URL.
    pub fn fetch(&self) -> String {
        let url = self.to_string();
        tracing::debug!(%url, "built photo url");

        url
    }

    fn selector(&self) -> Option<(&'static str, &str)> {
        non_empty(&self.user)
            .map(|user| ("user", user))
            .or_else(|| non_empty(&self.category).map(|category| ("category", category)))
            .or_else(|| non_empty(&self.collection).map(|collection| ("collection", collection)))
    }

    fn write_scope(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_featured() {
            write!(f, "/{}", self.scope)?;
        }

        Ok(())
    }

    fn write_dimensions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((width, height)) = self.dimensions() {
            write!(f, "/{width}x{height}")?;
        }

        Ok(())
    }
}

impl fmt::Display for PhotoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;

        if let Some(id) = non_empty(&self.id) {
            write!(f, "/{id}")?;
            return self.write_dimensions(f);
        }

        match self.selector() {
            Some((kind, value)) => {
                write!(f, "/{kind}/{value}")?;
                self.write_scope(f)?;
                self.write_dimensions(f)?;

                if self.interval.is_pinned() {
                    write!(f, "/{}", self.interval)?;
                }
            }

            None => {
                self.write_scope(f)?;
                self.write_dimensions(f)?;
                write!(f, "/{}", self.interval)?;
            }
        }

        let keywords = self.keywords();
        if !keywords.is_empty() {
            write!(f, "?{keywords}")?;
        }

        Ok(())
    }
}
