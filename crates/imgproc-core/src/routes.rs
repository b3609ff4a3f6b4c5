//! Navigation paths.
//!
//! `/` is the gallery, `/upload` the upload form and `/image/{id}` the detail
//! view. The id segment is passed to the detail lookup verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::ImageId;

/// Header navigation entries as `(label, path)`.
pub const NAV_LINKS: [(&str, &str); 2] = [("Gallery", "/"), ("Upload", "/upload")];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Gallery,
    Upload,
    Detail(ImageId),
}

impl Route {
    /// Resolve a path. Returns `None` for unknown paths.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();

        match path {
            "" | "/" => return Some(Self::Gallery),
            "/upload" | "/upload/" => return Some(Self::Upload),
            _ => {}
        }

        let id = path.strip_prefix("/image/")?;
        let id = id.strip_suffix('/').unwrap_or(id);
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Self::Detail(ImageId::new(id)))
    }

    pub fn href(&self) -> String {
        match self {
            Self::Gallery => "/".to_string(),
            Self::Upload => "/upload".to_string(),
            Self::Detail(id) => format!("/image/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidInput(format!("unknown route: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Gallery));
        assert_eq!(Route::parse(""), Some(Route::Gallery));
        assert_eq!(Route::parse("/upload"), Some(Route::Upload));
        assert_eq!(
            Route::parse("/image/abc-123"),
            Some(Route::Detail(ImageId::new("abc-123")))
        );
    }

    #[test]
    fn parse_keeps_id_verbatim() {
        assert_eq!(
            Route::parse("/image/uploads%2Fcat.png?x=1"),
            Some(Route::Detail(ImageId::new("uploads%2Fcat.png")))
        );
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/image/"), None);
        assert_eq!(Route::parse("/image/a/b"), None);
        assert_eq!(Route::parse("/settings"), None);
        assert!("/nope".parse::<Route>().is_err());
    }

    #[test]
    fn href_round_trips_through_parse() {
        for route in [
            Route::Gallery,
            Route::Upload,
            Route::Detail(ImageId::new("xyz")),
        ] {
            assert_eq!(Route::parse(&route.href()), Some(route));
        }
    }

    #[test]
    fn nav_links_cover_gallery_and_upload() {
        let targets: Vec<_> = NAV_LINKS
            .iter()
            .filter_map(|(_, path)| Route::parse(path))
            .collect();
        assert_eq!(targets, vec![Route::Gallery, Route::Upload]);
    }
}
