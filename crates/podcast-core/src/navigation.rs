//! Navigation intents. The front-end decides what a route looks like; the
//! core only names where the user wants to go.

use std::fmt;

use crate::model::ShowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    /// Show detail, optionally remembering the genre the user came from.
    Show { id: ShowId, genre: Option<u32> },
    Favourites,
    NotFound(String),
}

impl Route {
    pub fn show(id: impl Into<ShowId>) -> Self {
        Self::Show {
            id: id.into(),
            genre: None,
        }
    }

    pub fn parse(path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => return Self::Catalog,
            "/favourites" => return Self::Favourites,
            _ => {}
        }
        if let Some(id) = trimmed.strip_prefix("/show/") {
            if !id.is_empty() && !id.contains('/') {
                let genre = query
                    .into_iter()
                    .flat_map(|q| q.split('&'))
                    .filter_map(|pair| pair.strip_prefix("genre="))
                    .find_map(|v| v.parse::<u32>().ok());
                return Self::Show {
                    id: ShowId::from(id),
                    genre,
                };
            }
        }
        Self::NotFound(path.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Self::Catalog => "/".to_string(),
            Self::Show { id, genre: None } => format!("/show/{}", id),
            Self::Show {
                id,
                genre: Some(g),
            } => format!("/show/{}?genre={}", id, g),
            Self::Favourites => "/favourites".to_string(),
            Self::NotFound(p) => p.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// History stack. The bottom entry is the root and is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Catalog)
    }
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // stack is never empty
        &self.stack[self.stack.len() - 1]
    }

    /// Push a route; re-navigating to the current route is ignored.
    pub fn go(&mut self, route: Route) {
        if *self.current() != route {
            self.stack.push(route);
        }
    }

    /// Pop one level. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Catalog);
        assert_eq!(Route::parse(""), Route::Catalog);
        assert_eq!(Route::parse("/favourites"), Route::Favourites);
        assert_eq!(Route::parse("/show/10716"), Route::show("10716"));
        assert_eq!(
            Route::parse("/show/10716?genre=3"),
            Route::Show {
                id: ShowId::from("10716"),
                genre: Some(3)
            }
        );
        assert_eq!(Route::parse("/show/7?genre=x"), Route::show("7"));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/show/"), Route::NotFound("/show/".into()));
        assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".into()));
        assert_eq!(Route::parse("/show/1/2"), Route::NotFound("/show/1/2".into()));
    }

    #[test]
    fn path_is_inverse_of_parse() {
        for route in [
            Route::Catalog,
            Route::Favourites,
            Route::show("5"),
            Route::Show {
                id: ShowId::from("5"),
                genre: Some(2),
            },
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn back_never_pops_root() {
        let mut nav = Navigator::default();
        assert!(!nav.back());
        nav.go(Route::show("1"));
        nav.go(Route::show("1"));
        nav.go(Route::Favourites);
        assert_eq!(nav.depth(), 3);
        assert!(nav.back());
        assert_eq!(*nav.current(), Route::show("1"));
        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(*nav.current(), Route::Catalog);
    }
}
