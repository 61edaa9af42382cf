use super::{DrawingSurface, SurfaceResolver};
use std::collections::HashMap;

/// Named surfaces the grid can be constructed from by key
pub struct SurfaceRegistry<S> {
    surfaces: HashMap<String, S>,
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<S: DrawingSurface + Clone> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, surface: S) -> &mut Self {
        self.surfaces.insert(key.into(), surface);
        self
    }

    pub fn unregister(&mut self, key: &str) -> Option<S> {
        self.surfaces.remove(key)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<S: DrawingSurface + Clone> SurfaceResolver for SurfaceRegistry<S> {
    type Surface = S;

    fn resolve(&self, key: &str) -> Option<S> {
        self.surfaces.get(key).cloned()
    }
}
