use std::collections::HashMap;

use crate::piece::Piece;

/// Platform hook that turns a piece name into a drawable image handle.
pub trait ImageLoader {
    type Handle;

    /// Create the handle for `name` (e.g. `black_rook`). `None` skips the entry.
    fn load(&self, name: &str) -> Option<Self::Handle>;
}

/// Image cache covering all twelve piece names.
///
/// Starts empty and is filled exactly once, the first time any image is
/// requested. Entries are never reloaded afterwards.
#[derive(Debug)]
pub struct ImageSet<H> {
    images: Option<HashMap<String, H>>,
}

impl<H> Default for ImageSet<H> {
    fn default() -> Self {
        ImageSet { images: None }
    }
}

impl<H> ImageSet<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.images.is_some()
    }

    pub fn len(&self) -> usize {
        self.images.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populate the cache if it has not been populated yet.
    pub fn ensure_loaded<L>(&mut self, loader: &L)
    where
        L: ImageLoader<Handle = H> + ?Sized,
    {
        if self.images.is_some() {
            return;
        }
        let images = Piece::all_names()
            .into_iter()
            .filter_map(|name| loader.load(&name).map(|h| (name, h)))
            .collect();
        self.images = Some(images);
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.images.as_ref()?.get(name)
    }

    /// Look up `name`, loading the set first when empty. The handle is
    /// returned on the loading call as well.
    pub fn get_or_load<L>(&mut self, name: &str, loader: &L) -> Option<&H>
    where
        L: ImageLoader<Handle = H> + ?Sized,
    {
        self.ensure_loaded(loader);
        self.get(name)
    }

    /// Iterate over cached `(name, handle)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.images
            .iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }
}
