//! Screenshot lightbox navigation

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// Lightbox over a project's screenshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    urls: Vec<String>,
    index: Option<usize>,
}

impl Lightbox {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls, index: None }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Index of the screenshot on display
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// URL of the screenshot on display
    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| self.urls[i].as_str())
    }

    /// Open at `index`, wrapped into range. An empty gallery stays closed.
    pub fn open(&mut self, index: usize) -> bool {
        if self.urls.is_empty() {
            return false;
        }
        self.index = Some(index % self.urls.len());
        true
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    /// Show the next screenshot, wrapping from the last to the first
    pub fn next(&mut self) -> Option<usize> {
        let len = self.urls.len();
        self.index = self.index.map(|i| (i + 1) % len);
        self.index
    }

    /// Show the previous screenshot, wrapping from the first to the last
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.urls.len();
        self.index = self.index.map(|i| (i + len - 1) % len);
        self.index
    }

    /// Apply a key press; returns true when the key was handled
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowLeft => {
                self.previous();
                true
            }
            Key::ArrowRight => {
                self.next();
                true
            }
            Key::Escape => {
                self.close();
                true
            }
            Key::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: usize) -> Lightbox {
        Lightbox::new((0..n).map(|i| format!("https://cdn.example/{}.png", i)).collect())
    }

    #[test]
    fn wraps_at_both_ends_for_every_length() {
        for n in 1..=6 {
            let mut lightbox = gallery(n);
            assert!(lightbox.open(n - 1));
            assert_eq!(lightbox.next(), Some(0));
            assert_eq!(lightbox.previous(), Some(n - 1));

            lightbox.open(0);
            assert_eq!(lightbox.previous(), Some(n - 1));
            assert_eq!(lightbox.next(), Some(0));
        }
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut lightbox = gallery(4);
        lightbox.open(2);
        for _ in 0..4 {
            lightbox.next();
        }
        assert_eq!(lightbox.index(), Some(2));
        for _ in 0..4 {
            lightbox.previous();
        }
        assert_eq!(lightbox.index(), Some(2));
    }

    #[test]
    fn empty_gallery_never_opens() {
        let mut lightbox = gallery(0);
        assert!(!lightbox.open(0));
        assert_eq!(lightbox.next(), None);
        assert_eq!(lightbox.previous(), None);
        assert!(!lightbox.handle_key(Key::ArrowRight));
    }

    #[test]
    fn keyboard_navigation() {
        let mut lightbox = gallery(3);
        assert!(!lightbox.handle_key(Key::ArrowRight));

        lightbox.open(0);
        assert!(lightbox.handle_key(Key::ArrowLeft));
        assert_eq!(lightbox.current(), Some("https://cdn.example/2.png"));
        assert!(lightbox.handle_key(Key::ArrowRight));
        assert_eq!(lightbox.index(), Some(0));
        assert!(!lightbox.handle_key(Key::Other));
        assert!(lightbox.handle_key(Key::Escape));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn open_wraps_out_of_range_index() {
        let mut lightbox = gallery(3);
        lightbox.open(7);
        assert_eq!(lightbox.index(), Some(1));
    }
}
