/// Cyclic navigation over the gallery's images.
#[derive(Debug, Clone, Default)]
pub struct LightboxNavigator {
    sources: Vec<String>,
    current: usize,
}

impl LightboxNavigator {
    /// `sources` is fixed for the navigator's lifetime.
    pub fn new(sources: Vec<String>) -> Self {
        Self { sources, current: 0 }
    }

    pub fn open(&mut self, index: usize) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.current = index % self.sources.len();
        self.current_source()
    }

    /// Step by `direction` images, wrapping at both ends.
    pub fn advance(&mut self, direction: isize) -> Option<&str> {
        let len = self.sources.len() as isize;
        if len == 0 {
            return None;
        }
        self.current = (self.current as isize + direction).rem_euclid(len) as usize;
        self.current_source()
    }

    pub fn current_source(&self) -> Option<&str> {
        self.sources.get(self.current).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
