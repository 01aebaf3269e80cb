/// Limits applied by the containment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Deepest nesting a traversal follows before giving up.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl TreeConfig {
    /// Set the traversal depth limit (at least 1).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(TreeConfig::default().max_depth, 256);
    }

    #[test]
    fn max_depth_never_zero() {
        assert_eq!(TreeConfig::default().with_max_depth(0).max_depth, 1);
        assert_eq!(TreeConfig::default().with_max_depth(12).max_depth, 12);
    }
}
