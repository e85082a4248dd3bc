// Curated featured-repository allow-list.

/// Featured repositories, in display order.
pub const DEFAULT_FEATURED: &[&str] = &["ppi-tui-predictor", "solar-ai-assistant", "surgical-nav-ai"];

/// Ordered allow-list; defines both membership and display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedSet {
    names: Vec<String>,
}

impl FeaturedSet {
    /// Build from names in display order. Later duplicates are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    /// Display position of `name`, if featured.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FeaturedSet {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURED.iter().copied())
    }
}
