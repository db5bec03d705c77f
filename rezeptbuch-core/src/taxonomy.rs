//! The fixed category/subcategory table.
//!
//! Both the validator and the sort policy read from a single [`Taxonomy`]
//! value. The server builds it once at startup and shares it behind an `Arc`.

/// Subcategory rank used for everything not listed in a priority table.
pub const UNRANKED: usize = usize::MAX;

/// One category with its allowed subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    label: String,
    subcategories: Vec<String>,
    priority: Vec<String>,
}

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            subcategories: Vec::new(),
            priority: Vec::new(),
        }
    }

    /// Restrict the category to these subcategories. An empty list leaves
    /// the subcategory unrestricted.
    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = subcategories.into_iter().map(Into::into).collect();
        self
    }

    /// Display priority for specific subcategories, highest first.
    pub fn with_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = priority.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// An empty subcategory is always accepted, as is anything when the
    /// category has no list of its own.
    pub fn accepts(&self, subcategory: &str) -> bool {
        subcategory.is_empty()
            || self.subcategories.is_empty()
            || self.subcategories.iter().any(|s| s == subcategory)
    }

    pub fn subcategory_rank(&self, subcategory: &str) -> Option<usize> {
        self.priority.iter().position(|s| s == subcategory)
    }
}

/// Ordered list of categories. Position in the list is the display rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The table the deployed recipe collection uses. Labels are stored
    /// verbatim in the database and must not be translated.
    pub fn standard() -> Self {
        Self::new(vec![
            Category::new("Frühstück")
                .with_subcategories(["Brot & Aufstriche", "Sonstiges"])
                .with_priority(["Brot & Aufstriche", "Sonstiges"]),
            Category::new("Hauptspeise").with_subcategories([
                "Burger, Wraps & Bowls",
                "Vegetarische Gerichte",
                "Suppen & Eintöpfe",
                "Pasta & Nudeln",
                "Pizza",
                "Reis & Getreidegerichte",
                "Internationale Küche & Currys",
                "Snacks, Beilage & Fingerfood",
                "Basics & Saucen",
                "Curry-Paste",
            ]),
            Category::new("Bakery").with_subcategories([
                "Kuchen & Torten",
                "Plätzchen & Kleingebäck",
                "Sonstiges Gebäck",
            ]),
            Category::new("Snacks & Desserts"),
            Category::new("Drinks")
                .with_subcategories(["Alkoholische Getränke", "Nicht-alkoholische Getränke"])
                .with_priority(["Alkoholische Getränke", "Nicht-alkoholische Getränke"]),
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Exact, case-sensitive lookup.
    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// 1-based rank; unknown labels rank after every known category.
    pub fn category_rank(&self, label: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c.label == label)
            .map_or(self.categories.len() + 1, |i| i + 1)
    }

    /// Position in the category's priority table, or [`UNRANKED`].
    pub fn subcategory_rank(&self, category: &str, subcategory: &str) -> usize {
        self.category(category)
            .and_then(|c| c.subcategory_rank(subcategory))
            .unwrap_or(UNRANKED)
    }

    pub fn accepts(&self, category: &str, subcategory: &str) -> bool {
        self.category(category)
            .is_some_and(|c| c.accepts(subcategory))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
