//! Fixed browse catalogue shown on the home screen

use crate::SearchMode;

/// A browsable cuisine (area) or category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseCategory {
    pub name: &'static str,
    pub mode: SearchMode,
}

const fn area(name: &'static str) -> BrowseCategory {
    BrowseCategory {
        name,
        mode: SearchMode::ByArea,
    }
}

const fn category(name: &'static str) -> BrowseCategory {
    BrowseCategory {
        name,
        mode: SearchMode::ByCategory,
    }
}

const BROWSE_CATEGORIES: [BrowseCategory; 18] = [
    area("Italian"),
    area("Chinese"),
    area("Indian"),
    area("Mexican"),
    area("American"),
    area("French"),
    area("Japanese"),
    area("Thai"),
    area("Greek"),
    area("Spanish"),
    category("Breakfast"),
    category("Dessert"),
    category("Vegetarian"),
    category("Seafood"),
    category("Chicken"),
    category("Beef"),
    category("Pasta"),
    category("Vegan"),
];

/// Areas first, then categories, in display order
pub fn browse_categories() -> &'static [BrowseCategory] {
    &BROWSE_CATEGORIES
}

/// Case-insensitive lookup by name
pub fn find_browse_category(name: &str) -> Option<BrowseCategory> {
    let name = name.trim();
    BROWSE_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}
