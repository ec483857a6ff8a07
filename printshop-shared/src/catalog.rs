/// Storefront product categories
///
/// The fixed taxonomy the catalog is browsed by. Slugs are stable URL
/// segments; display names are what the storefront shows.

use serde::Serialize;
use std::{fmt, str::FromStr};

/// Top-level catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Offset-printed business stationery, leaflets, catalogs
    CommercialPrint,
    /// Short-run on-demand digital output
    DigitalPrint,
    /// Banners, posters, signage
    LargeFormat,
    /// Boxes, bags, labels
    Packaging,
    /// Branded merchandise
    PromotionalItems,
    /// Planned product sets and sample kits
    PlanningSamples,
    /// Customer-designed products using the online editor
    SelfDesign,
}

impl Category {
    /// Every category, in storefront menu order
    pub const ALL: [Category; 7] = [
        Category::CommercialPrint,
        Category::DigitalPrint,
        Category::LargeFormat,
        Category::Packaging,
        Category::PromotionalItems,
        Category::PlanningSamples,
        Category::SelfDesign,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::CommercialPrint => "commercial-print",
            Category::DigitalPrint => "digital-print",
            Category::LargeFormat => "large-format",
            Category::Packaging => "packaging",
            Category::PromotionalItems => "promotional-items",
            Category::PlanningSamples => "planning-samples",
            Category::SelfDesign => "self-design",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::CommercialPrint => "Commercial Print",
            Category::DigitalPrint => "Digital Print",
            Category::LargeFormat => "Large Format",
            Category::Packaging => "Packaging",
            Category::PromotionalItems => "Promotional Items",
            Category::PlanningSamples => "Planning & Samples",
            Category::SelfDesign => "Self Design",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::CommercialPrint => "Business cards, flyers, brochures and catalogs",
            Category::DigitalPrint => "Fast short-run printing on demand",
            Category::LargeFormat => "Banners, posters and signage",
            Category::Packaging => "Boxes, shopping bags and labels",
            Category::PromotionalItems => "Branded goods and giveaways",
            Category::PlanningSamples => "Curated product sets and sample kits",
            Category::SelfDesign => "Design your own products in the online editor",
        }
    }

    /// Looks a category up by slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown category slug
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Serializable view of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<Category> for CategorySummary {
    fn from(category: Category) -> Self {
        Self {
            slug: category.slug(),
            name: category.display_name(),
            description: category.description(),
        }
    }
}

/// All categories as summaries, in menu order
pub fn list_categories() -> Vec<CategorySummary> {
    Category::ALL.into_iter().map(CategorySummary::from).collect()
}
