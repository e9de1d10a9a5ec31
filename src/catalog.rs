//! The pattern catalog: which patterns exist, their categories, and the
//! relationships declared between them.
//!
//! A [`Catalog`] is loaded once at startup and never mutated afterwards.
//! Cross-references are not checked here. A relationship naming an
//! uncategorized pattern is kept as declared and filtered out by the graph
//! builder (see [`Catalog::dangling`] for a report).

use crate::error::{NetworkError, Result};
use crate::model::Category;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk catalog formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Yaml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(CatalogFormat::Toml),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            "json" => Ok(CatalogFormat::Json),
            _ => Err(NetworkError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A relationship whose source or target has no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRelationship {
    pub source: String,
    pub target: String,
    /// Names among `source`/`target` that are missing from the category table.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: IndexMap<String, Category>,

    #[serde(default)]
    relationships: IndexMap<String, Vec<String>>,
}

const BUILTIN_CATEGORIES: &[(&str, Category)] = &[
    ("Fractal Self-Similarity", Category::Structural),
    ("Emergent Behavior", Category::Process),
    ("Feedback Loops", Category::Process),
    ("Network Structure", Category::Structural),
    ("Hierarchical Organization", Category::Structural),
    ("Cyclical Patterns", Category::Process),
    ("Resource Distribution", Category::Relationship),
    ("Adaptation and Evolution", Category::Process),
    ("Symbiosis and Mutualism", Category::Relationship),
    ("Boundaries and Interfaces", Category::Resilience),
];

const BUILTIN_RELATIONSHIPS: &[(&str, &[&str])] = &[
    (
        "Fractal Self-Similarity",
        &["Emergent Behavior", "Hierarchical Organization"],
    ),
    (
        "Emergent Behavior",
        &["Fractal Self-Similarity", "Feedback Loops", "Self-Organization"],
    ),
    (
        "Feedback Loops",
        &["Emergent Behavior", "Cyclical Patterns", "Adaptive Capacity"],
    ),
    (
        "Network Structure",
        &["Fractal Self-Similarity", "Resource Distribution"],
    ),
    (
        "Hierarchical Organization",
        &["Fractal Self-Similarity", "Network Structure"],
    ),
    (
        "Cyclical Patterns",
        &["Feedback Loops", "Adaptation and Evolution"],
    ),
    (
        "Resource Distribution",
        &["Network Structure", "Symbiosis and Mutualism"],
    ),
    (
        "Adaptation and Evolution",
        &["Cyclical Patterns", "Feedback Loops"],
    ),
    (
        "Symbiosis and Mutualism",
        &["Resource Distribution", "Adaptation and Evolution"],
    ),
    (
        "Boundaries and Interfaces",
        &["Symbiosis and Mutualism", "Hierarchical Organization"],
    ),
];

impl Catalog {
    /// The compiled-in collection of natural patterns.
    pub fn builtin() -> Self {
        Self::from_parts(
            BUILTIN_CATEGORIES
                .iter()
                .map(|(name, category)| (name.to_string(), *category)),
            BUILTIN_RELATIONSHIPS.iter().map(|(name, related)| {
                (
                    name.to_string(),
                    related.iter().map(|r| r.to_string()).collect(),
                )
            }),
        )
    }

    /// Build a catalog from explicit mappings, keeping iteration order.
    ///
    /// A name repeated in `relationships` has its lists concatenated.
    pub fn from_parts<C, R>(categories: C, relationships: R) -> Self
    where
        C: IntoIterator<Item = (String, Category)>,
        R: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut merged: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, related) in relationships {
            merged.entry(name).or_default().extend(related);
        }
        Self {
            categories: categories.into_iter().collect(),
            relationships: merged,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            patterns = catalog.len(),
            "Loaded pattern catalog"
        );
        Ok(catalog)
    }

    pub fn parse(content: &str, format: CatalogFormat) -> Result<Self> {
        let catalog = match format {
            CatalogFormat::Toml => toml::from_str(content)?,
            CatalogFormat::Yaml => serde_yaml::from_str(content)?,
            CatalogFormat::Json => serde_json::from_str(content)?,
        };
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match CatalogFormat::from_path(path)? {
            CatalogFormat::Toml => toml::to_string_pretty(self)?,
            CatalogFormat::Yaml => serde_yaml::to_string(self)?,
            CatalogFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, Category)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), *category))
    }

    pub fn relationships(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.relationships
            .iter()
            .map(|(name, related)| (name.as_str(), related.as_slice()))
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.categories.get(name).copied()
    }

    pub fn is_categorized(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Number of categorized patterns.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every declared relationship with at least one uncategorized endpoint,
    /// in declaration order.
    pub fn dangling(&self) -> Vec<DanglingRelationship> {
        let mut dangling = Vec::new();
        for (source, related) in self.relationships() {
            for target in related {
                let missing: Vec<String> = [source, target.as_str()]
                    .into_iter()
                    .filter(|name| !self.is_categorized(name))
                    .map(str::to_string)
                    .collect();
                if !missing.is_empty() {
                    dangling.push(DanglingRelationship {
                        source: source.to_string(),
                        target: target.clone(),
                        missing,
                    });
                }
            }
        }
        dangling
    }

    /// Relationships declared in one direction only, among categorized patterns.
    pub fn one_sided(&self) -> Vec<(String, String)> {
        let declares = |from: &str, to: &str| {
            self.relationships
                .get(from)
                .is_some_and(|related| related.iter().any(|r| r == to))
        };
        let mut result = Vec::new();
        for (source, related) in self.relationships() {
            for target in related {
                if self.is_categorized(source)
                    && self.is_categorized(target)
                    && source != target
                    && !declares(target, source)
                {
                    result.push((source.to_string(), target.clone()));
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(pairs: &[(&str, Category)]) -> Vec<(String, Category)> {
        pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    fn rels(pairs: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
        pairs
            .iter()
            .map(|(n, r)| (n.to_string(), r.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_builtin_has_ten_patterns() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(
            catalog.category_of("Boundaries and Interfaces"),
            Some(Category::Resilience)
        );
        let first = catalog.categories().next().unwrap();
        assert_eq!(first, ("Fractal Self-Similarity", Category::Structural));
    }

    #[test]
    fn test_builtin_dangling_references() {
        let dangling = Catalog::builtin().dangling();
        let targets: Vec<_> = dangling.iter().map(|d| d.target.as_str()).collect();
        assert_eq!(targets, vec!["Self-Organization", "Adaptive Capacity"]);
        assert_eq!(dangling[0].missing, vec!["Self-Organization".to_string()]);
    }

    #[test]
    fn test_dangling_reports_uncategorized_source() {
        let catalog = Catalog::from_parts(
            names(&[("A", Category::Structural)]),
            rels(&[("Z", &["A"])]),
        );
        let dangling = catalog.dangling();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].missing, vec!["Z".to_string()]);
    }

    #[test]
    fn test_from_parts_merges_repeated_sources() {
        let catalog = Catalog::from_parts(
            names(&[("A", Category::Structural), ("B", Category::Process)]),
            rels(&[("A", &["B"]), ("A", &["A"])]),
        );
        let (_, related) = catalog.relationships().next().unwrap();
        assert_eq!(related, ["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_one_sided_relationships() {
        let catalog = Catalog::from_parts(
            names(&[
                ("A", Category::Structural),
                ("B", Category::Process),
                ("C", Category::Process),
            ]),
            rels(&[("A", &["B", "C"]), ("B", &["A"])]),
        );
        assert_eq!(
            catalog.one_sided(),
            vec![("A".to_string(), "C".to_string())]
        );
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[categories]
A = "Structural"
B = "process"

[relationships]
A = ["B", "Z"]
"#;
        let catalog = Catalog::parse(content, CatalogFormat::Toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.category_of("B"), Some(Category::Process));
        assert_eq!(catalog.dangling().len(), 1);
    }

    #[test]
    fn test_parse_yaml_without_relationships() {
        let content = "categories:\n  A: Resilience\n";
        let catalog = Catalog::parse(content, CatalogFormat::Yaml).unwrap();
        assert_eq!(catalog.category_of("A"), Some(Category::Resilience));
        assert_eq!(catalog.relationships().count(), 0);
    }

    #[test]
    fn test_parse_json() {
        let content = r#"{"categories": {"A": "Relationship"}, "relationships": {"A": ["A"]}}"#;
        let catalog = Catalog::parse(content, CatalogFormat::Json).unwrap();
        assert_eq!(catalog.category_of("A"), Some(Category::Relationship));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let content = "[categories]\nA = \"Mystical\"\n";
        assert!(Catalog::parse(content, CatalogFormat::Toml).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("p.YML")).unwrap(),
            CatalogFormat::Yaml
        );
        assert!(matches!(
            CatalogFormat::from_path(Path::new("patterns.txt")),
            Err(NetworkError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_and_load_preserves_contents() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::builtin();

        for file in ["patterns.toml", "patterns.yaml", "patterns.json"] {
            let path = temp_dir.path().join(file);
            catalog.save(&path).unwrap();
            let loaded = Catalog::load(&path).unwrap();
            assert_eq!(loaded.len(), catalog.len(), "{file}");
            assert_eq!(loaded.dangling(), catalog.dangling(), "{file}");
        }
    }
}
