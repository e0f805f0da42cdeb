//! Product rows as delivered by the product source

use crate::core::filters::{self, lenient_number, lenient_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category a product belongs to (display only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    /// Fields the table does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One product record flowing through the query pipeline
///
/// Only `title` and `price` are interpreted. Every field is optional and a
/// missing or malformed value is defaulted rather than rejected, so a single
/// bad record never fails the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, display only
    #[serde(default)]
    pub id: Option<Value>,

    /// Searchable and sortable title
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,

    /// Sortable price; unparseable values deserialize as `None`
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub images: Vec<Value>,

    /// Fields the table does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display cells for one table row, every field defaulted to `""`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowCells {
    pub id: String,
    pub image: String,
    pub title: String,
    pub price: String,
    pub category: String,
}

impl Product {
    /// Create a product with an id, title and price
    pub fn new(id: i64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: Some(Value::from(id)),
            title: Some(title.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    /// Set the category name
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(Category {
            name: Some(name.into()),
            extra: Map::new(),
        });
        self
    }

    /// Title, or `""` when missing
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Trimmed, lower-cased title used for search and title ordering
    pub fn normalized_title(&self) -> String {
        filters::normalize(self.title())
    }

    /// Price used for ordering, 0 when missing
    pub fn price_value(&self) -> f64 {
        self.price.filter(|p| !p.is_nan()).unwrap_or(0.0)
    }

    /// Category name, or `""` when missing
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("")
    }

    /// First image URL, or `""`
    pub fn image(&self) -> &str {
        self.images
            .first()
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Display cells for rendering
    pub fn cells(&self) -> RowCells {
        let id = match &self.id {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        RowCells {
            id,
            image: self.image().to_string(),
            title: self.title().to_string(),
            price: self.price.map(|p| p.to_string()).unwrap_or_default(),
            category: self.category_name().to_string(),
        }
    }
}
