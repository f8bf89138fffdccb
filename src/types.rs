use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Topic label assigned to a news record.
///
/// Serialized as the Chinese label stored in the `news.category` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, IntoStaticStr,
)]
pub enum Category {
    #[serde(rename = "政治")]
    #[strum(serialize = "政治")]
    Politics,
    #[serde(rename = "经济")]
    #[strum(serialize = "经济")]
    Economy,
    #[serde(rename = "科技")]
    #[strum(serialize = "科技")]
    Technology,
    #[serde(rename = "社会")]
    #[strum(serialize = "社会")]
    Society,
    #[serde(rename = "国际")]
    #[strum(serialize = "国际")]
    International,
    #[serde(rename = "军事")]
    #[strum(serialize = "军事")]
    Military,
    #[serde(rename = "体育")]
    #[strum(serialize = "体育")]
    Sports,
    #[serde(rename = "娱乐")]
    #[strum(serialize = "娱乐")]
    Entertainment,
    #[serde(rename = "健康")]
    #[strum(serialize = "健康")]
    Health,
    #[serde(rename = "教育")]
    #[strum(serialize = "教育")]
    Education,
    #[serde(rename = "环境")]
    #[strum(serialize = "环境")]
    Environment,
    #[serde(rename = "文化")]
    #[strum(serialize = "文化")]
    Culture,
    #[serde(rename = "旅游")]
    #[strum(serialize = "旅游")]
    Travel,
    #[serde(rename = "财经")]
    #[strum(serialize = "财经")]
    Finance,
}

impl Category {
    /// Category used when no keyword matches.
    pub const FALLBACK: Category = Category::Society;

    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Look up a category by its exact label, e.g. a spreadsheet keyword cell.
    pub fn from_label(label: &str) -> Option<Category> {
        label.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Published,
    Draft,
    Archived,
}

impl Status {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceType {
    #[default]
    Manual,
    Rss,
}

impl SourceType {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Synthetic engagement counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
}

/// A converted news record, one row of the `news` table.
///
/// Field order matches the column order of the generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub description: String,
    pub source: String,
    pub category: Category,

    /// `YYYY-MM-DD HH:MM:SS`
    pub published_at: String,

    /// Admin user id; always null for imported records
    pub created_by: Option<u64>,
    pub is_active: bool,
    pub source_type: SourceType,

    /// Feed id; always null for imported records
    pub rss_source_id: Option<u64>,
    pub link: String,
    pub guid: String,
    pub author: String,
    pub image_url: String,

    /// JSON-encoded list of tag strings
    pub tags: String,
    pub language: String,

    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    pub hotness_score: f64,

    pub status: Status,
    pub is_processed: bool,
}

impl NormalizedRecord {
    pub fn stats(&self) -> EngagementStats {
        EngagementStats {
            view_count: self.view_count,
            like_count: self.like_count,
            comment_count: self.comment_count,
            share_count: self.share_count,
        }
    }

    /// Decode the `tags` column back into a list.
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::iter() {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::iter().count(), 14);
        assert_eq!(Category::from_label("天气"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Economy).unwrap();
        assert_eq!(json, "\"经济\"");
        assert_eq!(Category::Economy.to_string(), "经济");
    }

    #[test]
    fn test_status_and_source_type_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Archived).unwrap(), "\"archived\"");
        assert_eq!(serde_json::to_string(&SourceType::Rss).unwrap(), "\"rss\"");
        assert_eq!("draft".parse::<Status>().unwrap(), Status::Draft);
        assert_eq!(Status::Published.label(), "published");
        assert_eq!(SourceType::Manual.label(), "manual");
    }
}
