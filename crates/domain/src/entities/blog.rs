use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A rendered unit of post content. Blocks are separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    Heading { text: String },
    Subheading { text: String },
    Checklist { items: Vec<ChecklistItem> },
    List { items: Vec<String> },
    Paragraph { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub checked: bool,
    pub text: String,
}

impl BlogPost {
    /// Publication date; accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Another post is related when it shares the category or any tag.
    pub fn is_related_to(&self, other: &BlogPost) -> bool {
        self.slug != other.slug
            && (self.category == other.category || other.tags.iter().any(|t| self.has_tag(t)))
    }

    pub fn blocks(&self) -> Vec<ContentBlock> {
        parse_blocks(&self.content)
    }
}

pub fn parse_blocks(content: &str) -> Vec<ContentBlock> {
    content
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> ContentBlock {
    if let Some(text) = block.strip_prefix("## ") {
        return ContentBlock::Heading {
            text: text.to_string(),
        };
    }

    if block.len() >= 4 && block.starts_with("**") && block.ends_with("**") {
        return ContentBlock::Subheading {
            text: block.replace("**", ""),
        };
    }

    if block.starts_with("- [ ]") || block.starts_with("- [x]") {
        let items = block
            .lines()
            .map(|line| {
                let checked = line.starts_with("- [x]");
                let text = line
                    .strip_prefix("- [x] ")
                    .or_else(|| line.strip_prefix("- [ ] "))
                    .unwrap_or(line);
                ChecklistItem {
                    checked,
                    text: text.to_string(),
                }
            })
            .collect();
        return ContentBlock::Checklist { items };
    }

    if block.starts_with("- ") {
        let items = block
            .lines()
            .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
            .collect();
        return ContentBlock::List { items };
    }

    ContentBlock::Paragraph {
        text: block.to_string(),
    }
}
