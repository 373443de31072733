use domain::Collection;
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use crate::api::PortfolioClient;
use crate::error::ClientError;

/// Raw-JSON editor over whole collections.
///
/// Each collection has a saved document (what the server last confirmed) and a text
/// draft. Saving parses the draft first, so malformed text never reaches the server.
#[derive(Debug, Clone)]
pub struct AdminEditor {
    active: Collection,
    saved: HashMap<Collection, Value>,
    drafts: HashMap<Collection, String>,
}

fn pretty(document: &Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}

impl AdminEditor {
    pub fn from_documents(documents: impl IntoIterator<Item = (Collection, Value)>) -> Self {
        let saved: HashMap<Collection, Value> = documents.into_iter().collect();
        let drafts = saved.iter().map(|(c, doc)| (*c, pretty(doc))).collect();
        Self {
            active: Collection::Profile,
            saved,
            drafts,
        }
    }

    pub async fn load(client: &PortfolioClient) -> Result<Self, ClientError> {
        let mut documents = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            documents.push((collection, client.fetch_raw(collection).await?));
        }
        Ok(Self::from_documents(documents))
    }

    pub fn active(&self) -> Collection {
        self.active
    }

    pub fn select(&mut self, collection: Collection) {
        self.active = collection;
    }

    pub fn draft(&self) -> &str {
        self.drafts.get(&self.active).map(String::as_str).unwrap_or("")
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.drafts.insert(self.active, text.into());
    }

    pub fn saved(&self) -> Option<&Value> {
        self.saved.get(&self.active)
    }

    pub fn is_dirty(&self) -> bool {
        match (self.saved(), self.parse_draft()) {
            (Some(saved), Ok(draft)) => *saved != draft,
            _ => true,
        }
    }

    pub fn parse_draft(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(self.draft())?)
    }

    /// Re-indents the draft. Leaves it untouched when it does not parse.
    pub fn format(&mut self) -> Result<(), ClientError> {
        let document = self.parse_draft()?;
        self.edit(pretty(&document));
        Ok(())
    }

    /// Discards the draft in favour of the saved document.
    pub fn reset(&mut self) {
        let text = self.saved().map(pretty).unwrap_or_default();
        self.edit(text);
    }

    pub async fn save(&mut self, client: &PortfolioClient) -> Result<String, ClientError> {
        let document = self.parse_draft()?;
        let message = client.replace_collection(self.active, &document).await?;
        info!("Saved {}", self.active);
        self.saved.insert(self.active, document);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor() -> AdminEditor {
        AdminEditor::from_documents([
            (Collection::Profile, json!({ "name": "Ada" })),
            (Collection::Projects, json!([{ "id": "p1" }])),
        ])
    }

    #[test]
    fn test_drafts_start_pretty_and_clean() {
        let editor = editor();
        assert_eq!(editor.active(), Collection::Profile);
        assert_eq!(editor.draft(), "{\n  \"name\": \"Ada\"\n}");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_format_and_reset() {
        let mut editor = editor();
        editor.select(Collection::Projects);
        editor.edit(r#"[{"id":"p1"},{"id":"p2"}]"#);
        assert!(editor.is_dirty());

        editor.format().unwrap();
        assert!(editor.draft().contains("\n  {\n    \"id\": \"p2\"\n  }"));

        editor.reset();
        assert_eq!(editor.parse_draft().unwrap(), json!([{ "id": "p1" }]));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_format_rejects_invalid_json() {
        let mut editor = editor();
        editor.edit("{ broken");
        assert!(matches!(editor.format(), Err(ClientError::InvalidJson(_))));
        assert_eq!(editor.draft(), "{ broken");
    }
}
