use serde::Deserialize;

/// `?search=` de los listados del catálogo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn new(search: &str) -> Self {
        Self {
            search: Some(search.to_string()),
        }
    }

    /// Término normalizado; `None` si viene vacío
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    /// Sin término todo coincide
    pub fn matches(&self, fields: &[&str]) -> bool {
        match self.term() {
            Some(term) => fields.iter().any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }
}
