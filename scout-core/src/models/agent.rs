use serde::{Deserialize, Serialize};

/// One entry in the remote agent directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AgentInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let agent = AgentInfo::new("agent-7");
        assert_eq!(agent.display_name(), "agent-7");

        let agent = AgentInfo::new("agent-7").with_name("Sonic Scout");
        assert_eq!(agent.display_name(), "Sonic Scout");
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{"id": "a1", "name": "Scout", "clients": ["direct"]}"#;
        let agent: AgentInfo = serde_json::from_str(json).unwrap();
        assert_eq!(agent.id, "a1");
        assert_eq!(agent.name.as_deref(), Some("Scout"));
    }
}
