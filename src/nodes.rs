use serde::Deserialize;

use crate::env::CORAX_NODES;
use crate::error::{Result, TfvarsError};

/// One entry of the CORAX_NODES topology list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeDescriptor {
    pub host: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl NodeDescriptor {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

pub fn parse_nodes(json: &str) -> Result<Vec<NodeDescriptor>> {
    serde_json::from_str(json).map_err(|source| TfvarsError::MalformedInput {
        name: CORAX_NODES.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodes_keeps_order() {
        let nodes = parse_nodes(
            r#"[{"host":"10.0.0.2","roles":["web"]},{"host":"10.0.0.1","roles":["kafka","zk"]}]"#,
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].host, "10.0.0.2");
        assert!(nodes[1].has_role("kafka"));
        assert!(nodes[1].has_role("zk"));
    }

    #[test]
    fn test_roles_optional() {
        let nodes = parse_nodes(r#"[{"host":"10.0.0.9"}]"#).unwrap();
        assert!(nodes[0].roles.is_empty());
        assert!(!nodes[0].has_role("kafka"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let nodes = parse_nodes(r#"[{"host":"h1","roles":[],"name":"corax-1","port":22}]"#).unwrap();
        assert_eq!(nodes[0].host, "h1");
    }

    #[test]
    fn test_role_match_is_exact() {
        let nodes = parse_nodes(r#"[{"host":"h1","roles":["kafka-connect"]}]"#).unwrap();
        assert!(!nodes[0].has_role("kafka"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_nodes("not json"),
            Err(TfvarsError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_missing_host_is_malformed() {
        assert!(matches!(
            parse_nodes(r#"[{"roles":["kafka"]}]"#),
            Err(TfvarsError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_object_instead_of_array_is_malformed() {
        assert!(matches!(
            parse_nodes(r#"{"host":"h1"}"#),
            Err(TfvarsError::MalformedInput { .. })
        ));
    }
}
