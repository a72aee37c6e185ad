use crate::nodes::NodeDescriptor;

/// Role tag that marks a node as a Kafka broker.
pub const DEFAULT_BROKER_ROLE: &str = "kafka";

/// Broker addresses picked out of the node list.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerSelection {
    pub ips: Vec<String>,
    /// No node carried the role, so every node was taken.
    pub fell_back: bool,
}

impl BrokerSelection {
    pub fn count(&self) -> usize {
        self.ips.len()
    }
}

/// Hosts of nodes carrying `role`, in input order and without dedup. When no
/// node carries the role, the hosts of all nodes are returned instead.
pub fn derive_broker_ips(nodes: &[NodeDescriptor], role: &str) -> BrokerSelection {
    let ips: Vec<String> = nodes
        .iter()
        .filter(|node| node.has_role(role))
        .map(|node| node.host.clone())
        .collect();

    if !ips.is_empty() {
        return BrokerSelection {
            ips,
            fell_back: false,
        };
    }

    BrokerSelection {
        ips: nodes.iter().map(|node| node.host.clone()).collect(),
        fell_back: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(host: &str, roles: &[&str]) -> NodeDescriptor {
        NodeDescriptor {
            host: host.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_filters_by_role_in_order() {
        let nodes = vec![
            node("10.0.0.3", &["kafka"]),
            node("10.0.0.1", &["web"]),
            node("10.0.0.2", &["zk", "kafka"]),
        ];
        let selection = derive_broker_ips(&nodes, DEFAULT_BROKER_ROLE);
        assert_eq!(selection.ips, vec!["10.0.0.3", "10.0.0.2"]);
        assert!(!selection.fell_back);
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_duplicates_preserved() {
        let nodes = vec![node("10.0.0.1", &["kafka"]), node("10.0.0.1", &["kafka"])];
        let selection = derive_broker_ips(&nodes, DEFAULT_BROKER_ROLE);
        assert_eq!(selection.ips, vec!["10.0.0.1", "10.0.0.1"]);
    }

    #[test]
    fn test_falls_back_to_all_nodes() {
        let nodes = vec![node("10.0.0.1", &["web"]), node("10.0.0.2", &[])];
        let selection = derive_broker_ips(&nodes, DEFAULT_BROKER_ROLE);
        assert_eq!(selection.ips, vec!["10.0.0.1", "10.0.0.2"]);
        assert!(selection.fell_back);
    }

    #[test]
    fn test_roleless_nodes_excluded_when_filter_matches() {
        let nodes = vec![node("10.0.0.1", &[]), node("10.0.0.2", &["kafka"])];
        let selection = derive_broker_ips(&nodes, DEFAULT_BROKER_ROLE);
        assert_eq!(selection.ips, vec!["10.0.0.2"]);
    }

    #[test]
    fn test_empty_node_list() {
        let selection = derive_broker_ips(&[], DEFAULT_BROKER_ROLE);
        assert!(selection.ips.is_empty());
        assert!(selection.fell_back);
    }

    #[test]
    fn test_custom_role() {
        let nodes = vec![node("a", &["kafka"]), node("b", &["broker"])];
        let selection = derive_broker_ips(&nodes, "broker");
        assert_eq!(selection.ips, vec!["b"]);
    }
}
