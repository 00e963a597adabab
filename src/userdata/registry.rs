// file: src/userdata/registry.rs
// version: 1.0.0
// guid: 6e8bd5ca-fe69-4427-b91e-f6c241d4b84a

//! Known control plane nodes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identity of a master node within its cluster
pub type NodeId = u32;

/// Private network address of a master node
pub type NodeAddress = String;

/// One entry of the etcd initial cluster, as seen by the skeletons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterMember {
    pub id: NodeId,
    pub address: NodeAddress,
}

/// Master nodes known at render time, ordered by identity.
///
/// Every peer derives the etcd initial cluster from this registry, so
/// iteration is always in ascending [`NodeId`] order no matter how the
/// registry was filled. Inserting an identity twice keeps the last address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasterRegistry {
    nodes: BTreeMap<NodeId, NodeAddress>,
}

impl MasterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a master, returning the address it replaced, if any
    pub fn insert(&mut self, id: NodeId, address: impl Into<NodeAddress>) -> Option<NodeAddress> {
        self.nodes.insert(id, address.into())
    }

    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate in ascending identity order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.nodes.iter().map(|(id, addr)| (*id, addr.as_str()))
    }

    /// Members in ascending identity order
    pub fn members(&self) -> Vec<MasterMember> {
        self.iter()
            .map(|(id, address)| MasterMember {
                id,
                address: address.to_string(),
            })
            .collect()
    }
}

impl<A: Into<NodeAddress>> FromIterator<(NodeId, A)> for MasterRegistry {
    fn from_iter<I: IntoIterator<Item = (NodeId, A)>>(iter: I) -> Self {
        Self {
            nodes: iter
                .into_iter()
                .map(|(id, addr)| (id, addr.into()))
                .collect(),
        }
    }
}

impl<A: Into<NodeAddress>, const N: usize> From<[(NodeId, A); N]> for MasterRegistry {
    fn from(nodes: [(NodeId, A); N]) -> Self {
        nodes.into_iter().collect()
    }
}
