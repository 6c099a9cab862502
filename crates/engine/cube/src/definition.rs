use crate::error::StructureError;
use crate::scene::{Document, Node};
use crate::slot::CubieSlot;
use std::ops::{Index, IndexMut};

/// Assignment of all 26 cubie slots to their scene nodes
///
/// Always total: there is no way to build a definition with a slot missing.
/// Cloning deep-copies every node, so copies never share mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeDefinition {
    nodes: [Node; CubieSlot::COUNT],
}

impl CubeDefinition {
    /// Build a definition from nodes given in canonical slot order
    pub fn from_canonical(nodes: [Node; CubieSlot::COUNT]) -> Self {
        Self { nodes }
    }

    /// Extract the 26 named cubie nodes of a template document
    pub fn from_document(document: &Document) -> Result<Self, StructureError> {
        Self::from_nodes(&document.nodes)
    }

    /// Match each node name against the slot node names (`01_UBL` .. `26_DFR`)
    pub fn from_nodes(nodes: &[Node]) -> Result<Self, StructureError> {
        if nodes.len() != CubieSlot::COUNT {
            return Err(StructureError::NodeCount {
                expected: CubieSlot::COUNT,
                found: nodes.len(),
            });
        }

        let mut slots: [Option<Node>; CubieSlot::COUNT] = Default::default();
        for node in nodes {
            let slot = node
                .name
                .as_deref()
                .and_then(CubieSlot::from_node_name)
                .ok_or_else(|| StructureError::UnexpectedNodeName(node.name.clone()))?;

            let entry = &mut slots[slot.index()];
            if entry.is_some() {
                return Err(StructureError::DuplicateNode(slot));
            }
            *entry = Some(node.clone());
            tracing::trace!(%slot, "bound template node");
        }

        // 26 distinct slots out of 26 nodes: every entry is filled
        Ok(Self {
            nodes: slots.map(|node| node.unwrap_or_default()),
        })
    }

    pub fn get(&self, slot: CubieSlot) -> &Node {
        &self.nodes[slot.index()]
    }

    pub fn get_mut(&mut self, slot: CubieSlot) -> &mut Node {
        &mut self.nodes[slot.index()]
    }

    /// Slots and nodes in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (CubieSlot, &Node)> {
        CubieSlot::ALL.into_iter().zip(self.nodes.iter())
    }

    /// Nodes in canonical order, ready to become a document's node list
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes.into()
    }
}

impl Index<CubieSlot> for CubeDefinition {
    type Output = Node;

    fn index(&self, slot: CubieSlot) -> &Node {
        self.get(slot)
    }
}

impl IndexMut<CubieSlot> for CubeDefinition {
    fn index_mut(&mut self, slot: CubieSlot) -> &mut Node {
        self.get_mut(slot)
    }
}
