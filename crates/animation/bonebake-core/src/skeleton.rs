//! Skeleton topology: the bone declaration tree supplied alongside animations.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::BakeError;

/// One declared bone and its children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneDecl {
    pub name: String,
    #[serde(default)]
    pub children: Vec<BoneDecl>,
}

impl BoneDecl {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<BoneDecl>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

/// Flattened view of one bone: its name and the arena index of its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatBone<'a> {
    pub name: &'a str,
    pub parent: Option<usize>,
}

/// Forest of root bones. Acyclic by construction (children are owned).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    pub roots: Vec<BoneDecl>,
}

impl Skeleton {
    pub fn new(roots: Vec<BoneDecl>) -> Self {
        Self { roots }
    }

    /// Reject skeletons that declare the same bone name twice.
    pub fn validate(&self) -> Result<(), BakeError> {
        let mut seen = HashSet::new();
        for bone in self.flatten() {
            if !seen.insert(bone.name) {
                return Err(BakeError::DuplicateBone(bone.name.to_string()));
            }
        }
        Ok(())
    }

    /// Pre-order flattening; every parent precedes its children.
    pub fn flatten(&self) -> Vec<FlatBone<'_>> {
        let mut out = Vec::new();
        let mut stack: Vec<(&BoneDecl, Option<usize>)> =
            self.roots.iter().rev().map(|b| (b, None)).collect();
        while let Some((bone, parent)) = stack.pop() {
            let index = out.len();
            out.push(FlatBone {
                name: bone.name.as_str(),
                parent,
            });
            stack.extend(bone.children.iter().rev().map(|c| (c, Some(index))));
        }
        out
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flatten().iter().any(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> Skeleton {
        Skeleton::new(vec![
            BoneDecl::with_children(
                "body",
                vec![
                    BoneDecl::with_children("arm", vec![BoneDecl::leaf("hand")]),
                    BoneDecl::leaf("head"),
                ],
            ),
            BoneDecl::leaf("tail"),
        ])
    }

    #[test]
    fn flatten_is_preorder_with_parent_indices() {
        let skeleton = arm();
        let flat = skeleton.flatten();
        let names: Vec<&str> = flat.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["body", "arm", "hand", "head", "tail"]);
        let parents: Vec<Option<usize>> = flat.iter().map(|b| b.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1), Some(0), None]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let skeleton = Skeleton::new(vec![BoneDecl::with_children(
            "body",
            vec![BoneDecl::leaf("body")],
        )]);
        assert_eq!(
            skeleton.validate(),
            Err(BakeError::DuplicateBone("body".into()))
        );
        assert!(arm().validate().is_ok());
    }
}
