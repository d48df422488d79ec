//! SDFormat validation utilities.
//!
//! Validates the kinematic structure of a model and computes the order in
//! which its links form a tree.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SdfError};
use crate::types::SdfModel;

/// Validation result containing the root links and kinematic structure.
#[derive(Debug)]
pub struct ValidationResult {
    /// Links with no parent link, in declaration order.
    pub root_links: Vec<String>,
    /// Map from link name to its parent joint name (world joints included).
    pub link_parent_joint: HashMap<String, String>,
    /// Map from link name to its child joint names, in declaration order.
    pub link_child_joints: HashMap<String, Vec<String>>,
    /// Links in depth-first pre-order from the roots.
    pub sorted_links: Vec<String>,
}

/// Validate an SDFormat model.
///
/// This checks:
/// - No duplicate link or joint names
/// - All joints reference valid links (`world` is a valid parent)
/// - Every link has at most one parent joint
/// - At least one root link when the model has links
/// - Every link is reachable from a root (no kinematic loops)
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn validate(model: &SdfModel) -> Result<ValidationResult> {
    check_duplicates(model)?;

    let link_names: HashSet<&str> = model.links.iter().map(|l| l.name.as_str()).collect();

    let mut link_parent_joint: HashMap<String, String> = HashMap::new();
    let mut link_child_joints: HashMap<String, Vec<String>> = model
        .links
        .iter()
        .map(|l| (l.name.clone(), Vec::new()))
        .collect();

    for joint in &model.joints {
        if !joint.is_world_parent() && !link_names.contains(joint.parent.as_str()) {
            return Err(SdfError::undefined_link(&joint.parent, &joint.name));
        }
        if !link_names.contains(joint.child.as_str()) {
            return Err(SdfError::undefined_link(&joint.child, &joint.name));
        }
        if joint.parent == joint.child {
            return Err(SdfError::KinematicLoop(format!(
                "joint '{}' connects link '{}' to itself",
                joint.name, joint.child
            )));
        }

        if link_parent_joint.contains_key(&joint.child) {
            return Err(SdfError::KinematicLoop(format!(
                "link '{}' has multiple parent joints",
                joint.child
            )));
        }
        link_parent_joint.insert(joint.child.clone(), joint.name.clone());

        if !joint.is_world_parent() {
            link_child_joints
                .entry(joint.parent.clone())
                .or_default()
                .push(joint.name.clone());
        }
    }

    let root_links: Vec<String> = model
        .links
        .iter()
        .filter(|l| {
            link_parent_joint
                .get(&l.name)
                .and_then(|j| model.joint(j))
                .is_none_or(|j| j.is_world_parent())
        })
        .map(|l| l.name.clone())
        .collect();

    if root_links.is_empty() && !model.links.is_empty() {
        return Err(SdfError::NoRootLink(model.name.clone()));
    }

    let sorted_links = preorder(model, &root_links, &link_child_joints);
    if sorted_links.len() != model.links.len() {
        let reached: HashSet<&str> = sorted_links.iter().map(String::as_str).collect();
        let stranded: Vec<&str> = model
            .links
            .iter()
            .map(|l| l.name.as_str())
            .filter(|n| !reached.contains(n))
            .collect();
        return Err(SdfError::KinematicLoop(format!(
            "links not reachable from a root: {}",
            stranded.join(", ")
        )));
    }

    Ok(ValidationResult {
        root_links,
        link_parent_joint,
        link_child_joints,
        sorted_links,
    })
}

/// Check for duplicate link and joint names.
fn check_duplicates(model: &SdfModel) -> Result<()> {
    let mut link_names = HashSet::new();
    for link in &model.links {
        if !link_names.insert(&link.name) {
            return Err(SdfError::DuplicateLink(link.name.clone()));
        }
    }

    let mut joint_names = HashSet::new();
    for joint in &model.joints {
        if !joint_names.insert(&joint.name) {
            return Err(SdfError::DuplicateJoint(joint.name.clone()));
        }
    }

    Ok(())
}

/// Depth-first pre-order over the link tree. Each link has at most one
/// parent joint here, so no link is reached twice.
fn preorder(
    model: &SdfModel,
    roots: &[String],
    link_child_joints: &HashMap<String, Vec<String>>,
) -> Vec<String> {
    let mut sorted = Vec::with_capacity(model.links.len());
    let mut stack: Vec<&str> = roots.iter().rev().map(String::as_str).collect();

    while let Some(link) = stack.pop() {
        sorted.push(link.to_string());
        if let Some(child_joints) = link_child_joints.get(link) {
            for joint_name in child_joints.iter().rev() {
                if let Some(joint) = model.joint(joint_name) {
                    stack.push(&joint.child);
                }
            }
        }
    }
    sorted
}
