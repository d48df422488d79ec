//! Frame graph for semantic pose resolution.
//!
//! Every link, joint and explicit `<frame>` of a model defines a named frame
//! whose pose is written relative to another frame. [`FrameGraph`] follows
//! those `relative_to` chains once and caches the pose of every frame in the
//! model frame.
//!
//! Default frames:
//!
//! | Element | Default `relative_to` |
//! |---------|-----------------------|
//! | link | model frame |
//! | joint | child link |
//! | frame | `attached_to`, else model frame |

use std::collections::HashMap;

use sim_types::Pose;

use crate::error::{Result, SdfError};
use crate::types::SdfModel;

/// Name of the implicit model frame.
pub const MODEL_FRAME: &str = "__model__";

/// Name of the world frame.
pub const WORLD_FRAME: &str = "world";

/// Source of named frame poses.
pub trait PoseFrameGraph {
    /// Pose of the named frame expressed in the model frame.
    ///
    /// # Errors
    ///
    /// Returns [`SdfError::UndefinedFrame`] when no frame has that name.
    fn frame_pose(&self, name: &str) -> Result<Pose>;
}

impl PoseFrameGraph for HashMap<String, Pose> {
    fn frame_pose(&self, name: &str) -> Result<Pose> {
        if name == MODEL_FRAME {
            return Ok(Pose::identity());
        }
        self.get(name)
            .copied()
            .ok_or_else(|| SdfError::undefined_frame(name, "frame lookup"))
    }
}

struct FrameNode {
    pose: Pose,
    relative_to: String,
    context: String,
}

/// Resolved frames of one model.
#[derive(Debug, Clone)]
pub struct FrameGraph {
    model_name: String,
    resolved: HashMap<String, Pose>,
}

impl FrameGraph {
    /// Build and resolve the frame graph of a model.
    ///
    /// The world frame is placed at the inverse of the model pose, so frames
    /// written relative to `world` land where the model pose says.
    ///
    /// # Errors
    ///
    /// - [`SdfError::DuplicateFrame`] when links, joints and frames share a name
    /// - [`SdfError::UndefinedFrame`] for a dangling `relative_to` or `attached_to`
    /// - [`SdfError::FrameCycle`] when a chain of references loops
    pub fn from_model(model: &SdfModel) -> Result<Self> {
        let mut nodes: HashMap<String, FrameNode> = HashMap::new();
        let mut order = Vec::new();

        let mut insert = |name: &str, node: FrameNode| -> Result<()> {
            if name == MODEL_FRAME || name == WORLD_FRAME || nodes.contains_key(name) {
                return Err(SdfError::DuplicateFrame(name.to_string()));
            }
            order.push(name.to_string());
            nodes.insert(name.to_string(), node);
            Ok(())
        };

        for link in &model.links {
            insert(
                &link.name,
                FrameNode {
                    pose: link.pose.pose,
                    relative_to: link.pose.frame(MODEL_FRAME).to_string(),
                    context: format!("link '{}'", link.name),
                },
            )?;
        }
        for joint in &model.joints {
            insert(
                &joint.name,
                FrameNode {
                    pose: joint.pose.pose,
                    relative_to: joint.pose.frame(&joint.child).to_string(),
                    context: format!("joint '{}'", joint.name),
                },
            )?;
        }
        for frame in &model.frames {
            let attached_to = frame.attached_to.as_deref().unwrap_or(MODEL_FRAME);
            insert(
                &frame.name,
                FrameNode {
                    pose: frame.pose.pose,
                    relative_to: frame.pose.frame(attached_to).to_string(),
                    context: format!("frame '{}'", frame.name),
                },
            )?;
        }

        let mut resolved = HashMap::with_capacity(nodes.len() + 2);
        resolved.insert(MODEL_FRAME.to_string(), Pose::identity());
        resolved.insert(WORLD_FRAME.to_string(), model.pose.pose.inverse());

        for name in &order {
            resolve_chain(name, &nodes, &mut resolved)?;
        }

        Ok(Self {
            model_name: model.name.clone(),
            resolved,
        })
    }

    /// Name of the model this graph was built from.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Whether a frame with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolved.contains_key(name)
    }
}

impl PoseFrameGraph for FrameGraph {
    fn frame_pose(&self, name: &str) -> Result<Pose> {
        self.resolved.get(name).copied().ok_or_else(|| {
            SdfError::undefined_frame(name, format!("model '{}'", self.model_name))
        })
    }
}

fn resolve_chain(
    name: &str,
    nodes: &HashMap<String, FrameNode>,
    resolved: &mut HashMap<String, Pose>,
) -> Result<()> {
    let mut chain: Vec<&str> = Vec::new();
    let mut current = name;
    let mut context = "frame lookup";

    while !resolved.contains_key(current) {
        if chain.contains(&current) {
            chain.push(current);
            return Err(SdfError::FrameCycle(chain.join(" -> ")));
        }
        let Some(node) = nodes.get(current) else {
            return Err(SdfError::undefined_frame(current, context));
        };
        chain.push(current);
        context = &node.context;
        current = &node.relative_to;
    }

    for link in chain.iter().rev() {
        if let Some(node) = nodes.get(*link) {
            let parent = resolved
                .get(&node.relative_to)
                .copied()
                .unwrap_or_else(Pose::identity);
            resolved.insert((*link).to_string(), parent.compose(&node.pose));
        }
    }
    Ok(())
}
