#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scene::{NodeId, Scene};
use crate::{Num, SYSTEM_ROTATION_STEP};

/// Slow whole-system turn applied to the root node.
///
/// Frame-coupled: the root gains `step` radians per frame while enabled.
/// Disabling freezes the current angle instead of resetting it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemRotation {
    pub enabled: bool,
    pub step: Num,
}

impl Default for SystemRotation {
    fn default() -> Self {
        Self {
            enabled: false,
            step: SYSTEM_ROTATION_STEP,
        }
    }
}

impl SystemRotation {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn advance(&self, scene: &mut Scene, root: NodeId) {
        if !self.enabled {
            return;
        }

        if let Some(root) = scene.get_mut(root) {
            root.rotation_y += self.step;
        }
    }
}
