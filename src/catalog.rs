//! Pose catalog — the fixed, ordered practice sequence.
//!
//! A [`PoseCatalog`] is validated once at construction and never mutated
//! afterwards.  The sequencer relies on it holding at least one pose, so an
//! empty catalog is refused up front rather than discovered mid-session.

use std::sync::Arc;

use crate::error::CatalogError;

/// Upper bound on catalog length (sizes the progress-dot buffer).
pub const MAX_POSES: usize = 32;

// ───────────────────────────────────────────────────────────────
// Pose descriptor
// ───────────────────────────────────────────────────────────────

/// Breathing guidance attached to a pose.  Display-only; it has no effect on
/// timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreathingPhase {
    Start,
    Inhale,
    Exhale,
    Hold,
}

impl BreathingPhase {
    /// Upper-case label shown by the breathing indicator.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Inhale => "INHALE",
            Self::Exhale => "EXHALE",
            Self::Hold => "HOLD",
        }
    }
}

impl core::fmt::Display for BreathingPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the practice sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseDescriptor {
    /// 1-based position in the sequence.
    pub index: u8,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub breathing: BreathingPhase,
    pub description: &'static str,
    /// Opaque image identifier, resolved by the presentation layer.
    pub image_ref: &'static str,
}

// ───────────────────────────────────────────────────────────────
// Catalog
// ───────────────────────────────────────────────────────────────

/// Immutable, non-empty, ordered list of poses.  Cloning is cheap (shared).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseCatalog {
    poses: Arc<[PoseDescriptor]>,
}

impl PoseCatalog {
    /// Validate and wrap a pose list.
    ///
    /// Rejects an empty list, a list longer than [`MAX_POSES`], and any pose
    /// whose `index` is not its 1-based position.
    pub fn new(poses: Vec<PoseDescriptor>) -> Result<Self, CatalogError> {
        if poses.is_empty() {
            return Err(CatalogError::Empty);
        }
        if poses.len() > MAX_POSES {
            return Err(CatalogError::TooManyPoses(poses.len()));
        }
        for (position, pose) in poses.iter().enumerate() {
            if usize::from(pose.index) != position + 1 {
                return Err(CatalogError::IndexMismatch {
                    position,
                    index: pose.index,
                });
            }
        }
        Ok(Self {
            poses: Arc::from(poses),
        })
    }

    /// The classic twelve-pose Surya Namaskar sequence.
    pub fn surya_namaskar() -> Self {
        Self {
            poses: Arc::from(&SURYA_NAMASKAR[..]),
        }
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PoseDescriptor> {
        self.poses.get(index)
    }

    /// Index of the final pose.
    pub fn last_index(&self) -> usize {
        self.poses.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoseDescriptor> {
        self.poses.iter()
    }

    pub fn as_slice(&self) -> &[PoseDescriptor] {
        &self.poses
    }
}

// ───────────────────────────────────────────────────────────────
// Built-in sequence
// ───────────────────────────────────────────────────────────────

const SURYA_NAMASKAR: [PoseDescriptor; 12] = [
    PoseDescriptor {
        index: 1,
        name: "Pranamasana",
        subtitle: "Prayer Pose",
        breathing: BreathingPhase::Start,
        description: "Stand at the edge of your mat with feet together. Bring palms together \
                      in prayer position at heart center. Ground through your feet and find \
                      your center.",
        image_ref: "pose_1.png",
    },
    PoseDescriptor {
        index: 2,
        name: "Hastauttanasana",
        subtitle: "Raised Arms Pose",
        breathing: BreathingPhase::Inhale,
        description: "Inhale deeply, lift arms overhead and arch back gently. Keep biceps \
                      close to ears and stretch from heels to fingertips.",
        image_ref: "pose_2.png",
    },
    PoseDescriptor {
        index: 3,
        name: "Hastapadasana",
        subtitle: "Standing Forward Bend",
        breathing: BreathingPhase::Exhale,
        description: "Exhale and fold forward from the hips, keeping spine long. Bring hands \
                      to the floor beside feet. Relax neck and head.",
        image_ref: "pose_3.png",
    },
    PoseDescriptor {
        index: 4,
        name: "Ashwa Sanchalanasana",
        subtitle: "Equestrian Pose (Right Leg Back)",
        breathing: BreathingPhase::Inhale,
        description: "Inhale, step right leg back, placing knee on the floor. Left foot stays \
                      between palms. Lift chest and gaze forward.",
        image_ref: "pose_4.png",
    },
    PoseDescriptor {
        index: 5,
        name: "Dandasana",
        subtitle: "Plank Pose",
        breathing: BreathingPhase::Hold,
        description: "Hold breath, bring left leg back. Body forms a straight line from head \
                      to heels. Engage core and keep arms straight.",
        image_ref: "pose_5.png",
    },
    PoseDescriptor {
        index: 6,
        name: "Ashtanga Namaskara",
        subtitle: "Eight-Limbed Salutation",
        breathing: BreathingPhase::Exhale,
        description: "Exhale, lower knees, chest, and chin to floor. Keep hips raised \
                      slightly. Eight points touch the ground.",
        image_ref: "pose_6.png",
    },
    PoseDescriptor {
        index: 7,
        name: "Bhujangasana",
        subtitle: "Cobra Pose",
        breathing: BreathingPhase::Inhale,
        description: "Inhale, slide forward and raise chest into Cobra. Keep elbows slightly \
                      bent and shoulders away from ears.",
        image_ref: "pose_7.png",
    },
    PoseDescriptor {
        index: 8,
        name: "Adho Mukha Svanasana",
        subtitle: "Downward-Facing Dog",
        breathing: BreathingPhase::Exhale,
        description: "Exhale, lift hips up and back to form an inverted V-shape. Press palms \
                      and heels toward the floor.",
        image_ref: "pose_8.png",
    },
    PoseDescriptor {
        index: 9,
        name: "Ashwa Sanchalanasana",
        subtitle: "Equestrian Pose (Right Leg Forward)",
        breathing: BreathingPhase::Inhale,
        description: "Inhale, step right foot forward between hands. Left knee remains on \
                      floor. Lift chest and look forward.",
        image_ref: "pose_9.png",
    },
    PoseDescriptor {
        index: 10,
        name: "Hastapadasana",
        subtitle: "Standing Forward Bend",
        breathing: BreathingPhase::Exhale,
        description: "Exhale, bring left foot forward. Bend forward from the hips with both \
                      feet together. Let head hang relaxed.",
        image_ref: "pose_10.png",
    },
    PoseDescriptor {
        index: 11,
        name: "Hastauttanasana",
        subtitle: "Raised Arms Pose",
        breathing: BreathingPhase::Inhale,
        description: "Inhale, roll spine up, raise arms overhead and bend back slightly. \
                      Stretch the whole body upward.",
        image_ref: "pose_11.png",
    },
    PoseDescriptor {
        index: 12,
        name: "Pranamasana",
        subtitle: "Prayer Pose (Return)",
        breathing: BreathingPhase::Exhale,
        description: "Exhale, return to standing. Bring palms together at heart center. \
                      Complete the cycle with gratitude.",
        image_ref: "pose_12.png",
    },
];
