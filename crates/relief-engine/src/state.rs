//! The mutable world a localizer steps.

use relief_core::Pose;
use relief_field::ScalarField;
use relief_filter::ParticleSet;

/// Field, true agent pose, and particle population.
///
/// Owned by a [`Localizer`](crate::Localizer) and only mutated through its
/// `&mut self` methods; callers get read-only access.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub(crate) field: ScalarField,
    pub(crate) true_pose: Pose,
    pub(crate) particles: ParticleSet,
}

impl SimulationState {
    pub(crate) fn new(field: ScalarField, true_pose: Pose, particles: ParticleSet) -> Self {
        Self {
            field,
            true_pose,
            particles,
        }
    }

    /// The map being localized against.
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Where the agent really is.
    pub fn true_pose(&self) -> Pose {
        self.true_pose
    }

    /// The current hypothesis population.
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }
}
