use serde::{Deserialize, Serialize};

use super::{
    launch_stages::{Stage, StageRole},
    payload::Payload,
};
use crate::errors::{SimulationError, SimulationResult};

/// Ordered stages plus payload. Stages are never removed or reordered;
/// a jettisoned stage stays in place with zero effective dry mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub stages: Vec<Stage>,
    pub payload: Payload,
}

impl Structure {
    pub fn new(stages: Vec<Stage>, payload: Payload) -> SimulationResult<Self> {
        let structure = Structure { stages, payload };
        structure.validate()?;
        Ok(structure)
    }

    /// At least one stage and at most one stage per role.
    pub fn validate(&self) -> SimulationResult<()> {
        let stages = &self.stages;
        if stages.is_empty() {
            return Err(SimulationError::InvalidConfiguration(
                "a vehicle needs at least one stage".to_string(),
            ));
        }
        for (index, stage) in stages.iter().enumerate() {
            if stages[..index].iter().any(|other| other.role == stage.role) {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "more than one {} stage configured",
                    stage.role
                )));
            }
        }
        Ok(())
    }

    pub fn stage(&self, role: StageRole) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.role == role)
    }

    pub fn stage_mut(&mut self, role: StageRole) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|stage| stage.role == role)
    }

    /// Remaining propellant of the stage in `role`; 0 when the role is absent.
    pub fn prop_mass_of(&self, role: StageRole) -> f64 {
        self.stage(role).map_or(0.0, Stage::prop_mass)
    }

    /// Effective reference area of the stage in `role`; 0 when the role is absent.
    pub fn reference_area_of(&self, role: StageRole) -> f64 {
        self.stage(role).map_or(0.0, |stage| stage.reference_area)
    }

    pub fn update(&mut self, delta_time: f64) {
        for stage in &mut self.stages {
            stage.update(delta_time);
        }
    }

    pub fn get_total_dry_mass(&self) -> f64 {
        self.stages.iter().map(|stage| stage.dry_mass).sum()
    }

    pub fn get_total_fuel(&self) -> f64 {
        self.stages.iter().map(Stage::prop_mass).sum()
    }

    pub fn get_total_mass(&self) -> f64 {
        let stages_mass: f64 = self.stages.iter().map(|stage| stage.total_mass).sum();
        stages_mass + self.payload.get_mass()
    }

    pub fn get_thrust(&self) -> f64 {
        self.stages
            .iter()
            .filter(|stage| stage.is_firing())
            .map(Stage::thrust)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::launch_stages::StageConfig;

    fn create_test_stage(role: StageRole, prop_mass: f64, dry_mass: f64) -> Stage {
        Stage::new(StageConfig::new(
            role.to_string(),
            role,
            dry_mass,
            prop_mass,
            -10.0,
            -3000.0,
            4.0,
        ))
        .unwrap()
    }

    fn create_test_structure() -> Structure {
        let stages = vec![
            create_test_stage(StageRole::Core, 1000.0, 500.0),
            create_test_stage(StageRole::Booster, 800.0, 400.0),
        ];
        Structure::new(stages, Payload::new(200.0).unwrap()).unwrap()
    }

    #[test]
    fn test_new_structure() {
        let structure = create_test_structure();
        assert_eq!(structure.stages.len(), 2);
        assert_eq!(structure.payload.get_mass(), 200.0);
        assert_eq!(structure.get_total_mass(), 2900.0); // 1000 + 500 + 800 + 400 + 200
        assert_eq!(structure.get_total_dry_mass(), 900.0);
        assert_eq!(structure.get_total_fuel(), 1800.0);
    }

    #[test]
    fn test_rejects_empty_and_duplicate_roles() {
        assert!(Structure::new(Vec::new(), Payload::default()).is_err());

        let stages = vec![
            create_test_stage(StageRole::Core, 1000.0, 500.0),
            create_test_stage(StageRole::Core, 800.0, 400.0),
        ];
        assert!(matches!(
            Structure::new(stages, Payload::default()),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_absent_role_reads_as_empty() {
        let structure = create_test_structure();
        assert!(structure.stage(StageRole::Interim).is_none());
        assert_eq!(structure.prop_mass_of(StageRole::Interim), 0.0);
        assert_eq!(structure.reference_area_of(StageRole::Interim), 0.0);
        assert_eq!(structure.prop_mass_of(StageRole::Booster), 800.0);
    }

    #[test]
    fn test_thrust_counts_only_firing_stages() {
        let mut structure = create_test_structure();
        structure.update(1.0);
        assert_eq!(structure.get_thrust(), 60_000.0);

        if let Some(booster) = structure.stage_mut(StageRole::Booster) {
            booster.shut_down();
        }
        assert_eq!(structure.get_thrust(), 30_000.0);
    }

    #[test]
    fn test_update_depletes_every_stage() {
        let mut structure = create_test_structure();
        structure.update(2.0);
        assert_eq!(structure.get_total_fuel(), 1760.0);
        assert_eq!(structure.get_total_mass(), 2860.0);
    }
}
