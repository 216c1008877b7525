// src/systems/evaluation_system.rs
//! 完了判定と採点だよ！🏆

use std::collections::BTreeMap;

use log::{info, warn};

use crate::components::{Draggable, TargetZone};
use crate::ecs::{Entity, World};
use crate::error::SessionError;

/// 採点結果。
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// オブジェクト名 → 1 (正解) / 0 (不正解)
    pub per_entity: BTreeMap<String, u8>,
    pub correct_count: usize,
    /// マニフェストのオブジェクト数 (埋まったゾーンの数じゃない)
    pub total_count: usize,
}

#[derive(Debug, Default)]
pub struct SessionEvaluator {
    evaluated: bool,
}

impl SessionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// 全ゾーンが埋まってたら `true`。
    pub fn check_completion(world: &World, zones: &[Entity]) -> bool {
        zones.iter().all(|z| {
            world
                .get_component::<TargetZone>(*z)
                .map_or(false, |zone| zone.is_occupied())
        })
    }

    /// 採点する。埋まってるゾーンごとに「入ってるオブジェクトの正解ゾーン == このゾーン」か見て、
    /// ゾーンに正解/不正解の色をつける。空いてるゾーンは結果に入れない。
    ///
    /// セッションにつき一回だけ。二回目は `AlreadyEvaluated`。
    pub fn evaluate(
        &mut self,
        world: &mut World,
        zones: &[Entity],
        total_count: usize,
    ) -> Result<Evaluation, SessionError> {
        if self.evaluated {
            return Err(SessionError::AlreadyEvaluated);
        }
        self.evaluated = true;

        let mut per_entity = BTreeMap::new();
        let mut correct_count = 0;

        for &zone_entity in zones {
            let (zone_id, occupant) = match world.get_component::<TargetZone>(zone_entity) {
                Some(zone) => (zone.id, zone.occupant()),
                None => continue,
            };
            let Some(occupant) = occupant else {
                warn!("Evaluator: zone {} is empty at evaluation time, skipping", zone_id);
                continue;
            };
            let Some(draggable) = world.get_component::<Draggable>(occupant) else {
                continue;
            };

            let is_correct = draggable.correct_zone_id == zone_id;
            per_entity.insert(draggable.name.clone(), u8::from(is_correct));
            if is_correct {
                correct_count += 1;
            }
            if let Some(zone) = world.get_component_mut::<TargetZone>(zone_entity) {
                zone.set_correctness(is_correct);
            }
        }

        info!("Evaluator: score {} / {}", correct_count, total_count);
        Ok(Evaluation {
            per_entity,
            correct_count,
            total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, ZoneVisual, ZoneId};

    fn add_zone(world: &mut World, id: ZoneId) -> Entity {
        let e = world.create_entity();
        world.add_component(e, TargetZone::new(id, Position::new(id as f32 * 200.0, 0.0), 100.0, 0.0));
        e
    }

    fn place(world: &mut World, zone: Entity, name: &str, correct: ZoneId) -> Entity {
        let e = world.create_entity();
        world.add_component(
            e,
            Draggable { name: name.into(), correct_zone_id: correct, width: 10.0, height: 10.0 },
        );
        let mut pos = Position::new(0.0, 0.0);
        if let Some(z) = world.get_component_mut::<TargetZone>(zone) {
            z.snap(e, &mut pos);
        }
        world.add_component(e, pos);
        e
    }

    #[test]
    fn completion_needs_every_zone() {
        let mut world = World::new();
        let zones: Vec<Entity> = (0..12).map(|id| add_zone(&mut world, id)).collect();

        for (i, z) in zones.iter().take(11).enumerate() {
            place(&mut world, *z, &format!("obj{}", i), i as ZoneId);
        }
        assert!(!SessionEvaluator::check_completion(&world, &zones), "11/12 はまだ");

        place(&mut world, zones[11], "obj11", 11);
        assert!(SessionEvaluator::check_completion(&world, &zones), "12/12 で完了");
    }

    #[test]
    fn scores_occupant_against_its_zone() {
        // 正解: basketball→4, guitar→1。実際は zone4 に basketball、zone1 に lamp。
        let mut world = World::new();
        let zone1 = add_zone(&mut world, 1);
        let zone4 = add_zone(&mut world, 4);
        let zones = vec![zone1, zone4];
        place(&mut world, zone4, "basketball", 4);
        place(&mut world, zone1, "lamp", 10);

        let mut evaluator = SessionEvaluator::new();
        let result = evaluator.evaluate(&mut world, &zones, 2).expect("first evaluation");

        let expected: BTreeMap<String, u8> =
            [("basketball".to_string(), 1), ("lamp".to_string(), 0)].into_iter().collect();
        assert_eq!(result.per_entity, expected);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total_count, 2);
        assert!(!result.per_entity.contains_key("guitar"));

        let visual = |z: Entity| world.get_component::<TargetZone>(z).map(|z| z.visual());
        assert_eq!(visual(zone4), Some(ZoneVisual::Correct));
        assert_eq!(visual(zone1), Some(ZoneVisual::Incorrect));
    }

    #[test]
    fn empty_zones_are_skipped_and_total_is_manifest_size() {
        let mut world = World::new();
        let zones: Vec<Entity> = (0..3).map(|id| add_zone(&mut world, id)).collect();
        place(&mut world, zones[0], "vase", 0);

        let mut evaluator = SessionEvaluator::new();
        let result = evaluator.evaluate(&mut world, &zones, 3).expect("evaluation");
        assert_eq!(result.per_entity.len(), 1);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total_count, 3);
        assert_eq!(
            world.get_component::<TargetZone>(zones[1]).map(|z| z.visual()),
            Some(ZoneVisual::Neutral)
        );
    }

    #[test]
    fn evaluation_is_one_shot() {
        let mut world = World::new();
        let zone = add_zone(&mut world, 0);
        place(&mut world, zone, "vase", 0);

        let mut evaluator = SessionEvaluator::new();
        assert!(evaluator.evaluate(&mut world, &[zone], 1).is_ok());
        assert!(evaluator.is_evaluated());
        assert_eq!(
            evaluator.evaluate(&mut world, &[zone], 1),
            Err(SessionError::AlreadyEvaluated)
        );
    }
}
