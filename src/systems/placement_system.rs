// src/systems/placement_system.rs
//! PlacementController: オブジェクトとゾーンの仲介役！🤝
//!
//! 「1 ゾーンに 1 オブジェクト」「1 オブジェクトは 1 ゾーンまで」をまとめて守るのがここ。
//! ゾーンもオブジェクトも World が持ってて、コントローラーはエンティティ ID を
//! 覚えてるだけ (所有はしない)。

use log::{debug, info};

use crate::components::{Draggable, DrawOrder, Position, TargetZone, ZoneId};
use crate::config::manifest::MatchStrategy;
use crate::ecs::{Entity, World};
use crate::logic::geometry::Bounds;
use crate::systems::drag_system::DragListener;
use crate::systems::evaluation_system::SessionEvaluator;

/// ドロップ1回分の結果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropOutcome {
    pub entity: Entity,
    /// 吸着したゾーン。どこにも吸着しなかったら `None` (その場に残る)。
    pub snapped_zone: Option<ZoneId>,
    /// ドロップ後に全ゾーンが埋まってたか。
    pub all_placed: bool,
}

pub struct PlacementController {
    /// マニフェスト順のゾーン。ドロップ時の優先順位そのもの。
    zones: Vec<Entity>,
    strategy: MatchStrategy,
    top_draw_order: u32,
    all_placed: bool,
    last_drop: Option<DropOutcome>,
}

impl PlacementController {
    pub fn new(zones: Vec<Entity>, strategy: MatchStrategy) -> Self {
        PlacementController {
            zones,
            strategy,
            top_draw_order: 0,
            all_placed: false,
            last_drop: None,
        }
    }

    pub fn zones(&self) -> &[Entity] {
        &self.zones
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// 最後のドロップ後の完了判定。送信ボタンを出すかどうかはこれで決まる。
    pub fn all_placed(&self) -> bool {
        self.all_placed
    }

    pub fn last_drop(&self) -> Option<DropOutcome> {
        self.last_drop
    }

    /// オブジェクトを一番手前に出す。
    pub fn bring_to_front(&mut self, world: &mut World, entity: Entity) {
        self.top_draw_order += 1;
        world.add_component(entity, DrawOrder(self.top_draw_order));
    }

    /// 今そのオブジェクトが入ってるゾーン。
    pub fn zone_of(&self, world: &World, entity: Entity) -> Option<Entity> {
        self.zones.iter().copied().find(|z| {
            world
                .get_component::<TargetZone>(*z)
                .map_or(false, |zone| zone.is_occupied_by(entity))
        })
    }

    fn entity_geometry(world: &World, entity: Entity) -> Option<(Position, Bounds)> {
        let position = *world.get_component::<Position>(entity)?;
        let draggable = world.get_component::<Draggable>(entity)?;
        Some((position, draggable.bounds_at(&position)))
    }

    /// ハイライトをゾーンごとに塗り直す。`keep` のゾーンだけ点灯、他は消灯。
    fn reset_highlights(&self, world: &mut World, keep: Option<Entity>) {
        for &zone_entity in &self.zones {
            if let Some(zone) = world.get_component_mut::<TargetZone>(zone_entity) {
                zone.set_highlight(Some(zone_entity) == keep);
            }
        }
    }
}

impl DragListener for PlacementController {
    /// 掴んだ瞬間に、今いるゾーンから解放して一番手前に出す。
    /// 排他性を守る唯一の場所なので、次の吸着より必ず先に走る。
    fn on_drag_start(&mut self, world: &mut World, entity: Entity) {
        for &zone_entity in &self.zones {
            if let Some(zone) = world.get_component_mut::<TargetZone>(zone_entity) {
                if zone.is_occupied_by(entity) {
                    zone.release();
                    debug!("Placement: released zone {} from {}", zone.id, entity);
                }
            }
        }
        self.bring_to_front(world, entity);
    }

    /// 動くたびに全ゾーンのハイライトを計算し直す (ゾーンは十数個なので間引かない)。
    fn on_drag_move(&mut self, world: &mut World, entity: Entity) {
        let Some((position, bounds)) = Self::entity_geometry(world, entity) else {
            return;
        };
        let strategy = self.strategy;
        for &zone_entity in &self.zones {
            if let Some(zone) = world.get_component_mut::<TargetZone>(zone_entity) {
                let hit = zone.matches(strategy, &position, &bounds);
                zone.set_highlight(hit);
            }
        }
    }

    /// マニフェスト順で最初の「重なってて空いてる」ゾーンに吸着。
    /// 後ろのゾーンの方がぴったり重なってても、先のゾーンが勝つ。
    fn on_drag_end(&mut self, world: &mut World, entity: Entity) {
        let mut snapped: Option<(Entity, ZoneId)> = None;

        if let Some((position, bounds)) = Self::entity_geometry(world, entity) {
            let strategy = self.strategy;
            let target = self.zones.iter().copied().find(|z| {
                world.get_component::<TargetZone>(*z).map_or(false, |zone| {
                    !zone.is_occupied() && zone.matches(strategy, &position, &bounds)
                })
            });

            if let Some(zone_entity) = target {
                if let Some((zone, entity_pos)) =
                    world.get_pair_mut::<TargetZone, Position>(zone_entity, entity)
                {
                    zone.snap(entity, entity_pos);
                    snapped = Some((zone_entity, zone.id));
                }
            }
        }

        let name = world
            .get_component::<Draggable>(entity)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        match snapped {
            Some((_, zone_id)) => info!("Placement: {} snapped to zone {}", name, zone_id),
            None => info!("Placement: {} not snapped", name),
        }

        self.reset_highlights(world, snapped.map(|(zone_entity, _)| zone_entity));
        self.all_placed = SessionEvaluator::check_completion(world, &self.zones);
        self.last_drop = Some(DropOutcome {
            entity,
            snapped_zone: snapped.map(|(_, id)| id),
            all_placed: self.all_placed,
        });
    }
}
