// src/systems/drag_system.rs
//! ドラッグ対象 (DraggableEntity) の状態遷移: 掴む → 動かす → 離す。
//!
//! 位置を書き換えるのはドラッグ中だけ。遷移のたびに `DragListener` に知らせて、
//! ゾーンとのやり取りはリスナー側 (普通は `PlacementController`) に任せる。

use log::{debug, warn};

use crate::components::{Draggable, DraggingInfo, Position};
use crate::ecs::{Entity, World};

/// ドラッグの各段階を受け取るオブザーバー。
///
/// 描画面がなくても合成イベントを流し込んでテストできるように、コールバックを
/// クロージャで持たせる代わりにトレイトにしてある。
pub trait DragListener {
    fn on_drag_start(&mut self, world: &mut World, entity: Entity);
    fn on_drag_move(&mut self, world: &mut World, entity: Entity);
    fn on_drag_end(&mut self, world: &mut World, entity: Entity);
}

pub fn is_dragging(world: &World, entity: Entity) -> bool {
    world.has_component::<DraggingInfo>(entity)
}

/// 掴む。ポインタとの差分を覚えておくので、掴んだ場所が中心にワープしない。
///
/// # 戻り値
/// ドラッグを始めたら `true`。既にドラッグ中、またはドラッグ対象じゃなければ `false` (何もしない)。
pub fn begin_drag(
    world: &mut World,
    entity: Entity,
    pointer: Position,
    listener: &mut dyn DragListener,
) -> bool {
    if is_dragging(world, entity) || !world.has_component::<Draggable>(entity) {
        return false;
    }
    let position = match world.get_component::<Position>(entity) {
        Some(p) => *p,
        None => {
            warn!("DragSystem: entity {} has no Position, cannot drag", entity);
            return false;
        }
    };

    let info = DraggingInfo {
        offset_x: position.x - pointer.x,
        offset_y: position.y - pointer.y,
    };
    world.add_component(entity, info);
    debug!("DragSystem: drag start {} with offset ({}, {})", entity, info.offset_x, info.offset_y);

    listener.on_drag_start(world, entity);
    true
}

/// 動かす。位置 = ポインタ + 掴んだときの差分。
pub fn update_drag(
    world: &mut World,
    entity: Entity,
    pointer: Position,
    listener: &mut dyn DragListener,
) -> bool {
    let info = match world.get_component::<DraggingInfo>(entity) {
        Some(info) => *info,
        None => return false,
    };
    match world.get_component_mut::<Position>(entity) {
        Some(position) => {
            position.x = pointer.x + info.offset_x;
            position.y = pointer.y + info.offset_y;
        }
        None => return false,
    }

    listener.on_drag_move(world, entity);
    true
}

/// 離す。ドラッグ中じゃなければ何もしない。
pub fn end_drag(world: &mut World, entity: Entity, listener: &mut dyn DragListener) -> bool {
    if world.remove_component::<DraggingInfo>(entity).is_none() {
        return false;
    }
    debug!("DragSystem: drag end {}", entity);

    listener.on_drag_end(world, entity);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(&'static str, Entity)>,
    }

    impl DragListener for Recorder {
        fn on_drag_start(&mut self, _world: &mut World, entity: Entity) {
            self.events.push(("start", entity));
        }
        fn on_drag_move(&mut self, _world: &mut World, entity: Entity) {
            self.events.push(("move", entity));
        }
        fn on_drag_end(&mut self, _world: &mut World, entity: Entity) {
            self.events.push(("end", entity));
        }
    }

    fn spawn(world: &mut World, x: f32, y: f32) -> Entity {
        let e = world.create_entity();
        world.add_component(
            e,
            Draggable { name: "vase".into(), correct_zone_id: 0, width: 20.0, height: 20.0 },
        );
        world.add_component(e, Position::new(x, y));
        e
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut world = World::new();
        let mut recorder = Recorder::default();
        let e = spawn(&mut world, 100.0, 100.0);

        assert!(begin_drag(&mut world, e, Position::new(90.0, 95.0), &mut recorder));
        assert!(update_drag(&mut world, e, Position::new(190.0, 195.0), &mut recorder));

        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(200.0, 200.0)));
        assert!(end_drag(&mut world, e, &mut recorder));
        assert!(!is_dragging(&world, e));
        assert_eq!(recorder.events, vec![("start", e), ("move", e), ("end", e)]);
    }

    #[test]
    fn second_begin_is_a_no_op() {
        let mut world = World::new();
        let mut recorder = Recorder::default();
        let e = spawn(&mut world, 0.0, 0.0);

        assert!(begin_drag(&mut world, e, Position::new(0.0, 0.0), &mut recorder));
        assert!(!begin_drag(&mut world, e, Position::new(50.0, 50.0), &mut recorder));
        // 最初のオフセット (0, 0) のまま
        update_drag(&mut world, e, Position::new(10.0, 10.0), &mut recorder);
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(10.0, 10.0)));
        assert_eq!(recorder.events.iter().filter(|(k, _)| *k == "start").count(), 1);
    }

    #[test]
    fn move_and_end_without_drag_do_nothing() {
        let mut world = World::new();
        let mut recorder = Recorder::default();
        let e = spawn(&mut world, 5.0, 5.0);

        assert!(!update_drag(&mut world, e, Position::new(80.0, 80.0), &mut recorder));
        assert!(!end_drag(&mut world, e, &mut recorder));
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(5.0, 5.0)));
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn non_draggable_cannot_be_grabbed() {
        let mut world = World::new();
        let mut recorder = Recorder::default();
        let e = world.create_entity();
        world.add_component(e, Position::new(0.0, 0.0));
        assert!(!begin_drag(&mut world, e, Position::new(0.0, 0.0), &mut recorder));
    }
}
