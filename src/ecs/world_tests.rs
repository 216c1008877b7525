// src/ecs/world_tests.rs
// World のユニットテスト！

use super::*;

// --- テスト用のダミーコンポーネント ---

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spot {
    x: i32,
    y: i32,
}
impl Component for Spot {}

#[derive(Debug, Clone, PartialEq)]
struct Label(&'static str);
impl Component for Label {}

#[test]
fn test_create_entity_ids_are_sequential() {
    let mut world = World::new();
    let e1 = world.create_entity();
    let e2 = world.create_entity();

    assert_eq!(e1, Entity(0), "最初の ID は 0");
    assert_eq!(e2, Entity(1), "次の ID は 1");
    assert_eq!(world.entity_count(), 2);
    assert!(world.is_entity_alive(e1));
}

#[test]
fn test_add_and_get_component() {
    let mut world = World::new();
    let e = world.create_entity();

    assert!(world.add_component(e, Spot { x: 3, y: 4 }));
    assert_eq!(world.get_component::<Spot>(e), Some(&Spot { x: 3, y: 4 }));
    assert!(world.get_component::<Label>(e).is_none(), "付けてない型は None");

    if let Some(spot) = world.get_component_mut::<Spot>(e) {
        spot.x = 10;
    }
    assert_eq!(world.get_component::<Spot>(e).map(|s| s.x), Some(10));
}

#[test]
fn test_add_component_to_dead_entity_is_ignored() {
    let mut world = World::new();
    assert!(!world.add_component(Entity(42), Spot { x: 0, y: 0 }));
    assert!(world.get_component::<Spot>(Entity(42)).is_none());
}

#[test]
fn test_remove_component_returns_value() {
    let mut world = World::new();
    let e = world.create_entity();
    world.add_component(e, Label("lamp"));

    assert_eq!(world.remove_component::<Label>(e), Some(Label("lamp")));
    assert_eq!(world.remove_component::<Label>(e), None, "二回目は何も残ってない");
    assert!(!world.has_component::<Label>(e));
}

#[test]
fn test_entities_with_component_are_sorted_by_id() {
    let mut world = World::new();
    let entities: Vec<Entity> = (0..8).map(|_| world.create_entity()).collect();
    // わざと逆順で付ける
    for e in entities.iter().rev() {
        world.add_component(*e, Spot { x: e.0 as i32, y: 0 });
    }
    let skipped = entities[3];
    world.remove_component::<Spot>(skipped);

    let found = world.get_all_entities_with_component::<Spot>();
    let expected: Vec<Entity> = entities.into_iter().filter(|e| *e != skipped).collect();
    assert_eq!(found, expected, "ID 順に並んでるはず");
}

#[test]
fn test_get_pair_mut_borrows_two_types() {
    let mut world = World::new();
    let a = world.create_entity();
    let b = world.create_entity();
    world.add_component(a, Spot { x: 1, y: 1 });
    world.add_component(b, Label("zone"));

    {
        let (spot, label) = world
            .get_pair_mut::<Spot, Label>(a, b)
            .expect("両方そろってるはず");
        spot.y = 99;
        label.0 = "changed";
    }
    assert_eq!(world.get_component::<Spot>(a).map(|s| s.y), Some(99));
    assert_eq!(world.get_component::<Label>(b), Some(&Label("changed")));

    assert!(world.get_pair_mut::<Spot, Spot>(a, b).is_none(), "同じ型は借りられない");
    assert!(world.get_pair_mut::<Spot, Label>(b, a).is_none(), "持ってない組み合わせは None");
}
