// src/ecs/world.rs

// Any と TypeId で、型ごとのコンポーネント倉庫を一つの HashMap にまとめるよ。
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// 全エンティティとコンポーネントを持ってる、自作 ECS の本体！
///
/// ドラッグ対象もゾーンもここに住んでる。`PlacementController` や
/// `SessionEvaluator` は World を借りて、エンティティ ID 経由で中身を見るだけ
/// (所有はしない)。
pub struct World {
    /// 生きてるエンティティ。BTreeSet なので常に ID 順。
    entities: BTreeSet<Entity>,
    next_entity_id: usize,
    /// TypeId ごとの `HashMap<Entity, T>` を `Box<dyn Any>` で型消去して保持。
    component_stores: HashMap<TypeId, Box<dyn Any>>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        World {
            entities: BTreeSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを作るよ。ID は 0 からの連番！
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        debug!("World: created entity {}", entity);
        entity
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// コンポーネントの型を登録する。二回呼んでも倉庫は作り直さないよ。
    pub fn register_component<T: Component>(&mut self) {
        self.component_stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(HashMap::<Entity, T>::new()));
    }

    fn store<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.downcast_ref::<HashMap<Entity, T>>())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|store| store.downcast_mut::<HashMap<Entity, T>>())
    }

    /// エンティティにコンポーネントを付ける (既にあれば上書き)。
    /// 死んでるエンティティには付けない。未登録の型はその場で登録する。
    ///
    /// # 戻り値
    /// 付けられたら `true`。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        if !self.is_entity_alive(entity) {
            debug!("World: ignoring {} for dead entity {}", std::any::type_name::<T>(), entity);
            return false;
        }
        self.register_component::<T>();
        match self.store_mut::<T>() {
            Some(store) => {
                store.insert(entity, component);
                true
            }
            None => false,
        }
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>().and_then(|store| store.get(&entity))
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.store_mut::<T>().and_then(|store| store.get_mut(&entity))
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// コンポーネントを外して、外した値を返すよ。
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>().and_then(|store| store.remove(&entity))
    }

    /// 指定の型を持ってる生存エンティティを **ID 順** で返す。
    ///
    /// HashMap の順番はバラバラなので、ここで必ずソートしてから返す。
    /// ゾーンの優先順位 (マニフェスト順) はこの並びに乗っかってるので大事！
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        match self.store::<T>() {
            Some(store) => {
                let mut found: Vec<Entity> = store
                    .keys()
                    .copied()
                    .filter(|e| self.is_entity_alive(*e))
                    .collect();
                found.sort();
                found
            }
            None => Vec::new(),
        }
    }

    /// 二つのエンティティのコンポーネントを同時に可変で借りるためのヘルパー。
    /// 同じエンティティ・同じ型を二回借りることはできないので、その場合は `None`。
    pub fn get_pair_mut<A: Component, B: Component>(
        &mut self,
        first: Entity,
        second: Entity,
    ) -> Option<(&mut A, &mut B)> {
        if TypeId::of::<A>() == TypeId::of::<B>() {
            return None;
        }
        if !self.is_entity_alive(first) || !self.is_entity_alive(second) {
            return None;
        }
        let a_id = TypeId::of::<A>();
        let b_id = TypeId::of::<B>();
        let mut a_store = None;
        let mut b_store = None;
        for (type_id, store) in self.component_stores.iter_mut() {
            if *type_id == a_id {
                a_store = store.downcast_mut::<HashMap<Entity, A>>();
            } else if *type_id == b_id {
                b_store = store.downcast_mut::<HashMap<Entity, B>>();
            }
        }
        match (a_store, b_store) {
            (Some(a), Some(b)) => Some((a.get_mut(&first)?, b.get_mut(&second)?)),
            _ => None,
        }
    }
}
