// src/app/session.rs

// セッション本体だよ！🗺️
// ブラウザのことは何も知らない純粋なロジックで、MapRecallApp はこれを Arc<Mutex<_>> で
// 包んでイベントを流し込むだけ。なのでテストも普通の #[test] で書ける。
//
// 流れ:
//   1. new() でマニフェストを検証して、ゾーンをマニフェスト順に作る
//   2. 画像が読み込めたオブジェクトから register_entity() で登場 (順番はバラバラでOK)
//   3. pointer_down / pointer_move / pointer_up でドラッグ
//   4. 全ゾーンが埋まったら送信ボタンが出る → submit()
//   5. 送信モードなら submission_finished() で結果を受け取る

use std::collections::HashMap;

use log::{info, warn};

use crate::app::submit_gate::SubmitGate;
use crate::components::{Draggable, DrawOrder, Position, TargetZone};
use crate::config::layout::INSTRUCTIONS_TEXT;
use crate::config::{Manifest, ScoringMode, Screen};
use crate::ecs::{Entity, World};
use crate::error::{ManifestError, SessionError, SubmitError};
use crate::logic::find_entity_at;
use crate::protocol::{ObjectData, ResultPayload, SessionSnapshot, ZoneData};
use crate::systems::{drag_system, Evaluation, PlacementController, SessionEvaluator};

/// マウスを押したときに何が起きたか。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// オブジェクトを掴んだ。
    Grabbed(Entity),
    /// 送信ボタンが押された。実際の送信は呼び出し側がやる (参加者 ID を読む必要があるから)。
    SubmitRequested,
    Nothing,
}

/// `submit` の結果。
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 公開モード: その場で採点してスコアを表示した。
    Scored(Evaluation),
    /// 送信モード: このペイロードを送ってね。終わったら `submission_finished` を呼ぶこと。
    Dispatch(ResultPayload),
}

pub struct Session {
    world: World,
    manifest: Manifest,
    screen: Screen,
    controller: PlacementController,
    evaluator: SessionEvaluator,
    gate: SubmitGate,
    /// 名前 → 登録済みエンティティ
    registered: HashMap<String, Entity>,
    active_drag: Option<Entity>,
    submit_visible: bool,
    /// 一回目の採点結果。送信のやり直しではこれを使い回す。
    evaluation: Option<Evaluation>,
    status_message: String,
}

impl Session {
    pub fn new(manifest: Manifest, screen: Screen) -> Result<Self, ManifestError> {
        manifest.validate()?;

        let mut world = World::new();
        world.register_component::<TargetZone>();
        world.register_component::<Draggable>();
        world.register_component::<Position>();
        world.register_component::<DrawOrder>();

        // ゾーンはマニフェスト順に作る。この順番がドロップ時の優先順位になる。
        let zones: Vec<Entity> = manifest
            .zones
            .iter()
            .map(|desc| {
                let entity = world.create_entity();
                world.add_component(
                    entity,
                    TargetZone::new(desc.id, Position::new(desc.x, desc.y), desc.size(), desc.border_width),
                );
                entity
            })
            .collect();

        info!(
            "Session: created {} zones, waiting for {} objects",
            zones.len(),
            manifest.entities.len()
        );

        let controller = PlacementController::new(zones, manifest.matching);
        Ok(Session {
            world,
            manifest,
            screen,
            controller,
            evaluator: SessionEvaluator::new(),
            gate: SubmitGate::new(),
            registered: HashMap::new(),
            active_drag: None,
            submit_visible: false,
            evaluation: None,
            status_message: INSTRUCTIONS_TEXT.to_string(),
        })
    }

    /// 画像が読み込めたオブジェクトを登場させる。
    /// 置き場はマニフェスト上の位置で決まるので、読み込みの順番は関係ない。
    pub fn register_entity(&mut self, name: &str, width: f32, height: f32) -> Result<Entity, SessionError> {
        if self.registered.contains_key(name) {
            return Err(SessionError::AlreadyRegistered(name.to_string()));
        }
        let index = self
            .manifest
            .entity_index(name)
            .ok_or_else(|| SessionError::UnknownEntity(name.to_string()))?;
        let descriptor = &self.manifest.entities[index];

        let entity = self.world.create_entity();
        self.world.add_component(
            entity,
            Draggable {
                name: descriptor.name.clone(),
                correct_zone_id: descriptor.correct_zone_id,
                width,
                height,
            },
        );
        self.world.add_component(entity, self.screen.staging_position(index));
        self.world.add_component(entity, DrawOrder(0));
        self.registered.insert(name.to_string(), entity);

        info!("Session: registered {:?} at staging slot {}", name, index);
        Ok(entity)
    }

    /// 全部のオブジェクトが揃ったか。
    pub fn is_ready(&self) -> bool {
        self.registered.len() == self.manifest.entities.len()
    }

    pub fn entity_by_name(&self, name: &str) -> Option<Entity> {
        self.registered.get(name).copied()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> PointerDown {
        if self.submit_visible && self.screen.submit_button_bounds().contains_point(x, y) {
            return PointerDown::SubmitRequested;
        }
        // 採点が終わったら、もう動かせない
        if self.evaluator.is_evaluated() || self.active_drag.is_some() {
            return PointerDown::Nothing;
        }
        let Some(entity) = find_entity_at(&self.world, x, y) else {
            return PointerDown::Nothing;
        };
        if drag_system::begin_drag(&mut self.world, entity, Position::new(x, y), &mut self.controller) {
            self.active_drag = Some(entity);
            PointerDown::Grabbed(entity)
        } else {
            PointerDown::Nothing
        }
    }

    /// ドラッグ中なら動かして `true`。
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        match self.active_drag {
            Some(entity) => {
                drag_system::update_drag(&mut self.world, entity, Position::new(x, y), &mut self.controller)
            }
            None => false,
        }
    }

    /// 離す。ドロップ後に全ゾーンが埋まってたら送信ボタンを出す。
    pub fn pointer_up(&mut self) -> Option<crate::systems::DropOutcome> {
        let entity = self.active_drag.take()?;
        if !drag_system::end_drag(&mut self.world, entity, &mut self.controller) {
            return None;
        }
        self.submit_visible = self.controller.all_placed() && !self.evaluator.is_evaluated();
        self.controller.last_drop()
    }

    /// 送信ボタンの処理。
    ///
    /// どのエラーでも状態は変えない (ボタンも消えない)。
    pub fn submit(&mut self, participant_id: Option<&str>) -> Result<SubmitOutcome, SessionError> {
        match self.manifest.scoring.clone() {
            ScoringMode::Public => {
                if self.evaluator.is_evaluated() {
                    return Err(SessionError::AlreadySubmitted);
                }
                self.ensure_complete()?;
                let evaluation = self.evaluate()?;
                self.submit_visible = false;
                self.status_message = format!(
                    "You got {} out of {} correct.",
                    evaluation.correct_count, evaluation.total_count
                );
                info!("Session: {}", self.status_message);
                Ok(SubmitOutcome::Scored(evaluation))
            }
            ScoringMode::Submitted { .. } => {
                if self.gate.is_in_flight() {
                    return Err(SessionError::SubmissionInFlight);
                }
                if self.gate.is_completed() {
                    return Err(SessionError::AlreadySubmitted);
                }
                self.ensure_complete()?;
                let participant_id = participant_id
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or(SessionError::MissingParticipantId)?;

                self.gate.begin()?;
                let evaluation = match &self.evaluation {
                    Some(cached) => cached.clone(),
                    None => self.evaluate()?,
                };
                self.submit_visible = false;
                info!(
                    "Session: dispatching results for {:?} (attempt {})",
                    participant_id,
                    self.gate.attempts()
                );
                Ok(SubmitOutcome::Dispatch(ResultPayload::from_evaluation(
                    participant_id,
                    &evaluation,
                )))
            }
        }
    }

    /// 送信が終わった。失敗ならボタンをもう一度出して、やり直せるようにする。
    pub fn submission_finished(&mut self, result: &Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                self.gate.finish(true);
                self.status_message = "Thank you! Your responses have been submitted.".to_string();
                info!("Session: submission succeeded");
            }
            Err(e) => {
                self.gate.finish(false);
                self.submit_visible = true;
                warn!("Session: submission failed: {}", e);
            }
        }
    }

    /// ページを離れてもいいか。送信中はダメ。
    pub fn can_leave(&self) -> bool {
        !self.gate.is_in_flight()
    }

    fn ensure_complete(&self) -> Result<(), SessionError> {
        if SessionEvaluator::check_completion(&self.world, self.controller.zones()) {
            Ok(())
        } else {
            Err(SessionError::NotComplete)
        }
    }

    fn evaluate(&mut self) -> Result<Evaluation, SessionError> {
        let evaluation = self.evaluator.evaluate(
            &mut self.world,
            self.controller.zones(),
            self.manifest.entities.len(),
        )?;
        self.evaluation = Some(evaluation.clone());
        Ok(evaluation)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active_drag.is_some()
    }

    pub fn submit_visible(&self) -> bool {
        self.submit_visible
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// 今の状態をまるごと JSON にできる形で。
    pub fn snapshot(&self) -> SessionSnapshot {
        let zone_of = |entity: Entity| {
            self.controller
                .zone_of(&self.world, entity)
                .and_then(|z| self.world.get_component::<TargetZone>(z))
                .map(|zone| zone.id)
        };
        let name_of = |entity: Entity| {
            self.world
                .get_component::<Draggable>(entity)
                .map(|d| d.name.clone())
        };

        let objects = self
            .world
            .get_all_entities_with_component::<Draggable>()
            .into_iter()
            .filter_map(|entity| {
                let draggable = self.world.get_component::<Draggable>(entity)?;
                let position = self.world.get_component::<Position>(entity)?;
                Some(ObjectData {
                    name: draggable.name.clone(),
                    x: position.x,
                    y: position.y,
                    dragging: drag_system::is_dragging(&self.world, entity),
                    zone_id: zone_of(entity),
                })
            })
            .collect();

        let zones = self
            .controller
            .zones()
            .iter()
            .filter_map(|&z| {
                let zone = self.world.get_component::<TargetZone>(z)?;
                Some(ZoneData {
                    id: zone.id,
                    x: zone.center.x,
                    y: zone.center.y,
                    size: zone.size,
                    occupant: zone.occupant().and_then(name_of),
                    visual: zone.visual(),
                })
            })
            .collect();

        SessionSnapshot {
            objects,
            zones,
            submit_visible: self.submit_visible,
            status_message: self.status_message.clone(),
        }
    }
}
