// src/components/target_zone.rs

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::config::manifest::MatchStrategy;
use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::logic::geometry::Bounds;

/// ゾーンの ID。マニフェストの `correctZoneId` と突き合わせる番号。
pub type ZoneId = u32;

/// ゾーンの見た目の状態だよ。当たり判定には一切関係なし！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisual {
    /// 黄色い枠、うっすら白
    Neutral,
    /// ドラッグ中のオブジェクトが重なってる (オレンジ枠)
    Highlighted,
    /// 採点後: 正解 (緑)
    Correct,
    /// 採点後: 不正解 (赤)
    Incorrect,
}

impl ZoneVisual {
    /// 採点後の状態はもう変わらない。
    pub fn is_terminal(self) -> bool {
        matches!(self, ZoneVisual::Correct | ZoneVisual::Incorrect)
    }
}

/// マップ上の置き場所 (ターゲットゾーン) のコンポーネント！🎯
///
/// 中心座標と正方形のサイズを持つ。ゾーンは動かないので Position コンポーネントは
/// 使わずに中心をここに直接持ってるよ。
///
/// `occupant` が `Some` ⇔ 使用中。このコンポーネント自身は取り合いの仲裁はしないので、
/// `snap` の前に空いてるかどうかは `PlacementController` が確認する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetZone {
    pub id: ZoneId,
    pub center: Position,
    /// 正方形の一辺
    pub size: f32,
    /// 枠線の太さ。線は辺の中央に描かれるので、描画範囲は半分ずつ外に広がる。
    pub border_width: f32,
    occupant: Option<Entity>,
    visual: ZoneVisual,
}

impl TargetZone {
    pub fn new(id: ZoneId, center: Position, size: f32, border_width: f32) -> Self {
        TargetZone {
            id,
            center,
            size,
            border_width,
            occupant: None,
            visual: ZoneVisual::Neutral,
        }
    }

    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_occupied_by(&self, entity: Entity) -> bool {
        self.occupant == Some(entity)
    }

    pub fn visual(&self) -> ZoneVisual {
        self.visual
    }

    pub fn is_highlighted(&self) -> bool {
        self.visual == ZoneVisual::Highlighted
    }

    /// 枠線込みの描画範囲。
    pub fn bounds(&self) -> Bounds {
        let extent = self.size + self.border_width;
        Bounds::from_center(self.center.x, self.center.y, extent, extent)
    }

    /// オブジェクトの描画範囲と重なってるか (辺が接してるのも重なり)。
    pub fn overlaps(&self, entity_bounds: &Bounds) -> bool {
        self.bounds().intersects(entity_bounds)
    }

    /// 中心どうしの距離が `threshold` 未満なら近い。
    pub fn is_nearby(&self, entity_pos: &Position, threshold: f32) -> bool {
        self.center.distance_to(entity_pos) < threshold
    }

    /// 枠線を含まない正方形の中に点があるか。
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        Bounds::from_center(self.center.x, self.center.y, self.size, self.size).contains_point(x, y)
    }

    /// 設定されたマッチ方式で「十分近いか」を判定する。
    pub fn matches(&self, strategy: MatchStrategy, entity_pos: &Position, entity_bounds: &Bounds) -> bool {
        match strategy {
            MatchStrategy::Overlap => self.overlaps(entity_bounds),
            MatchStrategy::Nearby { threshold } => self.is_nearby(entity_pos, threshold),
            MatchStrategy::WithinHalfSize => self.is_nearby(entity_pos, self.size / 2.0),
        }
    }

    /// オブジェクトをゾーンの中心に吸着させて、使用中にする。
    /// 空いてるかのチェックは呼び出し側の責任！
    pub fn snap(&mut self, entity: Entity, entity_pos: &mut Position) {
        *entity_pos = self.center;
        self.occupant = Some(entity);
    }

    /// 空きに戻す。何回呼んでも大丈夫。
    pub fn release(&mut self) {
        self.occupant = None;
    }

    /// ハイライトの切り替え。採点後は何もしない。
    pub fn set_highlight(&mut self, highlighted: bool) {
        if self.visual.is_terminal() {
            return;
        }
        self.visual = if highlighted {
            ZoneVisual::Highlighted
        } else {
            ZoneVisual::Neutral
        };
    }

    /// 採点結果の色をつける。一度つけたら戻らない。
    pub fn set_correctness(&mut self, is_correct: bool) {
        if self.visual.is_terminal() {
            return;
        }
        self.visual = if is_correct {
            ZoneVisual::Correct
        } else {
            ZoneVisual::Incorrect
        };
    }
}

impl Component for TargetZone {}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_at(x: f32, y: f32) -> TargetZone {
        TargetZone::new(1, Position::new(x, y), 100.0, 0.0)
    }

    #[test]
    fn overlap_includes_touching_edges() {
        let zone = zone_at(100.0, 100.0); // 50..150
        let touching = Bounds::from_center(170.0, 100.0, 40.0, 40.0); // 150..190
        let apart = Bounds::from_center(171.0, 100.0, 40.0, 40.0);
        assert!(zone.overlaps(&touching));
        assert!(!zone.overlaps(&apart));
    }

    #[test]
    fn border_widens_rendered_bounds() {
        let zone = TargetZone::new(0, Position::new(100.0, 100.0), 100.0, 8.0); // 46..154
        let just_outside_square = Bounds::from_center(172.0, 100.0, 40.0, 40.0); // 152..192
        assert!(zone.overlaps(&just_outside_square), "枠線の分だけ広い");
        assert!(!zone.contains_point(152.0, 100.0), "点判定は正方形だけ");
    }

    #[test]
    fn nearby_is_strictly_less_than_threshold() {
        let zone = zone_at(0.0, 0.0);
        assert!(zone.is_nearby(&Position::new(59.9, 0.0), 60.0));
        assert!(!zone.is_nearby(&Position::new(60.0, 0.0), 60.0));
    }

    #[test]
    fn matches_follows_strategy() {
        let zone = zone_at(0.0, 0.0);
        let pos = Position::new(80.0, 0.0);
        let bounds = Bounds::from_center(pos.x, pos.y, 70.0, 70.0); // 45..115, zone -50..50
        assert!(zone.matches(MatchStrategy::Overlap, &pos, &bounds));
        assert!(!zone.matches(MatchStrategy::Nearby { threshold: 60.0 }, &pos, &bounds));
        assert!(zone.matches(MatchStrategy::Nearby { threshold: 100.0 }, &pos, &bounds));
        assert!(!zone.matches(MatchStrategy::WithinHalfSize, &pos, &bounds));
    }

    #[test]
    fn snap_moves_entity_to_center_and_occupies() {
        let mut zone = zone_at(40.0, 60.0);
        let mut pos = Position::new(1.0, 2.0);
        zone.snap(Entity(7), &mut pos);
        assert_eq!(pos, Position::new(40.0, 60.0));
        assert!(zone.is_occupied());
        assert!(zone.is_occupied_by(Entity(7)));
    }

    #[test]
    fn release_is_idempotent() {
        let mut zone = zone_at(0.0, 0.0);
        zone.release();
        let untouched = zone.clone();
        zone.release();
        assert_eq!(zone, untouched, "空きのまま何も変わらない");

        let mut pos = Position::new(0.0, 0.0);
        zone.snap(Entity(1), &mut pos);
        zone.release();
        zone.release();
        assert!(!zone.is_occupied());
        assert_eq!(zone.occupant(), None);
    }

    #[test]
    fn correctness_is_terminal() {
        let mut zone = zone_at(0.0, 0.0);
        zone.set_highlight(true);
        assert!(zone.is_highlighted());
        zone.set_correctness(false);
        zone.set_highlight(true);
        zone.set_correctness(true);
        assert_eq!(zone.visual(), ZoneVisual::Incorrect, "一度つけた色は変わらない");
    }
}
