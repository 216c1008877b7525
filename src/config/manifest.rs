// src/config/manifest.rs
//! セッション前に決まる設定 (マニフェスト) だよ！
//!
//! オブジェクトの一覧と正解、ゾーンの一覧、採点モード、マッチ方式をまとめて一つの
//! 設定オブジェクトにしてある。JS から JSON で渡すか、標準の美術館マップを使う。
//! **順番に意味がある** ので注意: オブジェクトの順番は置き場の並び、
//! ゾーンの順番はドロップ時の優先順位。

use std::collections::HashSet;

use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::ZoneId;
use crate::config::layout::{Screen, ASSET_DIR, DEFAULT_ZONE_SIZE, MAP_IMAGE, ZONE_BORDER_WIDTH};
use crate::error::ManifestError;

/// ドラッグするオブジェクト1個分の記述。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub name: String,
    pub correct_zone_id: ZoneId,
    /// 画像パス。省略したら `/assets/<name>.png`。
    #[serde(default)]
    pub image: Option<String>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>, correct_zone_id: ZoneId) -> Self {
        EntityDescriptor {
            name: name.into(),
            correct_zone_id,
            image: None,
        }
    }

    pub fn image_path(&self) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| format!("{}/{}.png", ASSET_DIR, self.name))
    }
}

/// ゾーン1個分の記述。座標は中心。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDescriptor {
    pub id: ZoneId,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default = "default_border_width")]
    pub border_width: f32,
}

fn default_border_width() -> f32 {
    ZONE_BORDER_WIDTH
}

impl ZoneDescriptor {
    pub fn new(id: ZoneId, x: f32, y: f32, size: f32) -> Self {
        ZoneDescriptor {
            id,
            x,
            y,
            size: Some(size),
            border_width: ZONE_BORDER_WIDTH,
        }
    }

    pub fn size(&self) -> f32 {
        self.size.unwrap_or(DEFAULT_ZONE_SIZE)
    }
}

/// 採点結果の扱い方。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ScoringMode {
    /// その場でスコアを表示してログに出す。
    #[default]
    Public,
    /// 参加者 ID 付きで外部に送信する。スコアは画面に出さない。
    Submitted { endpoint: String },
}

/// 「ゾーンに十分近い」の判定方法。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchStrategy {
    /// 描画範囲どうしの重なり (採点版の標準)。
    #[default]
    Overlap,
    /// 中心どうしの距離が threshold 未満。
    Nearby { threshold: f32 },
    /// 中心どうしの距離がゾーンの半分のサイズ未満。
    WithinHalfSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub entities: Vec<EntityDescriptor>,
    pub zones: Vec<ZoneDescriptor>,
    #[serde(default)]
    pub scoring: ScoringMode,
    #[serde(default)]
    pub matching: MatchStrategy,
    #[serde(default)]
    pub map_image: Option<String>,
}

/// 標準の美術館マップ: (名前, 正解ゾーン)
const STANDARD_OBJECTS: [(&str, ZoneId); 12] = [
    ("basketball", 4),
    ("cat-statue", 5),
    ("fire-extinguisher", 2),
    ("guitar", 1),
    ("lamp", 10),
    ("plant", 11),
    ("school-chair", 6),
    ("stove", 3),
    ("suitcase", 0),
    ("treasure-chest", 7),
    ("vase", 8),
    ("watermelon", 9),
];

/// 標準ゾーン: (ID, 画面幅に対する x, 画面高さに対する y)
const STANDARD_ZONES: [(ZoneId, f32, f32); 12] = [
    (0, 0.52, 0.18),
    (1, 0.66, 0.15),
    (2, 0.76, 0.18),
    (3, 0.86, 0.14),
    (4, 0.52, 0.58),
    (5, 0.70, 0.46),
    (6, 0.78, 0.38),
    (7, 0.68, 0.66),
    (8, 0.76, 0.66),
    (9, 0.88, 0.66),
    (10, 0.58, 0.78),
    (11, 0.82, 0.86),
];

impl Manifest {
    pub fn new(entities: Vec<EntityDescriptor>, zones: Vec<ZoneDescriptor>) -> Self {
        Manifest {
            entities,
            zones,
            scoring: ScoringMode::default(),
            matching: MatchStrategy::default(),
            map_image: None,
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_matching(mut self, matching: MatchStrategy) -> Self {
        self.matching = matching;
        self
    }

    /// 12 個のオブジェクトと 12 個のゾーンの標準マップ。ゾーン位置は画面サイズに比例する。
    pub fn standard(screen: Screen) -> Self {
        let size = screen.zone_size();
        let entities = STANDARD_OBJECTS
            .iter()
            .map(|(name, zone)| EntityDescriptor::new(*name, *zone))
            .collect();
        let zones = STANDARD_ZONES
            .iter()
            .map(|(id, fx, fy)| ZoneDescriptor::new(*id, screen.width * fx, screen.height * fy, size))
            .collect();
        Manifest::new(entities, zones)
    }

    /// JSON から読み込んで、ついでに検証もする。
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| ManifestError::Parse(e.to_string()))?;
        manifest.validate()?;
        info!(
            "Manifest: loaded {} objects and {} zones",
            manifest.entities.len(),
            manifest.zones.len()
        );
        Ok(manifest)
    }

    /// 名前の重複、ゾーン ID の重複、存在しない正解ゾーン、サイズ 0 以下をはじく。
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.entities.is_empty() {
            return Err(ManifestError::NoEntities);
        }
        if self.zones.is_empty() {
            return Err(ManifestError::NoZones);
        }
        if let Some(name) = self.entities.iter().map(|e| &e.name).duplicates().next() {
            return Err(ManifestError::DuplicateEntity(name.clone()));
        }
        if let Some(id) = self.zones.iter().map(|z| z.id).duplicates().next() {
            return Err(ManifestError::DuplicateZone(id));
        }
        if let Some(zone) = self.zones.iter().find(|z| z.size() <= 0.0) {
            return Err(ManifestError::InvalidZoneSize(zone.id));
        }
        let zone_ids: HashSet<ZoneId> = self.zones.iter().map(|z| z.id).collect();
        if let Some(entity) = self
            .entities
            .iter()
            .find(|e| !zone_ids.contains(&e.correct_zone_id))
        {
            return Err(ManifestError::UnknownCorrectZone {
                name: entity.name.clone(),
                zone_id: entity.correct_zone_id,
            });
        }
        Ok(())
    }

    /// マニフェスト上の位置 (置き場の並び順) を名前から探す。
    pub fn entity_index(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }

    pub fn map_image_path(&self) -> String {
        self.map_image.clone().unwrap_or_else(|| MAP_IMAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_manifest_is_valid() {
        let manifest = Manifest::standard(Screen::new(1600.0, 900.0));
        assert_eq!(manifest.entities.len(), 12);
        assert_eq!(manifest.zones.len(), 12);
        assert_eq!(manifest.validate(), Ok(()));
        assert_eq!(manifest.entities[0].image_path(), "/assets/basketball.png");
        // ゾーン 0 は幅の 52%, 高さの 18%
        assert!((manifest.zones[0].x - 832.0).abs() < 1e-3);
        assert!((manifest.zones[0].y - 162.0).abs() < 1e-3);
        assert!((manifest.zones[0].size() - 108.0).abs() < 1e-3);
    }

    #[test]
    fn parses_json_with_defaults() {
        let json = r#"{
            "entities": [
                {"name": "guitar", "correctZoneId": 1},
                {"name": "lamp", "correctZoneId": 0, "image": "/img/lamp.webp"}
            ],
            "zones": [
                {"id": 0, "x": 10, "y": 20},
                {"id": 1, "x": 30, "y": 40, "size": 50, "borderWidth": 2}
            ]
        }"#;
        let manifest = Manifest::from_json(json).expect("valid manifest");
        assert_eq!(manifest.scoring, ScoringMode::Public);
        assert_eq!(manifest.matching, MatchStrategy::Overlap);
        assert_eq!(manifest.zones[0].size(), DEFAULT_ZONE_SIZE);
        assert_eq!(manifest.zones[0].border_width, ZONE_BORDER_WIDTH);
        assert_eq!(manifest.zones[1].border_width, 2.0);
        assert_eq!(manifest.entities[1].image_path(), "/img/lamp.webp");
    }

    #[test]
    fn parses_scoring_and_matching_modes() {
        let json = r#"{
            "entities": [{"name": "vase", "correctZoneId": 3}],
            "zones": [{"id": 3, "x": 0, "y": 0}],
            "scoring": {"mode": "submitted", "endpoint": "/api/results"},
            "matching": {"kind": "nearby", "threshold": 60}
        }"#;
        let manifest = Manifest::from_json(json).expect("valid manifest");
        assert_eq!(
            manifest.scoring,
            ScoringMode::Submitted { endpoint: "/api/results".to_string() }
        );
        assert_eq!(manifest.matching, MatchStrategy::Nearby { threshold: 60.0 });
    }

    #[test]
    fn rejects_broken_manifests() {
        let zones = vec![ZoneDescriptor::new(0, 0.0, 0.0, 10.0)];

        let dup = Manifest::new(
            vec![EntityDescriptor::new("vase", 0), EntityDescriptor::new("vase", 0)],
            zones.clone(),
        );
        assert_eq!(dup.validate(), Err(ManifestError::DuplicateEntity("vase".into())));

        let unknown = Manifest::new(vec![EntityDescriptor::new("vase", 9)], zones.clone());
        assert_eq!(
            unknown.validate(),
            Err(ManifestError::UnknownCorrectZone { name: "vase".into(), zone_id: 9 })
        );

        let dup_zone = Manifest::new(
            vec![EntityDescriptor::new("vase", 0)],
            vec![ZoneDescriptor::new(0, 0.0, 0.0, 10.0), ZoneDescriptor::new(0, 5.0, 5.0, 10.0)],
        );
        assert_eq!(dup_zone.validate(), Err(ManifestError::DuplicateZone(0)));

        let zero = Manifest::new(
            vec![EntityDescriptor::new("vase", 0)],
            vec![ZoneDescriptor::new(0, 0.0, 0.0, 0.0)],
        );
        assert_eq!(zero.validate(), Err(ManifestError::InvalidZoneSize(0)));

        assert_eq!(Manifest::new(vec![], zones).validate(), Err(ManifestError::NoEntities));
        assert!(matches!(Manifest::from_json("{"), Err(ManifestError::Parse(_))));
    }
}
