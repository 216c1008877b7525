// src/ecs/component.rs

/// Component（コンポーネント）トレイトだよ！
///
/// World に入れられるデータであることを示すマーカー。
/// `Debug` はログに出したいから付けてる。
pub trait Component: std::fmt::Debug + 'static {}
