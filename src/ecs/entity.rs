// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// Entity（エンティティ）は、World の中の「モノ」を指すただの ID だよ！
///
/// ドラッグできるオブジェクト1個1個も、マップ上のターゲットゾーン1個1個も、
/// ぜんぶ Entity になる。意味を持たせるのはコンポーネントの仕事！
///
/// World は ID を 0 から順番に払い出すので、マニフェストの順番で作れば
/// ID の大小 = マニフェストの順番 になるよ。ゾーンの優先順位はこれに頼ってる。
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity(pub usize);

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_order_by_id() {
        let first = Entity(0);
        let later = Entity(5);
        assert!(first < later, "ID が小さい方が先に並ぶはず");
        assert_eq!(first.to_string(), "#0");
    }
}
