use super::*;

/// 押し引き判定の閾値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenceConfig {
    /// 聴牌時の見積もり打点がこの値未満なら降りる
    pub fold_threshold: Point,
    /// 一向聴でドラがこの枚数以上あれば押す
    pub push_dora_count: usize,
    /// 現物,筋で安全牌が見つからなかった場合に壁を参照する
    pub kabe_fallback: bool,
}

impl Default for DefenceConfig {
    fn default() -> Self {
        Self {
            fold_threshold: 7000,
            push_dora_count: 3,
            kabe_fallback: true,
        }
    }
}

#[test]
fn test_config_partial_json() {
    let conf: DefenceConfig = serde_json::from_str(r#"{"fold_threshold": 8000}"#).unwrap();
    assert_eq!(conf.fold_threshold, 8000);
    assert_eq!(conf.push_dora_count, 3);
    assert!(conf.kabe_fallback);
}
