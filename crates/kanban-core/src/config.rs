//! 排產引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 一週最多可排的工作日（週一到週五）
pub const MAX_PLANNING_DAYS: u32 = 5;

/// 每日班別數的硬上限（配置值不得超過）
pub const MAX_SHIFTS_PER_DAY_LIMIT: u32 = 24;

/// 排產參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 換線時間（小時），每個有排產量的群組計算一次
    pub changeover_hours: Decimal,

    /// 單一班別長度（小時）
    pub shift_length_hours: Decimal,

    /// 可排的最大天數
    pub max_days: u32,

    /// 每日最多班別數，每日工時不得超過 班別長度 × 班別數
    pub max_shifts_per_day: u32,

    /// 左右件後綴（區分大小寫，依序比對）
    ///
    /// 零件編號以任一後綴結尾時，去除後綴即為群組ID；
    /// 否則群組ID即為零件編號本身。
    pub pair_suffixes: Vec<String>,
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            changeover_hours: Decimal::ONE,
            shift_length_hours: Decimal::from(8),
            max_days: MAX_PLANNING_DAYS,
            max_shifts_per_day: 4,
            pair_suffixes: vec![
                " LH".to_string(),
                " RH".to_string(),
                "-LH".to_string(),
                "-RH".to_string(),
            ],
        }
    }

    /// 從 JSON 載入配置，缺少的欄位使用預設值
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置換線時間
    pub fn with_changeover_hours(mut self, hours: Decimal) -> Self {
        self.changeover_hours = hours;
        self
    }

    /// 建構器模式：設置班別長度
    pub fn with_shift_length_hours(mut self, hours: Decimal) -> Self {
        self.shift_length_hours = hours;
        self
    }

    /// 建構器模式：設置最大天數
    pub fn with_max_days(mut self, days: u32) -> Self {
        self.max_days = days;
        self
    }

    /// 建構器模式：設置每日最多班別數
    pub fn with_max_shifts_per_day(mut self, shifts: u32) -> Self {
        self.max_shifts_per_day = shifts;
        self
    }

    /// 建構器模式：設置左右件後綴
    pub fn with_pair_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.pair_suffixes = suffixes;
        self
    }

    /// 取得零件的群組ID（去除左右件後綴）
    pub fn group_id_for<'a>(&self, part_id: &'a str) -> &'a str {
        self.pair_suffixes
            .iter()
            .find_map(|suffix| part_id.strip_suffix(suffix.as_str()))
            .unwrap_or(part_id)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}
