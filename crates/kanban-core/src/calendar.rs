//! 週排產日曆模型

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PlannerConfig, MAX_SHIFTS_PER_DAY_LIMIT};
use crate::KanbanError;

const WORKING_WEEK: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// 週排產日曆（天數 × 每日工時）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionWeek {
    /// 排產天數（從週一起算）
    pub days: u32,

    /// 每日工時
    pub hours_per_day: Decimal,

    /// 班別長度
    pub shift_length_hours: Decimal,
}

impl ProductionWeek {
    /// 創建週排產日曆
    ///
    /// 天數必須在 1..=max_days 之間，每日工時必須大於 0
    /// 且不超過 班別長度 × 每日最多班別數。
    pub fn new(days: u32, hours_per_day: Decimal, config: &PlannerConfig) -> crate::Result<Self> {
        let max_days = config.max_days.min(WORKING_WEEK.len() as u32);
        if days == 0 || days > max_days {
            return Err(KanbanError::InvalidCapacityParameters(format!(
                "天數必須介於 1 與 {} 之間，收到 {}",
                max_days, days
            )));
        }
        if hours_per_day <= Decimal::ZERO {
            return Err(KanbanError::InvalidCapacityParameters(format!(
                "每日工時必須大於 0，收到 {}",
                hours_per_day
            )));
        }
        if config.shift_length_hours <= Decimal::ZERO {
            return Err(KanbanError::InvalidCapacityParameters(format!(
                "班別長度必須大於 0，收到 {}",
                config.shift_length_hours
            )));
        }
        if config.max_shifts_per_day == 0 || config.max_shifts_per_day > MAX_SHIFTS_PER_DAY_LIMIT {
            return Err(KanbanError::InvalidCapacityParameters(format!(
                "每日班別數必須介於 1 與 {} 之間，收到 {}",
                MAX_SHIFTS_PER_DAY_LIMIT, config.max_shifts_per_day
            )));
        }
        let max_hours_per_day = config
            .shift_length_hours
            .checked_mul(Decimal::from(config.max_shifts_per_day))
            .unwrap_or(Decimal::MAX);
        if hours_per_day > max_hours_per_day {
            return Err(KanbanError::InvalidCapacityParameters(format!(
                "每日工時 {} 超過上限 {}（{} 班 × {}h）",
                hours_per_day,
                max_hours_per_day,
                config.max_shifts_per_day,
                config.shift_length_hours
            )));
        }

        Ok(Self {
            days,
            hours_per_day,
            shift_length_hours: config.shift_length_hours,
        })
    }

    /// 總產能（小時）
    pub fn capacity(&self) -> Decimal {
        Decimal::from(self.days).saturating_mul(self.hours_per_day)
    }

    /// 每日班別工時
    ///
    /// 以班別長度連續切分，餘數成為最後一個不完整班別。
    pub fn shifts(&self) -> Vec<Decimal> {
        let mut shifts = Vec::new();
        let mut remaining = self.hours_per_day;

        while remaining >= self.shift_length_hours {
            shifts.push(self.shift_length_hours);
            remaining -= self.shift_length_hours;
        }
        if remaining > Decimal::ZERO {
            shifts.push(remaining);
        }

        shifts
    }

    /// 第 `day` 天（0 起算）對應的星期
    pub fn weekday(&self, day: u32) -> Option<Weekday> {
        if day >= self.days {
            return None;
        }
        WORKING_WEEK.get(day as usize).copied()
    }

    /// 所有排產日的星期
    pub fn weekdays(&self) -> Vec<Weekday> {
        (0..self.days).filter_map(|day| self.weekday(day)).collect()
    }
}
