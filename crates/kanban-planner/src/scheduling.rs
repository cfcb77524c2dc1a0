//! 日曆排程（班別 / 日的貪婪裝箱）

use kanban_core::{CalendarSlot, PlanEntry, ProductionWeek, UnplacedWork};
use rust_decimal::Decimal;

/// 日曆排程器
///
/// 依給定順序逐一消耗當班剩餘工時；當班用完換下一班，
/// 當日班別用完換下一天。不回溯、不重排。
pub struct CalendarScheduler;

/// 排程游標
struct Cursor<'a> {
    week: &'a ProductionWeek,
    shifts: Vec<Decimal>,
    day: u32,
    shift: usize,
    shift_remaining: Decimal,
}

impl<'a> Cursor<'a> {
    fn new(week: &'a ProductionWeek) -> Self {
        let shifts = week.shifts();
        let shift_remaining = shifts.first().copied().unwrap_or(Decimal::ZERO);
        Self {
            week,
            shifts,
            day: 0,
            shift: 0,
            shift_remaining,
        }
    }

    fn exhausted(&self) -> bool {
        self.day >= self.week.days || self.shifts.is_empty()
    }

    fn advance(&mut self) {
        self.shift += 1;
        if self.shift >= self.shifts.len() {
            self.shift = 0;
            self.day += 1;
        }
        self.shift_remaining = self.shifts.get(self.shift).copied().unwrap_or(Decimal::ZERO);
    }
}

impl CalendarScheduler {
    /// 將有排產量的群組放入日曆
    ///
    /// `entries` 需已依排程順序排列；排產量為 0 者略過。
    /// 最後一天用完仍有剩餘工時的群組列入 `UnplacedWork`。
    pub fn place(
        entries: &[PlanEntry],
        week: &ProductionWeek,
    ) -> (Vec<CalendarSlot>, Vec<UnplacedWork>) {
        let mut slots = Vec::new();
        let mut unplaced = Vec::new();
        let mut cursor = Cursor::new(week);

        for entry in entries.iter().filter(|e| e.is_assigned()) {
            let mut needed = entry.total_hours;

            while needed > Decimal::ZERO {
                if cursor.exhausted() {
                    tracing::debug!("群組 {} 剩餘 {}h 無法排入", entry.group_id, needed);
                    unplaced.push(UnplacedWork {
                        group_id: entry.group_id.clone(),
                        hours: needed,
                    });
                    break;
                }

                let take = needed.min(cursor.shift_remaining);
                if take > Decimal::ZERO {
                    if let Some(weekday) = week.weekday(cursor.day) {
                        slots.push(CalendarSlot {
                            day: cursor.day,
                            weekday,
                            shift: cursor.shift as u32,
                            group_id: entry.group_id.clone(),
                            hours: take,
                        });
                    }
                    needed -= take;
                    cursor.shift_remaining -= take;
                }

                if cursor.shift_remaining <= Decimal::ZERO {
                    cursor.advance();
                }
            }
        }

        (slots, unplaced)
    }
}
