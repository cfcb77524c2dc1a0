//! 左右件配對

use std::collections::HashMap;

use kanban_core::PlannerConfig;

/// 左右件配對器
///
/// 零件編號以左右件後綴（如 `" LH"`、`" RH"`）結尾時，去除後綴即為群組ID。
/// 不要求左右件成對：單獨的 LH 零件也以基底名稱成為自己的群組。
pub struct PairingResolver<'a> {
    config: &'a PlannerConfig,
}

impl<'a> PairingResolver<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// 解析零件編號 → 群組ID
    pub fn resolve_groups<I, S>(&self, part_ids: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        part_ids
            .into_iter()
            .map(|part| {
                let part = part.as_ref();
                (part.to_string(), self.config.group_id_for(part).to_string())
            })
            .collect()
    }
}
