//! Voice Context - Voice Catalog

use super::VoiceDescriptor;

/// 一次刷新对目录造成的影响
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogChange {
    /// 音色列表是否发生变化
    pub voices_changed: bool,
    /// 默认音色是否发生变化
    pub default_changed: bool,
}

impl CatalogChange {
    pub fn is_unchanged(&self) -> bool {
        !self.voices_changed && !self.default_changed
    }
}

/// 音色目录
///
/// 不变量:
/// - `default_voice` 若存在，必然是最近一次刷新后 `voices` 的成员
/// - `refresh` 是 `voices` / `default_voice` 的唯一写入者
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
    default_voice: Option<VoiceDescriptor>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用平台最新的音色列表整体替换目录
    ///
    /// 默认音色仍在新列表中时保留，否则改为新列表第一项（列表为空则清空）。
    /// 对同一列表重复刷新是幂等的。
    pub fn refresh(&mut self, voices: Vec<VoiceDescriptor>) -> CatalogChange {
        let voices_changed = self.voices != voices;
        self.voices = voices;

        let still_present = self
            .default_voice
            .as_ref()
            .and_then(|current| self.find(current.name()))
            .cloned();

        let next_default = still_present.or_else(|| self.voices.first().cloned());
        let default_changed = next_default != self.default_voice;
        self.default_voice = next_default;

        CatalogChange {
            voices_changed,
            default_changed,
        }
    }

    /// 按名称精确查找，未命中返回 None
    pub fn select(&self, name: &str) -> Option<&VoiceDescriptor> {
        self.find(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    pub fn default_voice(&self) -> Option<&VoiceDescriptor> {
        self.default_voice.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    fn find(&self, name: &str) -> Option<&VoiceDescriptor> {
        self.voices.iter().find(|voice| voice.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices(names: &[&str]) -> Vec<VoiceDescriptor> {
        names.iter().map(|n| VoiceDescriptor::named(*n)).collect()
    }

    #[test]
    fn test_new_catalog_is_empty() {
        let catalog = VoiceCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.default_voice().is_none());
    }

    #[test]
    fn test_first_refresh_sets_default_to_first_voice() {
        let mut catalog = VoiceCatalog::new();
        let change = catalog.refresh(voices(&["A", "B"]));

        assert!(change.voices_changed);
        assert!(change.default_changed);
        assert_eq!(catalog.default_voice().unwrap().name(), "A");
    }

    #[test]
    fn test_refresh_replaces_missing_default() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["A", "B"]));
        catalog.refresh(voices(&["C", "D"]));

        assert_eq!(catalog.default_voice().unwrap().name(), "C");
        let names: Vec<&str> = catalog.voices().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[test]
    fn test_refresh_keeps_default_still_present() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["A", "B"]));
        let change = catalog.refresh(voices(&["B", "A", "E"]));

        assert!(change.voices_changed);
        assert!(!change.default_changed);
        assert_eq!(catalog.default_voice().unwrap().name(), "A");
    }

    #[test]
    fn test_repeated_refresh_is_idempotent() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["A", "B"]));
        let change = catalog.refresh(voices(&["A", "B"]));

        assert!(change.is_unchanged());
        assert_eq!(catalog.voices().len(), 2);
    }

    #[test]
    fn test_refresh_to_empty_clears_default() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["A"]));
        let change = catalog.refresh(Vec::new());

        assert!(change.default_changed);
        assert!(catalog.default_voice().is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_select_miss_leaves_catalog_untouched() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["A", "B"]));

        assert!(catalog.select("NonexistentVoice").is_none());
        assert_eq!(catalog.voices().len(), 2);
        assert_eq!(catalog.default_voice().unwrap().name(), "A");
    }

    #[test]
    fn test_select_is_exact_match() {
        let mut catalog = VoiceCatalog::new();
        catalog.refresh(voices(&["Alice", "alice (en)"]));

        assert_eq!(catalog.select("alice (en)").unwrap().name(), "alice (en)");
        assert!(catalog.select("alice").is_none());
    }
}
