//! Catalog Subscription - 音色变化通知的注册守卫

use std::sync::Arc;

use crate::application::ports::{SpeechEnginePort, VoicesChangedHandler};

/// 音色变化订阅
///
/// 创建时向引擎注册通知，drop 时解除，避免引擎持有已销毁会话的回调
pub struct CatalogSubscription {
    engine: Arc<dyn SpeechEnginePort>,
}

impl CatalogSubscription {
    pub fn attach(engine: Arc<dyn SpeechEnginePort>, on_change: VoicesChangedHandler) -> Self {
        engine.set_voices_changed_handler(Some(on_change));
        tracing::debug!(engine = engine.name(), "Voice catalog listener attached");
        Self { engine }
    }
}

impl Drop for CatalogSubscription {
    fn drop(&mut self) {
        self.engine.set_voices_changed_handler(None);
        tracing::debug!(engine = self.engine.name(), "Voice catalog listener detached");
    }
}
