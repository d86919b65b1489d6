use std::sync::Arc;
use std::time::Duration;

use super::handler::KolEventHandler;
use super::types::PipelineStage;

/// Fans pipeline events out to every registered handler, in registration order.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn KolEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn KolEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn emit_stage_started(&self, stage: PipelineStage) {
        for handler in &self.handlers {
            handler.on_stage_started(stage);
        }
    }

    pub fn emit_stage_completed(&self, stage: PipelineStage, elapsed: Duration) {
        for handler in &self.handlers {
            handler.on_stage_completed(stage, elapsed);
        }
    }

    pub fn emit_records_dropped(&self, stage: PipelineStage, count: usize) {
        if count == 0 {
            return;
        }
        for handler in &self.handlers {
            handler.on_records_dropped(stage, count);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl KolEventHandler for Recorder {
        fn on_stage_started(&self, stage: PipelineStage) {
            self.events.lock().unwrap().push(format!("start:{stage}"));
        }

        fn on_records_dropped(&self, stage: PipelineStage, count: usize) {
            self.events.lock().unwrap().push(format!("drop:{stage}:{count}"));
        }
    }

    #[test]
    fn test_dispatch_to_all_handlers() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(a.clone());
        dispatcher.register(b.clone());

        dispatcher.emit_stage_started(PipelineStage::Graph);
        dispatcher.emit_stage_completed(PipelineStage::Graph, Duration::from_millis(3));

        assert_eq!(*a.events.lock().unwrap(), vec!["start:graph".to_string()]);
        assert_eq!(*b.events.lock().unwrap(), vec!["start:graph".to_string()]);
    }

    #[test]
    fn test_zero_drops_not_emitted() {
        let rec = Arc::new(Recorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(rec.clone());

        dispatcher.emit_records_dropped(PipelineStage::Stats, 0);
        dispatcher.emit_records_dropped(PipelineStage::Stats, 4);

        assert_eq!(*rec.events.lock().unwrap(), vec!["drop:stats:4".to_string()]);
    }
}
