use std::sync::{atomic::{AtomicU64, AtomicUsize, Ordering}, Arc};

use tracing::{span, subscriber, Event, Level, Metadata, Subscriber};

/// Counts `WARN` events emitted while installed
#[derive(Debug, Default, Clone)]
pub struct WarningCounter {
    warnings: Arc<AtomicUsize>,
    next_span: Arc<AtomicU64>,
}

impl WarningCounter {
    pub fn count(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    /// Run `f` with this counter as the thread's default subscriber
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        subscriber::with_default(self.clone(), f)
    }
}

impl Subscriber for WarningCounter {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(self.next_span.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) { }

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) { }

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &span::Id) { }

    fn exit(&self, _span: &span::Id) { }
}
