use prometheus::HistogramVec;
use std::time::Instant;
use tracing::{span, Subscriber};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

/// A tracing Layer observing the lifetime of every span into a
/// prometheus histogram, labeled by span name and target
#[derive(Debug, Clone)]
pub struct TimeSpanLifetime {
    histogram: HistogramVec,
}

impl TimeSpanLifetime {
    /// Constructor. The histogram needs `span_name` and `target` labels
    pub fn new(histogram: HistogramVec) -> Self {
        Self { histogram }
    }
}

struct SpanTiming {
    start: Instant,
}

impl<S> Layer<S> for TimeSpanLifetime
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        match ctx.span(id) {
            Some(span) => span.extensions_mut().insert(SpanTiming {
                start: Instant::now(),
            }),
            None => unreachable!(),
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let now = Instant::now();
        match ctx.span(&id) {
            Some(span) => {
                let exts = span.extensions();
                if let Some(timing) = exts.get::<SpanTiming>() {
                    self.histogram
                        .with_label_values(&[span.name(), span.metadata().target()])
                        .observe((now - timing.start).as_secs_f64());
                }
            }
            None => unreachable!(),
        }
    }
}
