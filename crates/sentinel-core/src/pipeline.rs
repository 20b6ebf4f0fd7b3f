//! Ingestion pipeline
//!
//! Unified pipeline: Parse → Enrich → Rules → Classify → Order → Project.

use crate::enrich::{IndicatorSet, IocEnricher};
use crate::rules::FailedLoginBurst;
use crate::{
    AnomalyRuleEngine, Graph, GraphProjector, LogParser, TechniqueClassifier, Timeline,
    TimelineBuilder,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline construction knobs. Everything else is fixed by the stages.
#[derive(Clone)]
pub struct PipelineConfig {
    /// Indicator literals for the IOC enricher.
    pub indicators: IndicatorSet,
    /// "fail" summaries per source before the brute-force rule fires.
    pub failed_login_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorSet::builtin(),
            failed_login_threshold: 5,
        }
    }
}

/// One ingestion run's artifacts: the authoritative timeline and its
/// derived graph projection.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub timeline: Timeline,
    pub graph: Graph,
}

struct PipelineStats {
    runs: AtomicU64,
    lines_seen: AtomicU64,
    events_parsed: AtomicU64,
}

/// The full transformation pipeline for one log submission.
///
/// Purely sequential and in-memory: every stage consumes and returns the
/// complete event collection, so no stage ever observes partial output of
/// another. Concurrent ingestions each own their event collection; the
/// pipeline itself holds no shared mutable state beyond counters.
pub struct IngestPipeline {
    parser: LogParser,
    enricher: IocEnricher,
    engine: AnomalyRuleEngine,
    classifier: TechniqueClassifier,
    builder: TimelineBuilder,
    projector: GraphProjector,
    stats: PipelineStats,
}

impl IngestPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let mut engine = AnomalyRuleEngine::new();
        engine.register(Box::new(FailedLoginBurst::new(config.failed_login_threshold)));

        Self {
            parser: LogParser::new(),
            enricher: IocEnricher::new(config.indicators),
            engine,
            classifier: TechniqueClassifier::with_default_table(),
            builder: TimelineBuilder::new(),
            projector: GraphProjector::new(),
            stats: PipelineStats {
                runs: AtomicU64::new(0),
                lines_seen: AtomicU64::new(0),
                events_parsed: AtomicU64::new(0),
            },
        }
    }

    /// Run the whole pipeline over one raw text submission.
    pub fn run(&self, text: &str) -> IngestOutcome {
        let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        self.stats.lines_seen.fetch_add(lines as u64, Ordering::Relaxed);

        let events = self.parser.parse(text);
        self.stats
            .events_parsed
            .fetch_add(events.len() as u64, Ordering::Relaxed);
        tracing::debug!(lines, events = events.len(), "parsed submission");

        let events = self.enricher.enrich(events);
        let events = self.engine.apply(events);
        let events = self.classifier.classify(events);
        let timeline = self.builder.build(events);
        let graph = self.projector.project(&timeline);

        self.stats.runs.fetch_add(1, Ordering::Relaxed);
        IngestOutcome { timeline, graph }
    }

    pub fn metrics(&self) -> PipelineMetrics {
        PipelineMetrics {
            runs: self.stats.runs.load(Ordering::Relaxed),
            lines_seen: self.stats.lines_seen.load(Ordering::Relaxed),
            events_parsed: self.stats.events_parsed.load(Ordering::Relaxed),
        }
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Counter snapshot across the pipeline's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetrics {
    pub runs: u64,
    pub lines_seen: u64,
    pub events_parsed: u64,
}
