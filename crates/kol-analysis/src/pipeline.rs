//! KolPipeline — runs the stages in order over one input snapshot.
//!
//! Stats → Augment → Score (+ classify) → Graph → Centrality → Timeline → Report.
//! Each stage takes the previous stage's output by value and hands its own
//! on. Cancellation is checked between stages only.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use kol_core::types::collections::FxHashMap;
use kol_core::{CancellationToken, EventDispatcher, KolConfig, KolEventHandler, PipelineError, PipelineStage};

use crate::augment::StatAugmenter;
use crate::classify::classify_accounts;
use crate::graph::{CentralityAnalyzer, SocialGraph, SocialGraphBuilder};
use crate::ingest::{FollowEdge, PostRecord, ProfileRecord};
use crate::report::{Report, ReportContext, ReportGenerator, RunMetadata};
use crate::scoring::InfluenceScorer;
use crate::stats::{AccountMap, AccountStatsBuilder};
use crate::timeline::{ActivityProfile, ActivityTimeline};

/// Immutable snapshot of the records for one run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub posts: Vec<PostRecord>,
    pub follow_edges: Vec<FollowEdge>,
    /// Measured profile data, where the ingestion side has it.
    pub profiles: Vec<ProfileRecord>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub report: Report,
    /// Every account with all stage outputs attached.
    pub accounts: AccountMap,
    pub graph: SocialGraph,
    /// Keyed by account id, qualified accounts only.
    pub activity: FxHashMap<String, ActivityProfile>,
}

pub struct KolPipeline {
    config: KolConfig,
    dispatcher: EventDispatcher,
    cancel: CancellationToken,
}

impl KolPipeline {
    /// Create a pipeline. Fails if the configuration does not validate.
    pub fn new(config: KolConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            dispatcher: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: KolConfig::default(),
            dispatcher: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn KolEventHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &KolConfig {
        &self.config
    }

    /// A handle the host can use to stop the run between stages.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn run(&self, input: &PipelineInput) -> Result<PipelineOutput, PipelineError> {
        let run_start = Instant::now();

        let stage = self.enter(PipelineStage::Stats)?;
        let (accounts, build_stats) = AccountStatsBuilder::from_config(&self.config).build(&input.posts);
        self.dispatcher
            .emit_records_dropped(PipelineStage::Stats, build_stats.malformed_posts);
        self.leave(stage);

        let stage = self.enter(PipelineStage::Augment)?;
        let augmenter = StatAugmenter::from_seed(self.config.random_seed);
        let (accounts, augment_stats) = augmenter.augment(accounts, &input.profiles);
        self.leave(stage);

        let stage = self.enter(PipelineStage::Score)?;
        let (mut accounts, _) = InfluenceScorer::from_config(&self.config).score_accounts(accounts);
        let classified = classify_accounts(&mut accounts);
        tracing::debug!(classified, "accounts classified");
        self.leave(stage);

        let stage = self.enter(PipelineStage::Graph)?;
        let (graph, graph_stats) = SocialGraphBuilder::new().build(&accounts, &input.follow_edges);
        self.dispatcher
            .emit_records_dropped(PipelineStage::Graph, graph_stats.dropped());
        self.leave(stage);

        let stage = self.enter(PipelineStage::Centrality)?;
        let centrality = CentralityAnalyzer::new().analyze(&graph);
        centrality.apply(&mut accounts);
        self.leave(stage);

        let stage = self.enter(PipelineStage::Timeline)?;
        let (activity, _) = ActivityTimeline::new().build(&input.posts, &accounts);
        self.leave(stage);

        let stage = self.enter(PipelineStage::Report)?;
        let report = ReportGenerator::from_config(&self.config).generate(ReportContext {
            accounts: &accounts,
            graph_metrics: &centrality.metrics,
            activity: &activity,
            metadata: RunMetadata {
                generated_at: Utc::now(),
                synthesis_seed: augment_stats.seed,
                batch_size: self.config.batch_size,
                account_limit: self.config.effective_account_limit(),
                top_n: self.config.top_n,
            },
            malformed_posts: build_stats.malformed_posts,
            malformed_edges: graph_stats.malformed_edges,
            dangling_edges: graph_stats.dangling_edges,
        });
        self.leave(stage);

        tracing::info!(
            accounts = report.summary.total_accounts,
            qualified = report.summary.qualified_count,
            elapsed_ms = run_start.elapsed().as_millis() as u64,
            "pipeline complete"
        );

        Ok(PipelineOutput {
            report,
            accounts,
            graph,
            activity,
        })
    }

    fn enter(&self, stage: PipelineStage) -> Result<(PipelineStage, Instant), PipelineError> {
        if self.cancel.is_cancelled() {
            tracing::info!(%stage, "pipeline cancelled");
            return Err(PipelineError::Cancelled { stage });
        }
        self.dispatcher.emit_stage_started(stage);
        Ok((stage, Instant::now()))
    }

    fn leave(&self, (stage, started): (PipelineStage, Instant)) {
        self.dispatcher.emit_stage_completed(stage, started.elapsed());
    }
}

impl Default for KolPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
