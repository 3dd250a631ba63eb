use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::{analyze_candidate, AnalysisOptions};
use crate::config::ExtractionConfig;
use crate::core::confidence::{score_dish_confidence, DishSignals};
use crate::core::model::{Dish, DishCandidate, GroupType, Menu, OcrPage, TextFragment, TextGroup};
use crate::error::ExtractionError;
use crate::extract::{assign_sections, attach_descriptions, build_candidates, restaurant_name};
use crate::grouping::SpatialGrouper;
use crate::merge::merge_similar;
use crate::ocr::FragmentFilter;
use crate::pricing::{associate_prices, detect_fragment_prices};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Grouping,
    Extracting,
    Pricing,
    Categorizing,
    Validating,
    Completed,
    Failed,
}

/// Cooperative cancellation flag shared between a pipeline and its callers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Counters describing what one run kept and dropped.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ExtractionReport {
    pub fragments_in: usize,
    pub fragments_kept: usize,
    pub fragments_dropped: usize,
    pub groups: usize,
    pub dish_groups: usize,
    pub section_headers: usize,
    pub price_only_groups: usize,
    pub description_groups: usize,
    pub restaurant_info_groups: usize,
    pub candidates: usize,
    pub candidates_rejected: usize,
    pub descriptions_attached: usize,
    pub prices_detected: usize,
    pub prices_attached: usize,
    pub dishes_validated: usize,
    pub dishes_below_threshold: usize,
    pub dishes_merged: usize,
}

impl ExtractionReport {
    fn count_groups(&mut self, groups: &[TextGroup]) {
        self.groups = groups.len();
        for group in groups {
            match group.group_type {
                GroupType::DishItem => self.dish_groups += 1,
                GroupType::SectionHeader => self.section_headers += 1,
                GroupType::PriceOnly => self.price_only_groups += 1,
                GroupType::Description => self.description_groups += 1,
                GroupType::RestaurantInfo => self.restaurant_info_groups += 1,
            }
        }
    }
}

type ProgressObserver = Box<dyn Fn(PipelineState, f32) + Send + Sync>;

/// Data owned by a single extraction run.
struct RunContext<'a> {
    config: &'a ExtractionConfig,
    report: ExtractionReport,
    fragments: Vec<TextFragment>,
    groups: Vec<TextGroup>,
    candidates: Vec<DishCandidate>,
    ocr_confidence: f32,
    restaurant_name: Option<String>,
}

impl<'a> RunContext<'a> {
    fn new(config: &'a ExtractionConfig) -> Self {
        Self {
            config,
            report: ExtractionReport::default(),
            fragments: Vec::new(),
            groups: Vec::new(),
            candidates: Vec::new(),
            ocr_confidence: 0.0,
            restaurant_name: None,
        }
    }
}

struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Menu structure extraction over one OCR page at a time.
///
/// A pipeline runs one extraction at a time; a second concurrent request is
/// rejected with [`ExtractionError::AlreadyProcessing`]. Separate pipeline
/// instances share nothing and may run in parallel.
pub struct MenuPipeline {
    config: ExtractionConfig,
    processing: AtomicBool,
    status: Mutex<(PipelineState, f32)>,
    cancel: CancellationToken,
    observer: Option<ProgressObserver>,
}

impl std::fmt::Debug for MenuPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuPipeline")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("progress", &self.progress())
            .finish()
    }
}

impl Default for MenuPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl MenuPipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            processing: AtomicBool::new(false),
            status: Mutex::new((PipelineState::Idle, 0.0)),
            cancel: CancellationToken::new(),
            observer: None,
        }
    }

    /// Called with the new state and overall progress at every stage boundary.
    pub fn with_progress_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(PipelineState, f32) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.status.lock().0
    }

    pub fn progress(&self) -> f32 {
        self.status.lock().1
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Token that cancels the running extraction at its next stage boundary.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn extract(&self, page: &OcrPage) -> Result<Menu, ExtractionError> {
        self.extract_with_report(page).map(|(menu, _)| menu)
    }

    pub fn extract_with_report(
        &self,
        page: &OcrPage,
    ) -> Result<(Menu, ExtractionReport), ExtractionError> {
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExtractionError::AlreadyProcessing);
        }
        let _guard = ProcessingGuard(&self.processing);

        let result = self.run(page);
        match &result {
            Ok(_) => self.set_status(PipelineState::Completed, 1.0),
            Err(ExtractionError::Cancelled) => {
                info!("extraction cancelled");
                self.set_status(PipelineState::Idle, 0.0);
            }
            Err(err) => {
                warn!(error = %err, "extraction failed");
                let progress = self.progress();
                self.set_status(PipelineState::Failed, progress);
            }
        }
        self.cancel.reset();
        result
    }

    fn run(&self, page: &OcrPage) -> Result<(Menu, ExtractionReport), ExtractionError> {
        let mut ctx = RunContext::new(&self.config);

        self.enter(PipelineState::Grouping, 0.0)?;
        self.filter_and_group(&mut ctx, page)?;

        self.enter(PipelineState::Extracting, 0.2)?;
        self.extract_candidates(&mut ctx);

        self.enter(PipelineState::Pricing, 0.4)?;
        if ctx.config.enable_advanced_pricing {
            self.attach_prices(&mut ctx);
        }

        self.enter(PipelineState::Categorizing, 0.6)?;
        let options = AnalysisOptions {
            categories: ctx.config.enable_category_detection,
            dietary: ctx.config.enable_dietary_analysis,
        };
        for candidate in ctx.candidates.iter_mut() {
            analyze_candidate(candidate, options);
        }

        self.enter(PipelineState::Validating, 0.8)?;
        let dishes = self.validate(&mut ctx)?;

        self.check_cancelled()?;

        info!(
            dishes = dishes.len(),
            candidates = ctx.report.candidates,
            merged = ctx.report.dishes_merged,
            "menu extraction completed"
        );
        let menu = Menu {
            dishes,
            restaurant_name: ctx.restaurant_name,
            ocr_confidence: ctx.ocr_confidence,
        };
        Ok((menu, ctx.report))
    }

    fn filter_and_group(&self, ctx: &mut RunContext<'_>, page: &OcrPage) -> Result<(), ExtractionError> {
        ctx.report.fragments_in = page.fragments.len();
        let outcome = FragmentFilter::new(ctx.config.min_fragment_confidence).filter(&page.fragments);
        ctx.report.fragments_kept = outcome.kept.len();
        ctx.report.fragments_dropped = outcome.dropped();
        ctx.ocr_confidence = outcome.mean_confidence();
        ctx.fragments = outcome.kept;

        if ctx.fragments.is_empty() {
            warn!(fragments_in = ctx.report.fragments_in, "no usable OCR fragments");
            return Err(ExtractionError::NoDishesFound);
        }

        let grouper = SpatialGrouper::new(ctx.config.proximity_params()).with_layout(
            ctx.config.enable_layout_awareness,
            ctx.config.region_match_similarity,
        );
        ctx.groups = grouper.group(&ctx.fragments, page.layout_regions.as_deref());
        ctx.report.count_groups(&ctx.groups);
        Ok(())
    }

    fn extract_candidates(&self, ctx: &mut RunContext<'_>) {
        let same_line = ctx.config.same_line_threshold;
        let batch = build_candidates(&ctx.groups, same_line);
        ctx.report.candidates = batch.candidates.len();
        ctx.report.candidates_rejected = batch.rejected;
        ctx.candidates = batch.candidates;

        ctx.report.descriptions_attached = attach_descriptions(
            &mut ctx.candidates,
            &ctx.groups,
            ctx.config.description_attach_distance,
            same_line,
        );
        assign_sections(&mut ctx.candidates, &ctx.groups, same_line);
        ctx.restaurant_name = restaurant_name(&ctx.groups, same_line);

        debug!(
            candidates = ctx.report.candidates,
            rejected = ctx.report.candidates_rejected,
            "built dish candidates"
        );
    }

    fn attach_prices(&self, ctx: &mut RunContext<'_>) {
        let prices = detect_fragment_prices(&ctx.fragments);
        ctx.report.prices_detected = prices.len();
        ctx.report.prices_attached =
            associate_prices(&mut ctx.candidates, &prices, ctx.config.price_association_cutoff);
        debug!(
            detected = ctx.report.prices_detected,
            attached = ctx.report.prices_attached,
            "associated prices"
        );
    }

    fn validate(&self, ctx: &mut RunContext<'_>) -> Result<Vec<Dish>, ExtractionError> {
        let threshold = ctx.config.min_dish_confidence;
        let mut dishes = Vec::with_capacity(ctx.candidates.len());

        for candidate in ctx.candidates.drain(..) {
            let score = score_dish_confidence(DishSignals::from_candidate(&candidate));
            if score >= threshold {
                dishes.push(Dish::from_candidate(candidate, score));
            } else {
                debug!(name = %candidate.name, score, threshold, "dish below confidence threshold");
                ctx.report.dishes_below_threshold += 1;
            }
        }
        ctx.report.dishes_validated = dishes.len();

        if ctx.config.merge_similar_dishes {
            let outcome = merge_similar(dishes, ctx.config.merge_similarity_threshold);
            ctx.report.dishes_merged = outcome.merged;
            dishes = outcome.dishes;
        }

        if dishes.is_empty() {
            return Err(ExtractionError::NoDishesFound);
        }
        Ok(dishes)
    }

    fn enter(&self, state: PipelineState, progress: f32) -> Result<(), ExtractionError> {
        self.check_cancelled()?;
        self.set_status(state, progress);
        Ok(())
    }

    fn check_cancelled(&self) -> Result<(), ExtractionError> {
        if self.cancel.is_cancelled() {
            Err(ExtractionError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn set_status(&self, state: PipelineState, progress: f32) {
        *self.status.lock() = (state, progress);
        if let Some(observer) = &self.observer {
            observer(state, progress);
        }
    }
}
