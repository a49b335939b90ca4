//! Startup pipeline orchestrator
//!
//! Runs the ten steps strictly in order against the chat and search
//! collaborators. Each step appends to the run's transcript; the first
//! collaborator failure stops the run and reports whatever was computed so far.

use super::output::{InvestigationOutput, PartialFailure, PartialOutput};
use super::parsing::{first_line_or_bullet, parse_two_queries, strip_code_fences};
use super::prompts;
use super::steps::{ProgressCategory, ProgressEvent, Step, PROGRESS_EVENT};
use super::transcript::Transcript;
use crate::clients::{ChatClient, ClientError, SearchClient};
use crate::server::EventBroadcaster;
use std::sync::Arc;

/// Results requested from the search provider per query
pub const SEARCH_MAX_RESULTS: usize = 5;

/// A collaborator call that failed during `step`
struct StepFailure {
    step: Step,
    source: ClientError,
}

/// Orchestrator for the startup investigation pipeline
#[derive(Clone)]
pub struct StartupPipeline {
    chat: Arc<dyn ChatClient>,
    search: Arc<dyn SearchClient>,
    broadcaster: Option<Arc<EventBroadcaster>>,
}

impl StartupPipeline {
    /// Create a new pipeline over the given collaborators
    pub fn new(chat: Arc<dyn ChatClient>, search: Arc<dyn SearchClient>) -> Self {
        Self {
            chat,
            search,
            broadcaster: None,
        }
    }

    /// Create a pipeline that also broadcasts progress events
    pub fn with_broadcaster(
        chat: Arc<dyn ChatClient>,
        search: Arc<dyn SearchClient>,
        broadcaster: Arc<EventBroadcaster>,
    ) -> Self {
        Self {
            chat,
            search,
            broadcaster: Some(broadcaster),
        }
    }

    /// Run every step for `goal`.
    ///
    /// On failure the returned [`PartialFailure`] carries the fields computed
    /// before the failing step; the transcript itself is discarded.
    pub async fn run_investigation(
        &self,
        goal: &str,
    ) -> Result<InvestigationOutput, PartialFailure> {
        let run_id = uuid::Uuid::new_v4().to_string();
        self.emit(
            &run_id,
            None,
            ProgressCategory::Init,
            format!("Starting startup investigation for \"{}\"", goal),
        );

        let mut partial = PartialOutput::default();
        match self.execute(&run_id, goal, &mut partial).await {
            Ok(output) => Ok(output),
            Err(StepFailure { step, source }) => {
                let failure = PartialFailure::new(step, source.to_string(), partial);
                self.emit(&run_id, Some(step), ProgressCategory::Error, failure.error.clone());
                Err(failure)
            }
        }
    }

    async fn execute(
        &self,
        run_id: &str,
        goal: &str,
        partial: &mut PartialOutput,
    ) -> Result<InvestigationOutput, StepFailure> {
        let mut transcript = Transcript::new(goal);

        // Step 1: two search queries
        self.progress(run_id, Step::Plan, "Generating 2 search queries...");
        let plan = self.ask(Step::Plan, &prompts::plan_prompt(goal), goal).await?;
        let [query1, query2] = parse_two_queries(&plan);
        transcript.push_inline(
            Transcript::SEARCH_QUERIES,
            format!("1) {} 2) {}", query1, query2),
        );
        self.progress(run_id, Step::Plan, format!("Queries: {} | {}", query1, query2));

        // Steps 2 and 3: one search per query
        for (step, query, label) in [
            (Step::SearchA, &query1, Transcript::SEARCH_A),
            (Step::SearchB, &query2, Transcript::SEARCH_B),
        ] {
            self.progress(run_id, step, format!("Searching \"{}\"...", query));
            let results = self.run_search(step, query).await?;
            self.progress(
                run_id,
                step,
                format!("{} done, results length: {}", step.name(), results.len()),
            );
            transcript.push_block(label, results);
        }

        // Step 4: market gaps
        self.progress(run_id, Step::Analyze, "Summarizing into Market Gaps...");
        let analysis = self
            .ask(
                Step::Analyze,
                &prompts::analysis_prompt(&transcript.render()),
                prompts::SUMMARIZE_GAPS_MESSAGE,
            )
            .await?;
        partial.analysis = Some(analysis.clone());
        transcript.push_block(Transcript::MARKET_GAPS, analysis.clone());
        self.progress(run_id, Step::Analyze, "Analysis done.");

        // Step 5: name ideas
        self.progress(run_id, Step::Ideate, "Listing 5 startup names...");
        let name_ideas = self
            .ask(
                Step::Ideate,
                &prompts::names_prompt(goal, &analysis),
                prompts::LIST_NAMES_MESSAGE,
            )
            .await?;
        transcript.push_block(Transcript::NAME_IDEAS, name_ideas.clone());
        self.progress(run_id, Step::Ideate, "Names generated.");

        // Step 6: pick the best name
        self.progress(run_id, Step::Select, "Picking best name...");
        let brand_name = first_line_or_bullet(
            &self
                .ask(
                    Step::Select,
                    &prompts::pick_name_prompt(&name_ideas),
                    prompts::PICK_NAME_MESSAGE,
                )
                .await?,
        );
        partial.brand_name = Some(brand_name.clone());
        transcript.push_inline(Transcript::BRAND_NAME, brand_name.clone());
        self.progress(run_id, Step::Select, format!("Best name: {}", brand_name));

        // Step 7: tagline
        self.progress(run_id, Step::Tagline, "Writing slogan...");
        let tagline = first_line_or_bullet(
            &self
                .ask(
                    Step::Tagline,
                    &prompts::tagline_prompt(&brand_name, goal),
                    prompts::WRITE_TAGLINE_MESSAGE,
                )
                .await?,
        );
        partial.tagline = Some(tagline.clone());
        transcript.push_inline(Transcript::TAGLINE, tagline.clone());
        self.progress(run_id, Step::Tagline, format!("Tagline: {}", tagline));

        // Step 8: pricing CSV
        self.progress(run_id, Step::Pricing, "Creating pricing CSV...");
        let pricing = strip_code_fences(
            &self
                .ask(
                    Step::Pricing,
                    &prompts::pricing_prompt(&brand_name, goal),
                    prompts::CSV_ONLY_MESSAGE,
                )
                .await?,
        );
        partial.pricing = Some(pricing.clone());
        transcript.push_block(Transcript::PRICING, pricing.clone());
        self.progress(run_id, Step::Pricing, "Pricing CSV created.");

        // Step 9: investor email
        self.progress(run_id, Step::Email, "Drafting cold email to investors...");
        let email = self
            .ask(
                Step::Email,
                &prompts::email_prompt(&brand_name, &tagline, goal, &analysis),
                prompts::EMAIL_BODY_MESSAGE,
            )
            .await?
            .trim()
            .to_string();
        partial.email = Some(email.clone());
        transcript.push_block(Transcript::EMAIL, email.clone());
        self.progress(run_id, Step::Email, "Email drafted.");

        // Step 10: assemble the response
        self.progress(run_id, Step::Finalize, "Returning response.");
        Ok(InvestigationOutput {
            analysis,
            brand_name,
            tagline,
            pricing,
            pitch: transcript.render(),
            email,
        })
    }

    /// One model call for `step`
    async fn ask(
        &self,
        step: Step,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, StepFailure> {
        self.chat
            .complete(system_prompt, user_message)
            .await
            .map_err(|source| StepFailure { step, source })
    }

    /// One search call for `step`, serialized as pretty-printed JSON
    async fn run_search(&self, step: Step, query: &str) -> Result<String, StepFailure> {
        let results = self
            .search
            .search(query, SEARCH_MAX_RESULTS)
            .await
            .map_err(|source| StepFailure { step, source })?;
        Ok(serde_json::to_string_pretty(&results).unwrap_or_else(|_| "[]".to_string()))
    }

    fn progress(&self, run_id: &str, step: Step, message: impl Into<String>) {
        self.emit(run_id, Some(step), step.category(), message.into());
    }

    fn emit(&self, run_id: &str, step: Option<Step>, category: ProgressCategory, message: String) {
        let event = ProgressEvent {
            run_id: run_id.to_string(),
            step: step.map(Step::number),
            step_name: step.map(|s| s.name().to_string()),
            category,
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        if category == ProgressCategory::Error {
            log::error!("{}", event.log_line());
        } else {
            log::info!("{}", event.log_line());
        }

        if let Some(ref broadcaster) = self.broadcaster {
            broadcaster.broadcast(PROGRESS_EVENT, &event);
        }
    }
}
