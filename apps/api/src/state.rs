use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::document::FileTextReader;
use crate::interviews::InterviewClient;
use crate::llm_client::TextGenerator;
use crate::render::MarkdownAssembler;
use crate::report::catalog::ToolCatalog;
use crate::report::field_extraction::FieldExtractionClient;
use crate::report::pipeline::ReportPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ReportPipeline,
    /// Same output directory the pipeline writes to; used to serve reports back.
    pub reports: MarkdownAssembler,
    pub interviews: InterviewClient,
}

impl AppState {
    /// Wires the pipeline around `generator`. The catalog is built here, once.
    pub fn new(config: &Config, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let reports = MarkdownAssembler::new(config.report_output_dir.clone());
        let pipeline = ReportPipeline::new(
            Arc::new(ToolCatalog::default()),
            Arc::new(FileTextReader),
            FieldExtractionClient::new(generator),
            Arc::new(reports.clone()),
        );
        let interviews = InterviewClient::new(config.interview.clone())?;

        Ok(Self {
            pipeline,
            reports,
            interviews,
        })
    }
}
