// Deterministic collaborator stubs shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use startup_agent_lib::clients::{ChatClient, ClientError, SearchClient, SearchRecord};
use startup_agent_lib::pipeline::prompts;
use std::sync::Mutex;

pub const GOAL: &str = "Invoicing app for freelancers";

pub const PLAN_REPLY: &str = "1. best CRM for freelancers\n2. freelancer invoicing tools";
pub const ANALYSIS_REPLY: &str = "Freelancers juggle too many tools. Invoicing is still manual.";
pub const NAMES_REPLY: &str = "BrightPath\nLedgerly\nInvoNest\nGigDesk\nTallyUp";
pub const PICK_REPLY: &str = "- BrightPath\nOtherName";
pub const TAGLINE_REPLY: &str = "Get paid, stay bright.";
pub const PRICING_REPLY: &str =
    "```csv\nPlan,Price,Features\nFree,$0,5 invoices\nPro,$12,Unlimited invoices\n```";
pub const EMAIL_REPLY: &str =
    "  Hi, BrightPath helps freelancers get paid faster. Would you like a demo?\n";

/// Chat stub answering by user message, the one part of each request that
/// identifies its step
pub struct StubChat {
    plan_reply: String,
    fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubChat {
    pub fn new() -> Self {
        Self {
            plan_reply: PLAN_REPLY.to_string(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plan_reply(mut self, reply: &str) -> Self {
        self.plan_reply = reply.to_string();
        self
    }

    /// Fail the call whose user message is `user_message`
    pub fn failing_on(mut self, user_message: &'static str) -> Self {
        self.fail_on = Some(user_message);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for StubChat {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));

        if self.fail_on == Some(user_message) {
            return Err(ClientError::Api {
                status: 500,
                message: "model overloaded".to_string(),
            });
        }

        let reply = match user_message {
            prompts::SUMMARIZE_GAPS_MESSAGE => ANALYSIS_REPLY,
            prompts::LIST_NAMES_MESSAGE => NAMES_REPLY,
            prompts::PICK_NAME_MESSAGE => PICK_REPLY,
            prompts::WRITE_TAGLINE_MESSAGE => TAGLINE_REPLY,
            prompts::CSV_ONLY_MESSAGE => PRICING_REPLY,
            prompts::EMAIL_BODY_MESSAGE => EMAIL_REPLY,
            _ => self.plan_reply.as_str(),
        };
        // Real clients trim the first choice's content
        Ok(reply.trim().to_string())
    }
}

/// Search stub returning one record per query
pub struct StubSearch {
    fail_on: Option<String>,
    pub queries: Mutex<Vec<(String, usize)>>,
}

impl StubSearch {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fail searches for `query`
    pub fn failing_on(mut self, query: &str) -> Self {
        self.fail_on = Some(query.to_string());
        self
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for StubSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchRecord>, ClientError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        if self.fail_on.as_deref() == Some(query) {
            return Err(ClientError::Api {
                status: 503,
                message: "search unavailable".to_string(),
            });
        }

        Ok(vec![json!({
            "title": format!("Result for {}", query),
            "url": "https://example.com/article",
            "content": "Market overview",
            "score": 0.9
        })])
    }
}

/// Pretty-printed block the pipeline stores for `query`
pub fn search_block(query: &str) -> String {
    let records = vec![json!({
        "title": format!("Result for {}", query),
        "url": "https://example.com/article",
        "content": "Market overview",
        "score": 0.9
    })];
    serde_json::to_string_pretty(&records).unwrap()
}
