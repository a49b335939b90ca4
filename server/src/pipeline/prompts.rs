//! Prompt templates for each model step
//!
//! Every model call is a system prompt built here plus one of the short fixed
//! user messages below.

pub const SUMMARIZE_GAPS_MESSAGE: &str = "Summarize market gaps only.";
pub const LIST_NAMES_MESSAGE: &str = "List 5 names.";
pub const PICK_NAME_MESSAGE: &str = "Pick one name.";
pub const WRITE_TAGLINE_MESSAGE: &str = "Write the tagline.";
pub const CSV_ONLY_MESSAGE: &str = "Output CSV only.";
pub const EMAIL_BODY_MESSAGE: &str = "Write the email body only.";

/// Step 1: two web search queries for the goal. The goal itself is the user message.
pub fn plan_prompt(goal: &str) -> String {
    format!(
        "You are a research assistant. Given a startup goal, output exactly 2 web search queries \
         (one per line, no numbering). Queries should help find market and competitor info for: \"{}\".",
        goal
    )
}

/// Step 4: market gaps summary over everything gathered so far
pub fn analysis_prompt(transcript: &str) -> String {
    format!(
        "Using the following search results, write a short \"Market Gaps\" summary (2–4 sentences) \
         for the startup goal. Focus on unmet needs and opportunities.\n\n{}",
        transcript
    )
}

/// Step 5: five candidate names
pub fn names_prompt(goal: &str, analysis: &str) -> String {
    format!(
        "Goal: {}. Market context: {}. List exactly 5 catchy startup names, one per line, \
         no numbers or bullets.",
        goal, analysis
    )
}

/// Step 6: pick one name from the list
pub fn pick_name_prompt(name_ideas: &str) -> String {
    format!(
        "From these names, choose the single best one for the goal. Reply with only that one name, \
         nothing else.\n\n{}",
        name_ideas
    )
}

/// Step 7: slogan
pub fn tagline_prompt(brand_name: &str, goal: &str) -> String {
    format!(
        "Startup: {}. Goal: {}. Write one short, memorable slogan/tagline. Reply with only the tagline.",
        brand_name, goal
    )
}

/// Step 8: pricing table as CSV
pub fn pricing_prompt(brand_name: &str, goal: &str) -> String {
    format!(
        "Startup: {}. Goal: {}. Create a simple pricing table as CSV. Use headers like: \
         Plan,Price,Features. Include 2–4 tiers. Reply with only the CSV, no markdown.",
        brand_name, goal
    )
}

/// Step 9: investor cold email body
pub fn email_prompt(brand_name: &str, tagline: &str, goal: &str, analysis: &str) -> String {
    format!(
        "Startup: {}. Tagline: {}. Goal: {}. Market gaps: {}. Write a short, professional cold email \
         to investors (3–5 sentences). Reply with only the email body.",
        brand_name, tagline, goal, analysis
    )
}
