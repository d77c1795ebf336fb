/// Column names as constants for type safety
/// Full state name ("California", "Washington, D.C.")
pub const STATE_NAME: &str = "state_name";
/// Two-letter state code, optional in every table
pub const STATE_ABBREV: &str = "state_abbrev";
/// Posting year
pub const YEAR: &str = "year";
/// AI job postings in a state and year
pub const AI_JOBS_COUNT: &str = "ai_jobs_count";
/// All job postings in a state and year
pub const ALL_JOBS_STATE_YEAR: &str = "all_jobs_state_year";
/// Lightcast career area label
pub const CAREER_AREA: &str = "lot_career_area_name";
/// AI postings in a state and career area
pub const ENTRY_COUNT: &str = "entry_count";
/// Denominator for the career tables
pub const TOTAL_JOBS: &str = "total_jobs";
/// Precomputed proportion
pub const PROPORTION: &str = "proportion";
/// AI jobs / all jobs in a career area
pub const INTENSITY: &str = "intensity";
/// Skill label
pub const SKILLS_NAME: &str = "skills_name";
/// Postings mentioning a skill
pub const SKILL_COUNT: &str = "skill_count";
/// Older exports name the skill mention count plainly
pub const COUNT: &str = "count";
/// AI listings in a state and career area
pub const TOTAL_AI_LISTINGS: &str = "total_ai_listings";
