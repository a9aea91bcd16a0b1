//! Configuration for the meal-break audit engine.
//!
//! Rule parameters are always passed explicitly into each run. Named rule-set
//! profiles can be loaded from YAML files and adjusted per run with
//! [`RuleOverrides`].
//!
//! # Example
//!
//! ```no_run
//! use meal_audit::config::{ConfigLoader, RuleOverrides};
//!
//! let loader = ConfigLoader::load("./config/profiles").unwrap();
//! let (profile, rules) = loader
//!     .resolve_rules(Some("california_standard"), &RuleOverrides::default())
//!     .unwrap();
//! println!("{}: first meal by hour {}", profile, rules.meal_deadline_hours);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_PROFILE};
pub use types::{
    BreakDurationUnit, DEFAULT_MEAL_DEADLINE_HOURS, DEFAULT_MIN_BREAK_MINUTES,
    DEFAULT_WAIVER_LIMIT_HOURS, InputSchema, RuleConfig, RuleOverrides, RuleProfile,
    SECOND_MEAL_THRESHOLD_HOURS, SECOND_MEAL_WAIVER_CEILING_HOURS,
};
