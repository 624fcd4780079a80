//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use unitsnap_core::{SnapError, Value};

/// Central registry of named conversion functions
#[derive(Default)]
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self { functions: HashMap::new() }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => {
                debug!(function = name, args = args.len(), "calling function");
                f.call(args, ctx)
            }
            None => {
                let similar = self.find_similar_functions(name);
                let mut err = SnapError::undefined_func(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use help() for full list.",
                        suggestions.join(", ")
                    ));
                }
                debug!(function = name, "unknown function");
                Value::Error(err)
            }
        }
    }

    /// Function names similar to `name`, best match first
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                (score > 0).then(|| (func_name.clone(), score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        score += query_chars.intersection(&candidate_chars).count() * 2;

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Self::function_to_help(f.meta()),
            None => Value::Error(SnapError::not_found("function", name)),
        }
    }

    fn general_help(&self) -> Value {
        let mut funcs_by_cat: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, f) in &self.functions {
            funcs_by_cat.entry(f.meta().category.to_string()).or_default().push(name.clone());
        }

        let functions = funcs_by_cat
            .into_iter()
            .map(|(cat, mut names)| {
                names.sort();
                (cat, Value::List(names.into_iter().map(Value::Text).collect()))
            })
            .collect();

        Value::object([
            ("functions", Value::Object(functions)),
            ("usage", Value::from("Call help('function_name') for detailed help.")),
        ])
    }

    fn function_to_help(meta: FunctionMeta) -> Value {
        let args = meta
            .args
            .iter()
            .map(|a| {
                Value::object([
                    ("name", Value::from(a.name)),
                    ("type", Value::from(a.typ)),
                    ("description", Value::from(a.description)),
                    ("optional", Value::Bool(a.optional)),
                ])
            })
            .collect();

        Value::object([
            ("name", Value::from(meta.name)),
            ("description", Value::from(meta.description)),
            ("usage", Value::from(meta.usage)),
            ("returns", Value::from(meta.returns)),
            ("category", Value::from(meta.category)),
            ("args", Value::List(args)),
            ("examples", Value::List(meta.examples.iter().map(|e| Value::from(*e)).collect())),
            ("related", Value::List(meta.related.iter().map(|r| Value::from(*r)).collect())),
        ])
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let mut metas: Vec<FunctionMeta> = self
            .functions
            .values()
            .map(|f| f.meta())
            .filter(|m| category.map_or(true, |c| m.category == c))
            .collect();
        metas.sort_by_key(|m| m.name);

        Value::List(
            metas
                .into_iter()
                .map(|meta| {
                    Value::object([
                        ("name", Value::from(meta.name)),
                        ("description", Value::from(meta.description)),
                        ("usage", Value::from(meta.usage)),
                        ("category", Value::from(meta.category)),
                    ])
                })
                .collect(),
        )
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("PluginRegistry").field("functions", &names).finish()
    }
}
