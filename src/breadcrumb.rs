//! Breadcrumb trail derived from the current route path.
//!
//! Display names that are only known after a fetch (e.g. a task's name) are
//! registered in a [`BreadcrumbContext`] owned by `AppState`.

use std::collections::HashMap;

use crate::constants::APP_TITLE;

/// Key/value lookup for labels that the path alone cannot provide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadcrumbContext {
    info: HashMap<String, String>,
}

impl BreadcrumbContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge entries into the context, overwriting existing keys.
    pub fn set_info<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.info.insert(key.into(), value.into());
        }
    }

    pub fn get_info(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.info.clear();
    }

    pub fn task_key(task_id: &str) -> String {
        format!("task-{}", task_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub label: String,
    pub path: String,
    pub is_current: bool,
}

impl BreadcrumbItem {
    fn new(label: impl Into<String>, path: impl Into<String>, is_current: bool) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            is_current,
        }
    }
}

fn known_label(segment: &str) -> Option<&'static str> {
    match segment {
        "tasks" => Some("Tasks"),
        "models" => Some("Models"),
        "playground" => Some("Playground"),
        "home" => Some("Home"),
        "taskdetail" => Some("Task Detail"),
        _ => None,
    }
}

fn looks_like_task_id(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

/// `my-task_name` becomes `My Task Name`. A letter is capitalised when it
/// starts an ASCII word (`[A-Za-z0-9_]`).
fn humanize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut in_word = false;
    for c in segment.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !in_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

/// Build the trail for `path` (a `/`-separated route path, empty segments
/// ignored).
pub fn generate_breadcrumbs(path: &str, ctx: &BreadcrumbContext) -> Vec<BreadcrumbItem> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return vec![BreadcrumbItem::new("Home", "/", true)];
    }

    let mut items = Vec::with_capacity(segments.len() + 1);
    items.push(BreadcrumbItem::new(APP_TITLE, "/", false));

    let mut current_path = String::new();
    for (index, segment) in segments.iter().enumerate() {
        current_path.push('/');
        current_path.push_str(segment);

        let label = if let Some(label) = known_label(segment) {
            label.to_string()
        } else if index > 0 && segments[index - 1] == "tasks" && looks_like_task_id(segment) {
            ctx.get_info(&BreadcrumbContext::task_key(segment))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Task {}", segment))
        } else {
            humanize(segment)
        };

        items.push(BreadcrumbItem::new(label, current_path.clone(), index == segments.len() - 1));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[BreadcrumbItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn root_is_single_home_item() {
        let ctx = BreadcrumbContext::new();
        for path in ["", "/", "//"] {
            assert_eq!(generate_breadcrumbs(path, &ctx), vec![BreadcrumbItem::new("Home", "/", true)]);
        }
    }

    #[test]
    fn known_segments_get_fixed_labels() {
        let ctx = BreadcrumbContext::new();
        let items = generate_breadcrumbs("/tasks", &ctx);
        assert_eq!(labels(&items), ["OpenAgents SDK", "Tasks"]);
        assert_eq!(items[0].path, "/");
        assert!(!items[0].is_current);
        assert_eq!(items[1].path, "/tasks");
        assert!(items[1].is_current);

        let items = generate_breadcrumbs("/home/taskdetail", &ctx);
        assert_eq!(labels(&items), ["OpenAgents SDK", "Home", "Task Detail"]);
    }

    #[test]
    fn task_id_uses_context_name() {
        let mut ctx = BreadcrumbContext::new();
        ctx.set_info([("task-ab12-cd", "Support bot")]);
        let items = generate_breadcrumbs("/tasks/ab12-cd", &ctx);
        assert_eq!(labels(&items), ["OpenAgents SDK", "Tasks", "Support bot"]);
        assert_eq!(items[2].path, "/tasks/ab12-cd");
        assert!(items[2].is_current);
        assert!(!items[1].is_current);
    }

    #[test]
    fn task_id_falls_back_without_context() {
        let ctx = BreadcrumbContext::new();
        let items = generate_breadcrumbs("/tasks/AB12", &ctx);
        assert_eq!(items[2].label, "Task AB12");
    }

    #[test]
    fn non_hex_segment_after_tasks_is_humanized() {
        let ctx = BreadcrumbContext::new();
        let items = generate_breadcrumbs("/tasks/new-task_form", &ctx);
        assert_eq!(items[2].label, "New Task Form");
    }

    #[test]
    fn hex_segment_elsewhere_is_humanized() {
        let mut ctx = BreadcrumbContext::new();
        ctx.set_info([("task-abc", "Named")]);
        let items = generate_breadcrumbs("/models/abc", &ctx);
        assert_eq!(items[2].label, "Abc");
    }

    #[test]
    fn humanize_capitalises_each_word() {
        assert_eq!(humanize("fine-tune_jobs"), "Fine Tune Jobs");
        assert_eq!(humanize("v2.alpha"), "V2.Alpha");
        assert_eq!(humanize("already Upper"), "Already Upper");
    }

    #[test]
    fn context_merges_and_clears() {
        let mut ctx = BreadcrumbContext::new();
        ctx.set_info([("task-1", "one"), ("task-2", "two")]);
        ctx.set_info([("task-2", "deux")]);
        assert_eq!(ctx.get_info("task-1"), Some("one"));
        assert_eq!(ctx.get_info("task-2"), Some("deux"));
        ctx.clear();
        assert_eq!(ctx.get_info("task-1"), None);
    }
}
