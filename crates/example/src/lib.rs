//! A small text pipeline whose stages are hookline extension points.
//!
//! The host ([`TextPipeline`]) knows nothing about the transformations it
//! runs. Plugins register them under [`NORMALIZE`], [`DECORATE`] and
//! [`JOIN`]; the host retrieves and applies them in order.

use std::sync::Arc;

use hookline_hooks::{Hook, HookError, HookRegistry, Value};

/// Rewrites a line before anything else sees it.
pub const NORMALIZE: &str = "normalize";

/// Adds presentation to a normalized line.
pub const DECORATE: &str = "decorate";

/// Combines finished lines; called dynamically with a separator and the lines.
pub const JOIN: &str = "join";

/// Shape of [`NORMALIZE`] and [`DECORATE`] hooks.
pub type LineHook = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Host that runs lines through whatever hooks are registered.
#[derive(Debug, Default)]
pub struct TextPipeline {
    registry: HookRegistry,
}

impl TextPipeline {
    /// Creates a pipeline with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry plugins register into.
    #[must_use]
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Applies every normalize hook, then every decorate hook.
    ///
    /// Stages are retrieved one at a time so an empty stage is skipped
    /// rather than voiding the other.
    #[must_use]
    pub fn process(&self, line: &str) -> String {
        [NORMALIZE, DECORATE]
            .into_iter()
            .flat_map(|stage| self.registry.get::<LineHook>(&[stage]))
            .fold(line.to_string(), |acc, hook| hook(acc))
    }

    /// Joins `lines` with the first [`JOIN`] hook, if one is registered.
    ///
    /// # Errors
    ///
    /// Returns a [`HookError`] if the join hook does not accept a separator
    /// followed by lines.
    pub fn join(
        &self,
        separator: &'static str,
        lines: Vec<String>,
    ) -> Result<Option<String>, HookError> {
        let Some(hook) = self.registry.hooks(&[JOIN]).into_iter().next() else {
            return Ok(None);
        };

        let mut args = vec![Value::new(separator)];
        args.extend(lines.into_iter().map(Value::new));

        let joined = hook.call(args)?;
        Ok(joined.downcast::<String>().ok())
    }
}

/// Registers the bundled plugins.
pub fn install_default_plugins(pipeline: &TextPipeline) {
    pipeline
        .registry()
        .register(NORMALIZE, -10, |line: String| line.trim().to_string())
        .register(NORMALIZE, 0, |line: String| {
            line.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .register(DECORATE, 10, |line: String| format!("* {line}"))
        .register(DECORATE, 5, |line: String| {
            let mut chars = line.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .register(
            JOIN,
            0,
            Hook::variadic(0, |separator: &'static str, lines: Vec<String>| {
                lines.join(separator)
            }),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_without_hooks_is_identity() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.process("  as is "), "  as is ");
    }

    #[test]
    fn default_plugins_run_in_order() {
        let pipeline = TextPipeline::new();
        install_default_plugins(&pipeline);

        // capitalize (5) runs before the bullet (10)
        assert_eq!(pipeline.process("  hello    hooks  "), "* Hello hooks");
    }

    #[test]
    fn missing_stage_does_not_void_the_other() {
        let pipeline = TextPipeline::new();
        pipeline
            .registry()
            .register(DECORATE, 0, |line: String| format!("[{line}]"));
        assert_eq!(pipeline.process("x"), "[x]");
    }

    #[test]
    fn join_uses_variadic_hook() {
        let pipeline = TextPipeline::new();
        install_default_plugins(&pipeline);

        let joined = pipeline
            .join(" | ", vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        assert_eq!(joined.as_deref(), Some("a | b | c"));
    }

    #[test]
    fn join_without_hook_is_none() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.join(",", Vec::new()).unwrap(), None);
    }

    #[test]
    fn join_reports_incompatible_hook() {
        let pipeline = TextPipeline::new();
        pipeline
            .registry()
            .register(JOIN, 0, |a: u32, b: u32| a + b);

        let err = pipeline.join(",", vec!["x".into()]).unwrap_err();
        assert!(matches!(err, HookError::ArgumentType { index: 0, .. }));
    }
}
